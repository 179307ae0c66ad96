use axum::http::HeaderValue;
use std::process::ExitCode;
use std::sync::Arc;
use taskrelay::{
    router, AppConfig, AppState, InMemoryConnectionManager, Relay, TrelloClient,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, String> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        None => Ok(layer.allow_origin(Any)),
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| format!("invalid CORS_ORIGIN {origin:?}: {e}"))?;
            Ok(layer.allow_origin(origin))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting task board relay");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(provider = ?config.provider, port = config.port, "Configuration loaded");

    let provider = match TrelloClient::new(&config.provider) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "Failed to build provider client");
            return ExitCode::FAILURE;
        }
    };

    let cors = match cors_layer(config.cors_origin.as_deref()) {
        Ok(cors) => cors,
        Err(e) => {
            error!(error = %e, "Invalid CORS configuration");
            return ExitCode::FAILURE;
        }
    };

    let relay = Relay::new(Arc::new(InMemoryConnectionManager::new()));
    let app_state = AppState::new(provider, relay, config.heartbeat);
    let app = router(app_state).layer(cors);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %address, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };
    info!("Server running on http://localhost:{}", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
