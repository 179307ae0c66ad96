use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::provider::{ProviderError, TaskProvider};
use crate::relay::Relay;
use crate::websockets::HeartbeatConfig;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TaskProvider>,
    pub relay: Relay,
    pub heartbeat: HeartbeatConfig,
}

impl AppState {
    pub fn new(provider: Arc<dyn TaskProvider>, relay: Relay, heartbeat: HeartbeatConfig) -> Self {
        Self {
            provider,
            relay,
            heartbeat,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A provider call failed. `message` is what the caller sees; the
    /// provider detail stays in the logs.
    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: ProviderError,
    },

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn upstream(message: &'static str) -> impl FnOnce(ProviderError) -> AppError {
        move |source| AppError::Upstream { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream { message, source } => {
                error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Rejects blank required fields before anything is sent upstream
pub fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Rejects ids that could not be a provider id. Ids end up in upstream URL
/// paths, so anything beyond ASCII letters, digits, `-` and `_` is refused.
pub fn require_id(field: &str, value: &str) -> Result<(), AppError> {
    require(field, value)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::BadRequest(format!("{field} is not a valid id")));
    }
    Ok(())
}
