use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::relay::RelayStats;
use crate::shared::AppState;
use crate::{board, list, task, webhook, websockets};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub relay: RelayStats,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        relay: state.relay.stats().await,
    })
}

/// Every HTTP and WebSocket route the service exposes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/boards", get(board::list_boards).post(board::create_board))
        .route("/api/boards/:board_id", put(board::rename_board))
        .route("/api/boards/:board_id/data", get(board::get_board_data))
        .route("/api/lists", post(list::create_list))
        .route("/api/tasks", post(task::create_task))
        .route(
            "/api/tasks/:card_id",
            put(task::update_task).delete(task::delete_task),
        )
        .route("/api/tasks/:card_id/move", post(task::move_task))
        .route(
            "/webhook",
            post(webhook::receive_webhook)
                .head(webhook::verify_webhook)
                // The handler applies its own bound
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/ws", get(websockets::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{subscribe, AppStateBuilder};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_relay_occupancy() {
        let state = AppStateBuilder::new().build();
        let _a = subscribe(&state, "a", "b1").await;
        let _b = subscribe(&state, "b", "b1").await;
        let _c = subscribe(&state, "c", "b2").await;
        let app = router(state);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"status": "ok", "channels": 2, "connections": 3}));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = router(AppStateBuilder::new().build());

        let response = app
            .oneshot(Request::get("/api/cards").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
