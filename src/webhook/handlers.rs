use axum::{
    body::{self, Body},
    extract::State,
    http::StatusCode,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::normalize::normalize_action;
use crate::shared::AppState;

/// Largest delivery that is parsed; bigger ones are acknowledged and dropped
pub const MAX_WEBHOOK_BODY_BYTES: usize = 4 * 1024 * 1024;

/// HEAD /webhook
///
/// The provider checks the callback URL with HEAD before registering it
pub async fn verify_webhook() -> StatusCode {
    StatusCode::OK
}

/// POST /webhook
///
/// Always answers 200 so the provider does not retry or disable the hook.
/// The body is read raw with its own size bound. Anything oversized or not
/// JSON is acknowledged and dropped.
#[instrument(name = "receive_webhook", skip_all)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Body,
) -> (StatusCode, &'static str) {
    let body = match body::to_bytes(body, MAX_WEBHOOK_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(
                error = %e,
                limit = MAX_WEBHOOK_BODY_BYTES,
                "Webhook body unreadable or too large, ignoring"
            );
            return (StatusCode::OK, "No board ID");
        }
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, bytes = body.len(), "Webhook body is not JSON, ignoring");
            return (StatusCode::OK, "No board ID");
        }
    };

    let Some(event) = normalize_action(&payload) else {
        debug!(payload = %payload, "Webhook without board id, ignoring");
        return (StatusCode::OK, "No board ID");
    };

    let board_id = event.board_id.clone();
    let event_type = event.event_type.clone();
    let receivers = state.relay.publish(event).await;
    info!(board_id = %board_id, event_type = %event_type, receivers, "Webhook relayed");

    (StatusCode::OK, "OK")
}
