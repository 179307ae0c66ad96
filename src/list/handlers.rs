use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use super::{service::ListService, types::ListCreateRequest};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a list
///
/// POST /api/lists
/// Publishes `list:created` to the board's channel
#[instrument(name = "create_list", skip(state))]
pub async fn create_list(
    State(state): State<AppState>,
    Json(request): Json<ListCreateRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ListService::new(Arc::clone(&state.provider), state.relay.clone());
    let list = service.create_list(request).await?;
    Ok(Json(list))
}
