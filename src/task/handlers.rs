use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use super::{
    service::TaskService,
    types::{TaskCreateRequest, TaskDeleteResponse, TaskMoveRequest},
};
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> TaskService {
    TaskService::new(Arc::clone(&state.provider), state.relay.clone())
}

/// HTTP handler for creating a card
///
/// POST /api/tasks
/// Publishes `card:created` to the board named in the request
#[instrument(name = "create_task", skip(state))]
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<TaskCreateRequest>,
) -> Result<Json<Value>, AppError> {
    let card = service(&state).create_task(request).await?;
    Ok(Json(card))
}

/// PUT /api/tasks/{card_id}
#[instrument(name = "update_task", skip(state, updates))]
pub async fn update_task(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(updates): Json<Map<String, Value>>,
) -> Result<Json<Value>, AppError> {
    let card = service(&state).update_task(&card_id, updates).await?;
    Ok(Json(card))
}

/// DELETE /api/tasks/{card_id}
///
/// Archives the card; it stays recoverable upstream
#[instrument(name = "delete_task", skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<TaskDeleteResponse>, AppError> {
    let response = service(&state).delete_task(&card_id).await?;
    Ok(Json(response))
}

/// POST /api/tasks/{card_id}/move
#[instrument(name = "move_task", skip(state))]
pub async fn move_task(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    Json(request): Json<TaskMoveRequest>,
) -> Result<Json<Value>, AppError> {
    let card = service(&state).move_task(&card_id, request).await?;
    Ok(Json(card))
}
