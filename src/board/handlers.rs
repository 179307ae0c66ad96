use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::BoardService,
    types::{BoardDataResponse, BoardNameRequest},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the member's boards
///
/// GET /api/boards
#[instrument(name = "list_boards", skip(state))]
pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let service = BoardService::new(Arc::clone(&state.provider));
    let boards = service.list_boards().await?;
    Ok(Json(boards))
}

/// HTTP handler for loading a board with its lists and cards
///
/// GET /api/boards/{board_id}/data
#[instrument(name = "get_board_data", skip(state))]
pub async fn get_board_data(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
) -> Result<Json<BoardDataResponse>, AppError> {
    let service = BoardService::new(Arc::clone(&state.provider));
    let data = service.load_board(&board_id).await?;
    Ok(Json(data))
}

/// POST /api/boards
#[instrument(name = "create_board", skip(state))]
pub async fn create_board(
    State(state): State<AppState>,
    Json(request): Json<BoardNameRequest>,
) -> Result<Json<Value>, AppError> {
    info!(name = %request.name, "Creating board");
    let service = BoardService::new(Arc::clone(&state.provider));
    let board = service.create_board(&request.name).await?;
    Ok(Json(board))
}

/// PUT /api/boards/{board_id}
#[instrument(name = "rename_board", skip(state))]
pub async fn rename_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    Json(request): Json<BoardNameRequest>,
) -> Result<Json<Value>, AppError> {
    info!(board_id = %board_id, name = %request.name, "Renaming board");
    let service = BoardService::new(Arc::clone(&state.provider));
    let board = service.rename_board(&board_id, &request.name).await?;
    Ok(Json(board))
}
