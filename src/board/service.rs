use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::types::BoardDataResponse;
use crate::provider::{ProviderError, TaskProvider};
use crate::shared::{require, require_id, AppError};

/// Board-level proxy operations. None of these publish relay events:
/// only changes inside a board are propagated in real time.
pub struct BoardService {
    provider: Arc<dyn TaskProvider>,
}

impl BoardService {
    pub fn new(provider: Arc<dyn TaskProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self))]
    pub async fn list_boards(&self) -> Result<Value, AppError> {
        self.provider
            .list_boards()
            .await
            .map_err(AppError::upstream("Failed to fetch boards"))
    }

    /// Loads board metadata, lists and cards concurrently. Any one call
    /// failing fails the whole load.
    #[instrument(skip(self))]
    pub async fn load_board(&self, board_id: &str) -> Result<BoardDataResponse, AppError> {
        require_id("boardId", board_id)?;

        let (board, lists, cards) = tokio::try_join!(
            self.provider.get_board(board_id),
            self.provider.get_board_lists(board_id),
            self.provider.get_board_cards(board_id),
        )
        .map_err(AppError::upstream("Failed to load board"))?;

        let lists = on_board(lists, board_id).map_err(AppError::upstream("Failed to load board"))?;
        let cards = on_board(cards, board_id).map_err(AppError::upstream("Failed to load board"))?;

        debug!(
            board_id = %board_id,
            lists = lists.len(),
            cards = cards.len(),
            "Board loaded"
        );

        Ok(BoardDataResponse {
            board,
            lists,
            cards,
        })
    }

    #[instrument(skip(self))]
    pub async fn create_board(&self, name: &str) -> Result<Value, AppError> {
        require("name", name)?;
        let board = self
            .provider
            .create_board(name)
            .await
            .map_err(AppError::upstream("Failed to create board"))?;
        info!(board_id = ?board.get("id"), "Board created");
        Ok(board)
    }

    #[instrument(skip(self))]
    pub async fn rename_board(&self, board_id: &str, name: &str) -> Result<Value, AppError> {
        require_id("boardId", board_id)?;
        require("name", name)?;
        self.provider
            .rename_board(board_id, name)
            .await
            .map_err(AppError::upstream("Failed to rename board"))
    }
}

/// Keeps only entities whose `idBoard` matches the requested board
fn on_board(collection: Value, board_id: &str) -> Result<Vec<Value>, ProviderError> {
    let Value::Array(items) = collection else {
        return Err(ProviderError::Decode(
            "expected an array of board entities".to_string(),
        ));
    };
    Ok(items
        .into_iter()
        .filter(|item| item.get("idBoard").and_then(Value::as_str) == Some(board_id))
        .collect())
}
