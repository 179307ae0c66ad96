use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::types::ListCreateRequest;
use crate::provider::TaskProvider;
use crate::relay::{MutationKind, RealtimeEvent, Relay};
use crate::shared::{require, AppError};

pub struct ListService {
    provider: Arc<dyn TaskProvider>,
    relay: Relay,
}

impl ListService {
    pub fn new(provider: Arc<dyn TaskProvider>, relay: Relay) -> Self {
        Self { provider, relay }
    }

    /// Creates a list and tells everyone on the board about it
    #[instrument(skip(self))]
    pub async fn create_list(&self, request: ListCreateRequest) -> Result<Value, AppError> {
        require("name", &request.name)?;
        require("boardId", &request.board_id)?;

        let list = self
            .provider
            .create_list(&request.board_id, &request.name)
            .await
            .map_err(AppError::upstream("Failed to create list"))?;

        let receivers = self
            .relay
            .publish(RealtimeEvent::mutation(
                MutationKind::ListCreated,
                request.board_id.as_str(),
                list.clone(),
            ))
            .await;

        info!(
            board_id = %request.board_id,
            list_id = ?list.get("id"),
            receivers,
            "List created"
        );
        Ok(list)
    }
}
