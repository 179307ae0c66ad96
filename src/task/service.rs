use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    position::{self, Placement},
    types::{TaskCreateRequest, TaskDeleteResponse, TaskMoveRequest},
};
use crate::provider::TaskProvider;
use crate::relay::{MutationKind, RealtimeEvent, Relay};
use crate::shared::{require, require_id, AppError};

/// Body keys that are routing hints from the client, never card fields
const CLIENT_ONLY_FIELDS: &[&str] = &["boardId"];

/// Card mutations. Every successful mutation is rebroadcast to the board.
///
/// Nothing here is deduplicated or retried: two identical create requests
/// produce two cards and two `card:created` events.
pub struct TaskService {
    provider: Arc<dyn TaskProvider>,
    relay: Relay,
}

impl TaskService {
    pub fn new(provider: Arc<dyn TaskProvider>, relay: Relay) -> Self {
        Self { provider, relay }
    }

    #[instrument(skip(self))]
    pub async fn create_task(&self, request: TaskCreateRequest) -> Result<Value, AppError> {
        require("listId", &request.list_id)?;
        require("name", &request.name)?;
        require("boardId", &request.board_id)?;

        let card = self
            .provider
            .create_card(&request.list_id, &request.name)
            .await
            .map_err(AppError::upstream("Failed to create card"))?;

        self.publish(MutationKind::CardCreated, &request.board_id, card.clone())
            .await;
        Ok(card)
    }

    /// Applies an open set of field updates. The event goes to the board the
    /// provider reports, which is the only reliable source after a
    /// cross-board move.
    #[instrument(skip(self, updates))]
    pub async fn update_task(
        &self,
        card_id: &str,
        updates: Map<String, Value>,
    ) -> Result<Value, AppError> {
        require_id("cardId", card_id)?;
        let fields = query_fields(updates)?;
        debug!(card_id = %card_id, fields = ?fields, "Updating card");

        let card = self
            .provider
            .update_card(card_id, &fields)
            .await
            .map_err(AppError::upstream("Failed to update card"))?;

        self.publish_for_card(MutationKind::CardUpdated, &card, card.clone())
            .await;
        Ok(card)
    }

    /// Archives the card upstream rather than erasing it
    #[instrument(skip(self))]
    pub async fn delete_task(&self, card_id: &str) -> Result<TaskDeleteResponse, AppError> {
        require_id("cardId", card_id)?;

        let card = self
            .provider
            .archive_card(card_id)
            .await
            .map_err(AppError::upstream("Failed to delete card"))?;

        self.publish_for_card(
            MutationKind::CardDeleted,
            &card,
            serde_json::json!({ "id": card_id }),
        )
        .await;

        Ok(TaskDeleteResponse {
            message: "Card deleted".to_string(),
            card,
        })
    }

    /// Moves a card to `index` within a list, computing its position from the
    /// destination's current order.
    #[instrument(skip(self))]
    pub async fn move_task(
        &self,
        card_id: &str,
        request: TaskMoveRequest,
    ) -> Result<Value, AppError> {
        require_id("cardId", card_id)?;
        require_id("idList", &request.id_list)?;

        let cards = self
            .provider
            .get_list_cards(&request.id_list)
            .await
            .map_err(AppError::upstream("Failed to move card"))?;
        let mut listed = ordered_cards(&cards);

        let pos = match position::place(&positions_without(&listed, card_id), request.index) {
            Placement::At(pos) => pos,
            Placement::Renumber => {
                self.renumber(&request.id_list, &mut listed).await?;
                match position::place(&positions_without(&listed, card_id), request.index) {
                    Placement::At(pos) => pos,
                    Placement::Renumber => return Err(AppError::Internal),
                }
            }
        };

        let fields = vec![
            ("idList".to_string(), request.id_list.clone()),
            ("pos".to_string(), pos.to_string()),
        ];
        let card = self
            .provider
            .update_card(card_id, &fields)
            .await
            .map_err(AppError::upstream("Failed to move card"))?;

        info!(card_id = %card_id, list_id = %request.id_list, pos, "Card moved");
        self.publish_for_card(MutationKind::CardUpdated, &card, card.clone())
            .await;
        Ok(card)
    }

    /// Respaces the list above its current highest position, keeping order.
    ///
    /// Writes go from the last card to the first, so after any failed write
    /// the list still reads in its original order.
    async fn renumber(&self, list_id: &str, listed: &mut [(String, f64)]) -> Result<(), AppError> {
        info!(list_id = %list_id, cards = listed.len(), "Renumbering list positions");
        let current: Vec<f64> = listed.iter().map(|(_, pos)| *pos).collect();
        let positions = position::renumbered(&current);
        for ((id, pos), new_pos) in listed.iter_mut().zip(positions).rev() {
            self.provider
                .update_card(id, &[("pos".to_string(), new_pos.to_string())])
                .await
                .map_err(AppError::upstream("Failed to move card"))?;
            *pos = new_pos;
        }
        Ok(())
    }

    async fn publish_for_card(&self, kind: MutationKind, card: &Value, payload: Value) {
        match card.get("idBoard").and_then(Value::as_str) {
            Some(board_id) => self.publish(kind, board_id, payload).await,
            None => warn!(
                card_id = ?card.get("id"),
                event_type = %kind,
                "Provider response has no idBoard, skipping broadcast"
            ),
        }
    }

    async fn publish(&self, kind: MutationKind, board_id: &str, payload: Value) {
        let receivers = self
            .relay
            .publish(RealtimeEvent::mutation(kind, board_id, payload))
            .await;
        debug!(board_id = %board_id, event_type = %kind, receivers, "Mutation broadcast");
    }
}

/// Renders update fields to query-string form. Strings pass through, numbers
/// and booleans use their JSON text; null, objects and arrays are rejected.
fn query_fields(updates: Map<String, Value>) -> Result<Vec<(String, String)>, AppError> {
    let mut fields = Vec::with_capacity(updates.len());
    for (key, value) in updates {
        if CLIENT_ONLY_FIELDS.contains(&key.as_str()) {
            continue;
        }
        let rendered = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(AppError::BadRequest(format!(
                    "Field '{key}' must be a string, number or boolean"
                )));
            }
        };
        fields.push((key, rendered));
    }

    if fields.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    Ok(fields)
}

/// Open cards of a list, ascending by position
fn ordered_cards(cards: &Value) -> Vec<(String, f64)> {
    let mut listed: Vec<(String, f64)> = cards
        .as_array()
        .map(|cards| {
            cards
                .iter()
                .filter(|card| card.get("closed").and_then(Value::as_bool) != Some(true))
                .filter_map(|card| {
                    let id = card.get("id").and_then(Value::as_str)?;
                    Some((id.to_string(), position::position_of(card)))
                })
                .collect()
        })
        .unwrap_or_default();
    listed.sort_by(|a, b| a.1.total_cmp(&b.1));
    listed
}

/// Positions of every listed card except the one being moved
fn positions_without(listed: &[(String, f64)], card_id: &str) -> Vec<f64> {
    listed
        .iter()
        .filter(|(id, _)| id != card_id)
        .map(|(_, pos)| *pos)
        .collect()
}
