use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::Display;

/// Prefix marking events that originated from the provider's webhook
pub const PROVIDER_EVENT_PREFIX: &str = "trello";

/// Mutations performed through this service that are rebroadcast to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MutationKind {
    #[strum(serialize = "card:created")]
    CardCreated,
    #[strum(serialize = "card:updated")]
    CardUpdated,
    #[strum(serialize = "card:deleted")]
    CardDeleted,
    #[strum(serialize = "list:created")]
    ListCreated,
}

/// Event envelope delivered to board subscribers.
///
/// Events are facts about changes that already happened upstream. They carry
/// no sequence number; subscribers treat them as a hint to reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "boardId")]
    pub board_id: String,
    pub payload: Value,
}

impl RealtimeEvent {
    /// Event for a mutation made through the proxy
    pub fn mutation(kind: MutationKind, board_id: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: kind.to_string(),
            board_id: board_id.into(),
            payload,
        }
    }

    /// Event relayed from a provider webhook action, e.g. `trello:updateCard`
    pub fn provider(action_type: &str, board_id: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: format!("{PROVIDER_EVENT_PREFIX}:{action_type}"),
            board_id: board_id.into(),
            payload,
        }
    }

    /// Whether the event can be routed to a channel at all
    pub fn has_board(&self) -> bool {
        !self.board_id.trim().is_empty()
    }
}
