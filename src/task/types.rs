use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for creating a card
#[derive(Debug, Deserialize)]
pub struct TaskCreateRequest {
    #[serde(rename = "listId")]
    pub list_id: String,
    pub name: String,
    #[serde(rename = "boardId")]
    pub board_id: String,
}

/// Request payload for moving a card to an index within a list
#[derive(Debug, Deserialize)]
pub struct TaskMoveRequest {
    #[serde(rename = "idList")]
    pub id_list: String,
    pub index: usize,
}

/// Response for a soft-deleted card
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDeleteResponse {
    pub message: String,
    pub card: Value,
}
