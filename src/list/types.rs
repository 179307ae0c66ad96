use serde::Deserialize;

/// Request payload for creating a list at the bottom of a board
#[derive(Debug, Deserialize)]
pub struct ListCreateRequest {
    pub name: String,
    #[serde(rename = "boardId")]
    pub board_id: String,
}
