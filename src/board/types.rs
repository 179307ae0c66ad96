use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for creating or renaming a board
#[derive(Debug, Deserialize)]
pub struct BoardNameRequest {
    pub name: String,
}

/// Everything a board page needs in one response
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardDataResponse {
    pub board: Value,
    pub lists: Vec<Value>,
    pub cards: Vec<Value>,
}
