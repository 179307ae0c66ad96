use serde::{Deserialize, Serialize};

use crate::relay::RealtimeEvent;

/// Client -> Server frames. Wire form: `{"event": "...", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "joinBoard")]
    JoinBoard {
        #[serde(rename = "boardId")]
        board_id: String,
    },
    #[serde(rename = "leaveBoard")]
    LeaveBoard {
        #[serde(rename = "boardId")]
        board_id: String,
    },
}

/// Server -> Client frames
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    /// Sent once after the upgrade completes
    #[serde(rename = "connected")]
    Connected {
        #[serde(rename = "connectionId")]
        connection_id: String,
    },
    #[serde(rename = "realtime:event")]
    RealtimeEvent(RealtimeEvent),
}
