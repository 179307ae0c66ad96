use serde_json::Value;

use crate::relay::RealtimeEvent;

/// Action type used when a delivery does not name one
const UNKNOWN_ACTION: &str = "unknown";

/// Turns a webhook delivery into a realtime event.
///
/// Returns `None` when the delivery has no `action.data.board.id`, since it
/// cannot be routed to any channel. The payload is `action.data` as sent.
pub fn normalize_action(body: &Value) -> Option<RealtimeEvent> {
    let action = body.get("action")?;
    let data = action.get("data")?;
    let board_id = data
        .get("board")
        .and_then(|board| board.get("id"))
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())?;

    let action_type = action
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_ACTION);

    Some(RealtimeEvent::provider(action_type, board_id, data.clone()))
}
