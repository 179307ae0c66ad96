//! Test assertion helpers - fluent API for verifying what connections received
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct EventAssertion<'a> {
    setup: &'a TestSetup,
    connections: Vec<&'a str>,
}

impl<'a> EventAssertion<'a> {
    /// Create an assertion for every connection in the setup
    pub fn for_all_connections(setup: &'a TestSetup) -> Self {
        let connections = setup.connections.iter().map(String::as_str).collect();
        Self { setup, connections }
    }

    pub fn for_connections(setup: &'a TestSetup, connections: Vec<&'a str>) -> Self {
        Self { setup, connections }
    }

    /// Realtime events delivered to one connection, as `{type, boardId, payload}`
    pub async fn events_for(setup: &TestSetup, connection_id: &str) -> Vec<Value> {
        setup
            .mock_conn_manager
            .get_messages_for(connection_id)
            .await
            .iter()
            .filter_map(|raw| serde_json::from_str::<Value>(raw).ok())
            .filter(|frame| frame["event"] == "realtime:event")
            .map(|frame| frame["data"].clone())
            .collect()
    }

    /// Assert that each connection received exactly one event, of this type
    /// and board. Returns the shared event.
    pub async fn received_exactly_one(self, event_type: &str, board_id: &str) -> Value {
        let mut received = vec![];
        for connection_id in &self.connections {
            let events = Self::events_for(self.setup, connection_id).await;
            assert_eq!(
                events.len(),
                1,
                "{} should have received exactly one event, got {:?}",
                connection_id,
                events
            );
            assert_eq!(events[0]["type"], event_type, "{} got wrong event type", connection_id);
            assert_eq!(events[0]["boardId"], board_id, "{} got wrong board", connection_id);
            received.push(events[0].clone());
        }

        for (i, event) in received.iter().enumerate().skip(1) {
            assert_eq!(
                event, &received[0],
                "{} event differs from {}",
                self.connections[i], self.connections[0]
            );
        }
        received.into_iter().next().unwrap_or(Value::Null)
    }

    /// Assert that connections received no events
    pub async fn received_nothing(self) {
        for connection_id in &self.connections {
            let events = Self::events_for(self.setup, connection_id).await;
            assert!(
                events.is_empty(),
                "{} should not have received any events, got {:?}",
                connection_id,
                events
            );
        }
    }

    /// Event types received in order, without consuming them
    pub async fn event_types_for(setup: &TestSetup, connection_id: &str) -> Vec<String> {
        Self::events_for(setup, connection_id)
            .await
            .iter()
            .filter_map(|e| e["type"].as_str().map(str::to_string))
            .collect()
    }
}
