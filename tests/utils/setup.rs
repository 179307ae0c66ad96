use axum::Router;
use std::sync::Arc;
use tokio::sync::mpsc;

use taskrelay::{
    router, AppState, HeartbeatConfig, Relay, WebsocketReceiveHandler,
};

use super::mocks::{FakeTrello, MockConnectionManager};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub relay: Relay,
    pub app: Router,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub provider: Arc<FakeTrello>,
    pub input_handler: WebsocketReceiveHandler,
    pub connections: Vec<String>,
}

pub struct TestSetupBuilder {
    connections: Vec<String>,
    provider: FakeTrello,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            connections: vec![],
            provider: FakeTrello::new(),
        }
    }

    pub fn with_connections(mut self, connections: Vec<&str>) -> Self {
        self.connections = connections.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_list(mut self, id: &str, board_id: &str) -> Self {
        self.provider = self.provider.with_list(id, board_id);
        self
    }

    pub fn with_card(mut self, id: &str, list_id: &str, board_id: &str, pos: f64) -> Self {
        self.provider = self.provider.with_card(id, list_id, board_id, pos);
        self
    }

    pub async fn build(self) -> TestSetup {
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let provider = Arc::new(self.provider);
        let relay = Relay::new(mock_conn_manager.clone());

        // Register connections; the mock records frames rather than queueing them
        for connection_id in &self.connections {
            let (sender, _receiver) = mpsc::unbounded_channel();
            relay.register(connection_id, sender).await;
        }

        let state = AppState::new(provider.clone(), relay.clone(), HeartbeatConfig::default());
        let input_handler = WebsocketReceiveHandler::new(relay.clone());

        TestSetup {
            relay,
            app: router(state),
            mock_conn_manager,
            provider,
            input_handler,
            connections: self.connections,
        }
    }
}
