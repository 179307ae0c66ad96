use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Outbound side of live connections: connection_id -> queue of text frames
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, connection_id: &str);

    /// Queues a message for one connection. Returns false if it is gone.
    async fn send_to_connection(&self, connection_id: &str, message: &str) -> bool;

    /// Queues a message for each connection, returning how many accepted it
    async fn send_to_connections(&self, connection_ids: &[String], message: &str) -> usize;

    async fn connection_count(&self) -> usize;
}

pub struct InMemoryConnectionManager {
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, sender);
    }

    async fn remove_connection(&self, connection_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(connection_id);
    }

    async fn send_to_connection(&self, connection_id: &str, message: &str) -> bool {
        let connections = self.connections.read().await;
        connections
            .get(connection_id)
            .is_some_and(|sender| sender.send(message.to_string()).is_ok())
    }

    async fn send_to_connections(&self, connection_ids: &[String], message: &str) -> usize {
        let connections = self.connections.read().await;
        connection_ids
            .iter()
            .filter_map(|id| connections.get(id))
            .filter(|sender| sender.send(message.to_string()).is_ok())
            .count()
    }

    async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}
