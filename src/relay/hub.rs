use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, instrument, warn};

use super::{events::RealtimeEvent, registry::ChannelRegistry};
use crate::websockets::{ConnectionManager, ServerMessage};

/// Snapshot of relay occupancy, reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    pub channels: usize,
    pub connections: usize,
}

/// The relay service: channel membership plus fan-out to live connections.
///
/// Constructed once at startup and cloned into every request context. Clones
/// share the same membership table. Membership changes and publishes each
/// hold the table lock for their whole read-modify-write, so a publish sees
/// a consistent member set.
#[derive(Clone)]
pub struct Relay {
    channels: Arc<RwLock<ChannelRegistry>>,
    connections: Arc<dyn ConnectionManager>,
}

impl Relay {
    pub fn new(connections: Arc<dyn ConnectionManager>) -> Self {
        Self {
            channels: Arc::new(RwLock::new(ChannelRegistry::new())),
            connections,
        }
    }

    /// Registers the outbound queue of a freshly accepted connection
    pub async fn register(&self, connection_id: &str, sender: mpsc::UnboundedSender<String>) {
        self.connections
            .add_connection(connection_id.to_string(), sender)
            .await;
    }

    #[instrument(skip(self))]
    pub async fn join(&self, connection_id: &str, board_id: &str) {
        let added = self.channels.write().await.join(board_id, connection_id);
        if added {
            info!(connection_id = %connection_id, board_id = %board_id, "Joined board channel");
        } else {
            debug!(connection_id = %connection_id, board_id = %board_id, "Already a channel member");
        }
    }

    #[instrument(skip(self))]
    pub async fn leave(&self, connection_id: &str, board_id: &str) {
        let removed = self.channels.write().await.leave(board_id, connection_id);
        if removed {
            info!(connection_id = %connection_id, board_id = %board_id, "Left board channel");
        } else {
            debug!(connection_id = %connection_id, board_id = %board_id, "Leave ignored, not a member");
        }
    }

    /// Drops a connection from every channel and forgets its outbound queue
    #[instrument(skip(self))]
    pub async fn disconnect(&self, connection_id: &str) {
        let left = self.channels.write().await.remove_connection(connection_id);
        self.connections.remove_connection(connection_id).await;
        info!(
            connection_id = %connection_id,
            boards = ?left,
            "Connection removed from relay"
        );
    }

    /// Delivers an event to every current member of its board's channel.
    ///
    /// Returns the number of connections the event was handed to. Events
    /// without a board, or for a board nobody is watching, are dropped.
    pub async fn publish(&self, event: RealtimeEvent) -> usize {
        if !event.has_board() {
            debug!(event_type = %event.event_type, "Dropping event without board id");
            return 0;
        }

        let board_id = event.board_id.clone();
        let event_type = event.event_type.clone();
        let message_json = match serde_json::to_string(&ServerMessage::RealtimeEvent(event)) {
            Ok(json) => json,
            Err(e) => {
                warn!(board_id = %board_id, error = %e, "Failed to serialize realtime event");
                return 0;
            }
        };

        let channels = self.channels.read().await;
        let members = channels.members(&board_id);
        if members.is_empty() {
            debug!(board_id = %board_id, event_type = %event_type, "No subscribers, event dropped");
            return 0;
        }

        let delivered = self
            .connections
            .send_to_connections(&members, &message_json)
            .await;

        debug!(
            board_id = %board_id,
            event_type = %event_type,
            receivers = delivered,
            "Realtime event published"
        );
        delivered
    }

    pub async fn stats(&self) -> RelayStats {
        RelayStats {
            channels: self.channels.read().await.channel_count(),
            connections: self.connections.connection_count().await,
        }
    }
}
