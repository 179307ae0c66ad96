use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::relay::Relay;
use crate::shared::AppState;
use crate::websockets::messages::{ClientMessage, ServerMessage};

use super::socket::{Connection, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    relay: Relay,
}

impl WebsocketReceiveHandler {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received message"
        );

        match serde_json::from_str::<ClientMessage>(&message) {
            Ok(ClientMessage::JoinBoard { board_id }) if !board_id.trim().is_empty() => {
                self.relay.join(connection_id, &board_id).await;
            }
            Ok(ClientMessage::LeaveBoard { board_id }) if !board_id.trim().is_empty() => {
                self.relay.leave(connection_id, &board_id).await;
            }
            Ok(other) => {
                warn!(
                    connection_id = %connection_id,
                    message = ?other,
                    "Ignoring channel request without board id"
                );
            }
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
            }
        }
    }
}

/// WebSocket endpoint for realtime board events
/// GET /ws
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    info!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(connection_id = %connection_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .relay
        .register(&connection_id, outbound_sender.clone())
        .await;

    let welcome = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    match serde_json::to_string(&welcome) {
        Ok(message_json) => {
            let _ = outbound_sender.send(message_json);
        }
        Err(e) => warn!(connection_id = %connection_id, error = %e, "Failed to serialize welcome"),
    }
    // The relay holds the only sender from here on; removing the connection closes the queue
    drop(outbound_sender);

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.relay.clone()));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
        app_state.heartbeat,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    // Every exit path lands here exactly once
    app_state.relay.disconnect(&connection_id).await;
}
