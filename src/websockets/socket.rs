use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};
use tracing::{debug, warn};

/// What arrived from the client
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// A text frame to hand to the message handler
    Text(String),
    /// Ping, pong or binary frame. Proves the peer is alive, nothing more.
    Heartbeat,
    /// The peer closed the connection
    Closed,
}

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    /// Send a text message to the client
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Send a ping to the client
    async fn send_ping(&mut self) -> Result<(), SocketError>;

    /// Receive the next frame from the client
    async fn receive_message(&mut self) -> Result<Inbound, SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Handler for incoming WebSocket messages
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Handle an incoming message from the client
    async fn handle_message(&self, connection_id: &str, message: String);
}

#[derive(Debug)]
pub enum SocketError {
    ConnectionClosed,
    SendFailed(String),
    ReceiveFailed(String),
    /// Nothing was heard from the peer within the liveness timeout
    HeartbeatTimeout,
}

/// Liveness settings for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// How often the server pings the client
    pub interval: Duration,
    /// Silence longer than this counts as a disconnect
    pub timeout: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(25),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Direct implementation on axum's WebSocket
#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn send_ping(&mut self) -> Result<(), SocketError> {
        self.send(Message::Ping(Vec::new()))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Inbound, SocketError> {
        match self.next().await {
            Some(Ok(Message::Text(text))) => Ok(Inbound::Text(text)),
            Some(Ok(Message::Close(_))) => Ok(Inbound::Closed),
            Some(Ok(_)) => Ok(Inbound::Heartbeat),
            Some(Err(e)) => Err(SocketError::ReceiveFailed(e.to_string())),
            None => Ok(Inbound::Closed),
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// Connection represents a managed WebSocket connection
/// It is used to send and receive messages to and from the client
/// The outbound receiver is a channel that receives messages from the ConnectionManager's outbound sender
pub struct Connection {
    pub connection_id: String,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    message_handler: Arc<dyn MessageHandler>,
    heartbeat: HeartbeatConfig,
}

impl Connection {
    pub fn new(
        connection_id: String,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        message_handler: Arc<dyn MessageHandler>,
        heartbeat: HeartbeatConfig,
    ) -> Self {
        Self {
            connection_id,
            socket,
            outbound_receiver,
            message_handler,
            heartbeat,
        }
    }

    /// Run the connection - handles sending, receiving and liveness until disconnect
    pub async fn run(mut self) -> Result<(), SocketError> {
        let mut heartbeat = interval_at(
            Instant::now() + self.heartbeat.interval,
            self.heartbeat.interval,
        );
        let mut last_seen = Instant::now();

        loop {
            tokio::select! {
                // Handle outbound messages (from our app to client)
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => {
                            within(self.heartbeat.timeout, self.socket.send_message(message)).await?
                        }
                        None => break, // Channel closed, disconnect
                    }
                }

                // Handle inbound messages (from client to our app)
                msg = self.socket.receive_message() => {
                    match msg? {
                        Inbound::Text(message) => {
                            last_seen = Instant::now();
                            self.message_handler
                                .handle_message(&self.connection_id, message)
                                .await;
                        }
                        Inbound::Heartbeat => last_seen = Instant::now(),
                        Inbound::Closed => break, // Client disconnected
                    }
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() >= self.heartbeat.timeout {
                        warn!(
                            connection_id = %self.connection_id,
                            silent_ms = last_seen.elapsed().as_millis() as u64,
                            "Heartbeat timeout"
                        );
                        return Err(SocketError::HeartbeatTimeout);
                    }
                    debug!(connection_id = %self.connection_id, "Sending heartbeat ping");
                    within(self.heartbeat.timeout, self.socket.send_ping()).await?;
                }
            }
        }

        // Clean disconnect
        let _ = self.socket.close().await;
        Ok(())
    }
}

/// A send that cannot complete within the liveness timeout means the peer is gone
async fn within<F>(limit: Duration, send: F) -> Result<(), SocketError>
where
    F: Future<Output = Result<(), SocketError>>,
{
    tokio::time::timeout(limit, send)
        .await
        .map_err(|_| SocketError::HeartbeatTimeout)?
}
