// Library crate for the task board relay
// This file exposes the public API for integration tests

pub mod board;
pub mod config;
pub mod list;
pub mod provider;
pub mod relay;
pub mod routes;
pub mod shared;
pub mod task;
pub mod webhook;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, ConfigError};
pub use provider::{ProviderConfig, ProviderError, TaskProvider, TrelloClient};
pub use relay::{MutationKind, RealtimeEvent, Relay, RelayStats};
pub use routes::router;
pub use shared::{AppError, AppState};
pub use websockets::{
    ClientMessage, ConnectionManager, HeartbeatConfig, InMemoryConnectionManager, MessageHandler,
    ServerMessage, WebsocketReceiveHandler,
};
