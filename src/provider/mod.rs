// Upstream task-management provider
//
// Everything durable (boards, lists, cards) lives with the provider. This
// module is the only place that knows how to talk to it.

// Public API - what other modules can use
pub use client::{ProviderError, TaskProvider};
pub use trello::{
    ProviderConfig, TrelloClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TRELLO_BASE_URL,
};

// Internal modules
mod client;
mod trello;
