// Realtime relay
//
// An in-process publish/subscribe hub. Connections join one channel per
// board; events published for a board reach every current member of that
// board's channel and nobody else.

// Public API - what other modules can use
pub use events::{MutationKind, RealtimeEvent, PROVIDER_EVENT_PREFIX};
pub use hub::{Relay, RelayStats};
pub use registry::ChannelRegistry;

// Internal modules
mod events;
mod hub;
mod registry;
