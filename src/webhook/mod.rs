// Provider webhook ingest
//
// The provider pushes a notification whenever a watched model changes. Every
// delivery is acknowledged with 200; deliveries naming a board are relayed to
// that board's channel as `trello:<actionType>`.

// Public API - what other modules can use
pub use handlers::{receive_webhook, verify_webhook};
pub use normalize::normalize_action;

// Internal modules
mod handlers;
mod normalize;
