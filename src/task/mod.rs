// Public API - what other modules can use
pub use handlers::{create_task, delete_task, move_task, update_task};

// Internal modules
mod handlers;
pub mod position;
pub mod service;
pub mod types;
