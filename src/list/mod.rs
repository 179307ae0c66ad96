// Public API - what other modules can use
pub use handlers::create_list;

// Internal modules
mod handlers;
pub mod service;
pub mod types;
