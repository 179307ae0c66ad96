// Public API - what other modules can use
pub use handlers::{create_board, get_board_data, list_boards, rename_board};

// Internal modules
mod handlers;
pub mod service;
pub mod types;
