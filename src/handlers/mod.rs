pub mod admin_handler;
pub mod auth_handler;
pub mod board_handler;
pub mod comment_handler;
pub mod pin_handler;
pub mod search_handler;
pub mod user_handler;
