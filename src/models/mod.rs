pub mod auth_model;
pub mod board_model;
pub mod comment_model;
pub mod pin_model;
pub mod search_model;
pub mod user_model;
