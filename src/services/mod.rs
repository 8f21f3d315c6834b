pub mod auth_service;
pub mod board_service;
pub mod comment_service;
pub mod email_service;
pub mod identity_service;
pub mod oauth_service;
pub mod password_reset_service;
pub mod pin_service;
pub mod search_service;
pub mod user_service;
