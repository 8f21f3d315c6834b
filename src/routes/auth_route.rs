use axum::{
    routing::{get, post},
    Router,
};

use crate::config::AppState;
use crate::handlers::auth_handler::*;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user_handler))
        .route("/login", post(login_user_handler))
        .route("/logout", post(logout_handler))
        .route("/forgot-password", post(forgot_password_handler))
        .route(
            "/reset-password",
            get(validate_reset_token_handler).post(reset_password_handler),
        )
        .route("/oauth/google", get(google_auth_url_handler))
        .route("/oauth/google/callback", get(google_callback_handler))
}
