use axum::{middleware, routing::get, Router};

use crate::config::AppState;
use crate::handlers::admin_handler::*;
use crate::middleware::auth_middleware::{admin_middleware, auth_middleware};

// Layer order matters: auth resolves the user first, then the admin gate
// inspects it
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route(
            "/users/{id}",
            get(get_user_detail_handler).delete(delete_user_handler),
        )
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
