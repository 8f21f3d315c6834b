use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::config::AppState;
use crate::handlers::comment_handler::*;
use crate::handlers::pin_handler::*;
use crate::middleware::auth_middleware::auth_middleware;

pub fn pin_routes(state: AppState) -> Router<AppState> {
    // Viewing and searching pins is open to everyone
    let public = Router::new()
        .route("/", get(home_feed_handler))
        .route("/search", get(search_pins_handler))
        .route("/{id}", get(view_pin_handler));

    // Mutations require auth; ownership is checked in the services
    let protected = Router::new()
        .route("/", post(create_pin_handler))
        .route("/{id}", put(update_pin_handler).delete(delete_pin_handler))
        .route("/{id}/comments", post(add_comment_handler))
        .route(
            "/{id}/comments/{comment_id}",
            delete(delete_comment_handler),
        )
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
