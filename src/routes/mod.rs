use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppState;

pub mod admin_route;
pub mod auth_route;
pub mod board_route;
pub mod pin_route;
pub mod user_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/auth", auth_route::auth_routes())
        .nest("/api/boards", board_route::board_routes(state.clone()))
        .nest("/api/pins", pin_route::pin_routes(state.clone()))
        .nest("/api/users", user_route::user_routes(state.clone()))
        .nest("/api/admin", admin_route::admin_routes(state))
        .route(
            "/api/search",
            axum::routing::get(crate::handlers::search_handler::search_all_handler),
        )
        // Health check
        .route("/api/health", axum::routing::get(|| async { "OK" }))
        .layer(cors)
}
