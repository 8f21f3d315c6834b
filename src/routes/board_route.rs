use axum::{middleware, routing::get, Router};

use crate::config::AppState;
use crate::handlers::board_handler::*;
use crate::middleware::auth_middleware::auth_middleware;

// Every board route requires auth; view/update/delete additionally check
// admin-or-owner in the service
pub fn board_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_boards_handler).post(create_board_handler))
        .route(
            "/{id}",
            get(get_board_handler)
                .put(update_board_handler)
                .delete(delete_board_handler),
        )
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
