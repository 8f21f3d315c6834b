use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::config::AppState;
use crate::middleware::auth_middleware::OptionalCurrentUser;
use crate::models::search_model::{SearchQuery, SearchResultsResponse};
use crate::services::search_service::SearchService;
use crate::utils::api_response::ResponseBuilder;

pub async fn search_all_handler(
    State(state): State<AppState>,
    OptionalCurrentUser(viewer): OptionalCurrentUser,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    match SearchService::search_all(&state.db, &params.q, viewer.as_ref()).await {
        Ok(results) => ResponseBuilder::success("SEARCH_COMPLETE", "Success", results),
        Err((status, code, message)) => {
            ResponseBuilder::error::<SearchResultsResponse>(status, code, &message)
        }
    }
}
