use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

use crate::models::auth_model::CurrentUser;
use crate::models::search_model::SearchResultsResponse;
use crate::models::user_model::PublicUserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::services::board_service::BoardService;
use crate::services::pin_service::PinService;

pub struct SearchService;

impl SearchService {
    /// Aggregate search across usernames, board names and pin titles, all
    /// by case-insensitive containment.
    pub async fn search_all(
        db: &DatabaseConnection,
        query: &str,
        viewer: Option<&CurrentUser>,
    ) -> Result<SearchResultsResponse, (StatusCode, &'static str, String)> {
        let users = UserRepository::search_by_username(db, query)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .into_iter()
            .map(|u| PublicUserResponse {
                id: u.id,
                username: u.username,
            })
            .collect();

        let boards = BoardService::search_by_name(db, query)
            .await?
            .into_iter()
            .map(BoardService::map_to_response)
            .collect();

        let pins = PinService::search_by_title(db, query, viewer).await?;

        Ok(SearchResultsResponse {
            query: query.to_string(),
            users,
            boards,
            pins,
        })
    }
}
