use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter,
};

use crate::entities::{comment, pin};
use crate::models::auth_model::CurrentUser;
use crate::models::comment_model::CommentResponse;
use crate::models::user_model::PublicUserResponse;
use crate::utils::authz::ensure_owner_or_admin;

pub struct CommentService;

impl CommentService {
    pub async fn add_comment(
        db: &DatabaseConnection,
        pin_id: i64,
        user: &CurrentUser,
        text: String,
    ) -> Result<CommentResponse, (StatusCode, &'static str, String)> {
        let pin = pin::Entity::find_by_id(pin_id)
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "PIN_NOT_FOUND", "Pin not found".to_string()))?;

        let new_comment = comment::ActiveModel {
            id: NotSet,
            text: Set(text),
            user_id: Set(Some(user.id)),
            pin_id: Set(pin.id),
            created_at: Set(Utc::now()),
        };

        let saved = new_comment.insert(db).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to save comment".to_string()))?;

        Ok(CommentResponse {
            id: saved.id,
            text: saved.text,
            author: Some(PublicUserResponse {
                id: user.id,
                username: user.username.clone(),
            }),
            created_at: saved.created_at,
        })
    }

    /// Only the comment's author or an admin may delete it. A comment whose
    /// author account is gone has no author anymore, so only admins can
    /// remove it.
    pub async fn delete_comment(
        db: &DatabaseConnection,
        pin_id: i64,
        comment_id: i64,
        user: &CurrentUser,
    ) -> Result<(), (StatusCode, &'static str, String)> {
        let comment = comment::Entity::find_by_id(comment_id)
            .filter(comment::Column::PinId.eq(pin_id))
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "COMMENT_NOT_FOUND", "Comment not found".to_string()))?;

        ensure_owner_or_admin(comment.user_id, user)?;

        comment::Entity::delete_by_id(comment.id)
            .exec(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to delete comment".to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn current_user(id: i64, roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id,
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn stored_comment(id: i64, pin_id: i64, user_id: Option<i64>) -> comment::Model {
        comment::Model {
            id,
            text: "nice shot".to_string(),
            user_id,
            pin_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn commenting_on_a_missing_pin_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<pin::Model>::new()])
            .into_connection();

        let err = CommentService::add_comment(&db, 99, &current_user(1, &["user"]), "hello".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn author_can_delete_their_comment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_comment(4, 2, Some(1))]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        assert!(
            CommentService::delete_comment(&db, 2, 4, &current_user(1, &["user"]))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn non_author_cannot_delete_a_comment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_comment(4, 2, Some(2))]])
            .into_connection();

        let err = CommentService::delete_comment(&db, 2, 4, &current_user(1, &["user"]))
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn orphaned_comment_can_only_be_deleted_by_an_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_comment(4, 2, None)]])
            .into_connection();

        let err = CommentService::delete_comment(&db, 2, 4, &current_user(1, &["user"]))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_comment(4, 2, None)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        assert!(
            CommentService::delete_comment(&db, 2, 4, &current_user(9, &["admin"]))
                .await
                .is_ok()
        );
    }
}
