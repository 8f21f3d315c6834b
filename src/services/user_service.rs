use axum::http::StatusCode;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{board, comment, password_reset_token, pin, user};
use crate::models::auth_model::CurrentUser;
use crate::models::board_model::BoardResponse;
use crate::models::user_model::{AdminUserDetailResponse, AdminUserResponse, ProfileResponse};
use crate::repositories::user_repository::UserRepository;

/// The distinguished account that can never be deleted
const PROTECTED_USERNAME: &str = "admin";

pub struct UserService;

impl UserService {
    pub async fn get_profile(
        db: &DatabaseConnection,
        current: &CurrentUser,
    ) -> Result<ProfileResponse, (StatusCode, &'static str, String)> {
        let user = user::Entity::find_by_id(current.id)
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found".to_string()))?;

        let boards = Self::boards_of(db, user.id).await?;

        Ok(ProfileResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: current.roles.clone(),
            created_at: user.created_at,
            boards,
        })
    }

    pub async fn list_users(
        db: &DatabaseConnection,
    ) -> Result<Vec<AdminUserResponse>, (StatusCode, &'static str, String)> {
        let users = UserRepository::find_all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?;

        let mut data = Vec::new();
        for u in users {
            let roles = UserRepository::roles_for(db, &u)
                .await
                .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error fetching roles".to_string()))?
                .into_iter()
                .map(|r| r.name)
                .collect();

            data.push(AdminUserResponse {
                id: u.id,
                username: u.username,
                email: u.email,
                roles,
                created_at: u.created_at,
            });
        }

        Ok(data)
    }

    pub async fn get_user_detail(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<AdminUserDetailResponse, (StatusCode, &'static str, String)> {
        let user = user::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found".to_string()))?;

        let roles = UserRepository::roles_for(db, &user)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error fetching roles".to_string()))?
            .into_iter()
            .map(|r| r.name)
            .collect();

        let boards = Self::boards_of(db, user.id).await?;

        Ok(AdminUserDetailResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            roles,
            created_at: user.created_at,
            boards,
        })
    }

    /// Delete a user account. Content is never deleted with it: all owner
    /// and author references are nulled so boards, pins and comments stay
    /// behind as orphaned content. The whole fan-out commits atomically.
    pub async fn delete_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<(), (StatusCode, &'static str, String)> {
        tracing::info!("Deleting user with ID: {}", user_id);

        let user = user::Entity::find_by_id(user_id)
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found".to_string()))?;

        if user.username == PROTECTED_USERNAME {
            return Err((
                StatusCode::BAD_REQUEST,
                "ADMIN_PROTECTED",
                "The primary admin account cannot be deleted".to_string(),
            ));
        }

        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Failed to start transaction".to_string()))?;

        // 1. Burn reset tokens
        password_reset_token::Entity::delete_many()
            .filter(password_reset_token::Column::UserId.eq(user.id))
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to delete reset tokens".to_string()))?;

        // 2. Detach comment authorship
        comment::Entity::update_many()
            .col_expr(comment::Column::UserId, Expr::value(Option::<i64>::None))
            .filter(comment::Column::UserId.eq(user.id))
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to detach comments".to_string()))?;

        // 3. Detach pin ownership
        pin::Entity::update_many()
            .col_expr(pin::Column::OwnerId, Expr::value(Option::<i64>::None))
            .filter(pin::Column::OwnerId.eq(user.id))
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to detach pins".to_string()))?;

        // 4. Detach board ownership
        board::Entity::update_many()
            .col_expr(board::Column::OwnerId, Expr::value(Option::<i64>::None))
            .filter(board::Column::OwnerId.eq(user.id))
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to detach boards".to_string()))?;

        // 5. Delete the user row itself
        user::Entity::delete_by_id(user.id)
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to delete user".to_string()))?;

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Failed to commit transaction".to_string()))?;

        tracing::info!("User deleted: {}", user_id);

        Ok(())
    }

    async fn boards_of(
        db: &DatabaseConnection,
        owner_id: i64,
    ) -> Result<Vec<BoardResponse>, (StatusCode, &'static str, String)> {
        Ok(board::Entity::find()
            .filter(board::Column::OwnerId.eq(owner_id))
            .order_by_asc(board::Column::Id)
            .all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error fetching boards".to_string()))?
            .into_iter()
            .map(|b| BoardResponse {
                id: b.id,
                name: b.name,
                owner_id: b.owner_id,
                created_at: b.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn stored_user(id: i64, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn deleting_the_admin_account_always_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user(1, "admin")]])
            .into_connection();

        let err = UserService::delete_user(&db, 1).await.unwrap_err();
        assert_eq!(err.1, "ADMIN_PROTECTED");

        // Only the lookup happened; none of the fan-out executed
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let err = UserService::delete_user(&db, 42).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deletion_nulls_references_and_removes_the_row() {
        // bob owns 2 boards, 3 pins, authored 1 comment and has 1 token
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user(7, "bob")]])
            .append_exec_results([
                exec_ok(1), // reset tokens deleted
                exec_ok(1), // comment authorship nulled
                exec_ok(3), // pin ownership nulled
                exec_ok(2), // board ownership nulled
                exec_ok(1), // user row deleted
            ])
            .into_connection();

        assert!(UserService::delete_user(&db, 7).await.is_ok());
    }
}
