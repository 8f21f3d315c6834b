use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::{board, pin, user};
use crate::models::auth_model::CurrentUser;
use crate::models::board_model::{BoardDetailResponse, BoardResponse};
use crate::services::pin_service::PinService;
use crate::utils::authz::ensure_owner_or_admin;

pub struct BoardService;

impl BoardService {
    pub async fn create_board(
        db: &DatabaseConnection,
        user: &CurrentUser,
        name: String,
    ) -> Result<BoardResponse, (StatusCode, &'static str, String)> {
        // A user cannot have two boards with the same name
        if Self::exists_by_name_and_owner(db, &name, user.id).await? {
            return Err((
                StatusCode::CONFLICT,
                "BOARD_DUPLICATE",
                "You already have a board with this name".to_string(),
            ));
        }

        let new_board = board::ActiveModel {
            id: NotSet,
            name: Set(name),
            owner_id: Set(Some(user.id)),
            created_at: Set(Utc::now()),
        };

        let saved = new_board.insert(db).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to create board".to_string()))?;

        Ok(Self::map_to_response(saved))
    }

    pub async fn list_own_boards(
        db: &DatabaseConnection,
        user: &CurrentUser,
    ) -> Result<Vec<BoardResponse>, (StatusCode, &'static str, String)> {
        Ok(board::Entity::find()
            .filter(board::Column::OwnerId.eq(user.id))
            .order_by_asc(board::Column::Id)
            .all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .into_iter()
            .map(Self::map_to_response)
            .collect())
    }

    /// Board view is restricted to its owner or an admin, like every other
    /// board mutation.
    pub async fn get_board(
        db: &DatabaseConnection,
        board_id: i64,
        user: &CurrentUser,
    ) -> Result<BoardDetailResponse, (StatusCode, &'static str, String)> {
        let board = Self::find_board(db, board_id).await?;
        ensure_owner_or_admin(board.owner_id, user)?;

        let pins_with_owners = pin::Entity::find()
            .filter(pin::Column::BoardId.eq(board.id))
            .order_by_desc(pin::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error fetching pins".to_string()))?;

        let pins = pins_with_owners
            .into_iter()
            .map(|(p, owner)| PinService::map_to_list_item(p, owner, Some(user)))
            .collect();

        Ok(BoardDetailResponse {
            id: board.id,
            name: board.name,
            owner_id: board.owner_id,
            created_at: board.created_at,
            pins,
        })
    }

    pub async fn update_board(
        db: &DatabaseConnection,
        board_id: i64,
        user: &CurrentUser,
        name: String,
    ) -> Result<BoardResponse, (StatusCode, &'static str, String)> {
        let board = Self::find_board(db, board_id).await?;
        ensure_owner_or_admin(board.owner_id, user)?;

        // Renaming must not collide with another board of the same owner.
        // Ownerless boards carry no uniqueness guarantee.
        if board.name != name {
            if let Some(owner_id) = board.owner_id {
                if Self::exists_by_name_and_owner(db, &name, owner_id).await? {
                    return Err((
                        StatusCode::CONFLICT,
                        "BOARD_DUPLICATE",
                        "A board with this name already exists for its owner".to_string(),
                    ));
                }
            }
        }

        let mut active: board::ActiveModel = board.into();
        active.name = Set(name);

        let updated = active.update(db).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to update board".to_string()))?;

        Ok(Self::map_to_response(updated))
    }

    /// Deleting a board never deletes its pins: the association is dropped
    /// and the pins stay behind, then the board row goes away. One
    /// transaction.
    pub async fn delete_board(
        db: &DatabaseConnection,
        board_id: i64,
        user: &CurrentUser,
    ) -> Result<(), (StatusCode, &'static str, String)> {
        let board = Self::find_board(db, board_id).await?;
        ensure_owner_or_admin(board.owner_id, user)?;

        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Failed to start transaction".to_string()))?;

        pin::Entity::update_many()
            .col_expr(pin::Column::BoardId, Expr::value(Option::<i64>::None))
            .filter(pin::Column::BoardId.eq(board.id))
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to detach pins".to_string()))?;

        board::Entity::delete_by_id(board.id)
            .exec(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to delete board".to_string()))?;

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Failed to commit transaction".to_string()))?;

        Ok(())
    }

    // Case-insensitive containment match, used by the global search
    pub async fn search_by_name(
        db: &DatabaseConnection,
        name_part: &str,
    ) -> Result<Vec<board::Model>, (StatusCode, &'static str, String)> {
        board::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(board::Column::Name)))
                    .like(format!("%{}%", name_part.to_lowercase())),
            )
            .order_by_asc(board::Column::Name)
            .all(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))
    }

    pub fn map_to_response(model: board::Model) -> BoardResponse {
        BoardResponse {
            id: model.id,
            name: model.name,
            owner_id: model.owner_id,
            created_at: model.created_at,
        }
    }

    // --- Helpers ---

    async fn find_board(
        db: &DatabaseConnection,
        board_id: i64,
    ) -> Result<board::Model, (StatusCode, &'static str, String)> {
        board::Entity::find_by_id(board_id)
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "BOARD_NOT_FOUND", "Board not found".to_string()))
    }

    async fn exists_by_name_and_owner(
        db: &DatabaseConnection,
        name: &str,
        owner_id: i64,
    ) -> Result<bool, (StatusCode, &'static str, String)> {
        Ok(board::Entity::find()
            .filter(board::Column::Name.eq(name))
            .filter(board::Column::OwnerId.eq(owner_id))
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .is_some())
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

    fn stored_board(id: i64, name: &str, owner_id: Option<i64>) -> board::Model {
        board::Model {
            id,
            name: name.to_string(),
            owner_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn creating_a_duplicate_board_name_is_a_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_board(1, "Road Trip", Some(1))]])
            .into_connection();

        let err = BoardService::create_board(&db, &current_user(1, &["user"]), "Road Trip".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::CONFLICT);
        assert_eq!(err.1, "BOARD_DUPLICATE");
    }

    #[tokio::test]
    async fn non_owner_cannot_rename_a_board() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_board(1, "Road Trip", Some(2))]])
            .into_connection();

        let err = BoardService::update_board(&db, 1, &current_user(1, &["user"]), "Mine Now".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::FORBIDDEN);

        // Denied before any mutation
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn orphaned_board_is_invisible_to_non_admins_but_open_to_admins() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_board(1, "Orphan", None)]])
            .into_connection();

        let err = BoardService::delete_board(&db, 1, &current_user(1, &["user"]))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn deleting_a_board_detaches_pins_instead_of_deleting_them() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_board(3, "Travel", Some(1))]])
            .append_exec_results([
                MockExecResult { last_insert_id: 0, rows_affected: 4 }, // pins detached
                MockExecResult { last_insert_id: 0, rows_affected: 1 }, // board deleted
            ])
            .into_connection();

        assert!(BoardService::delete_board(&db, 3, &current_user(1, &["user"]))
            .await
            .is_ok());
    }
}
