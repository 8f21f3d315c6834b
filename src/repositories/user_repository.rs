use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::*;

use crate::entities::{role, user, user::Entity as User};

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await
    }

    // Registration / provisioning collision check
    pub async fn exists_by_username<C: ConnectionTrait>(
        db: &C,
        username: &str,
    ) -> Result<bool, DbErr> {
        Ok(Self::find_by_username(db, username).await?.is_some())
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<user::Model, DbErr> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
        };

        new_user.insert(db).await
    }

    pub async fn roles_for<C: ConnectionTrait>(
        db: &C,
        user: &user::Model,
    ) -> Result<Vec<role::Model>, DbErr> {
        user.find_related(role::Entity).all(db).await
    }

    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<user::Model>, DbErr> {
        User::find().order_by_asc(user::Column::Id).all(db).await
    }

    // Case-insensitive containment match, used by the global search
    pub async fn search_by_username(
        db: &DatabaseConnection,
        username_part: &str,
    ) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Username)))
                    .like(format!("%{}%", username_part.to_lowercase())),
            )
            .order_by_asc(user::Column::Username)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    // Both sides of the containment match are lowercased, so "OA" matches a
    // user named "Roadie" but never relies on database collation
    #[tokio::test]
    async fn username_search_lowercases_both_sides() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        UserRepository::search_by_username(&db, "OA").await.unwrap();

        let log = db.into_transaction_log();
        let statement = format!("{:?}", log[0]);
        assert!(statement.contains("LOWER"));
        assert!(statement.contains("%oa%"));
    }
}
