use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::StatusCode;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};

use crate::entities::{role, user, user_role};
use crate::repositories::user_repository::UserRepository;
use crate::utils::jwt_utils::JwtUtils;

pub struct AuthService;

impl AuthService {
    pub async fn register_user(
        db: &DatabaseConnection,
        username: String,
        email: String,
        password: String,
    ) -> Result<user::Model, (StatusCode, &'static str, String)> {
        // 1. Check duplicate username; nothing is persisted on collision
        let taken = UserRepository::exists_by_username(db, &username)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?;

        if taken {
            return Err((
                StatusCode::CONFLICT,
                "AUTH_DUPLICATE_USERNAME",
                "Username already exists".to_string(),
            ));
        }

        // 2. Hash password
        let hashed_password = Self::hash_password(password)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "HASH_ERR", "Failed to hash password".to_string()))?;

        // 3. Save user + default role atomically
        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Failed to start transaction".to_string()))?;

        let saved = UserRepository::create(&txn, username, email, hashed_password)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to save user".to_string()))?;

        let role_user = role::Entity::find()
            .filter(role::Column::Name.eq("user"))
            .one(&txn)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "ROLE_ERR", "Database error finding role".to_string()))?
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "ROLE_NOT_FOUND",
                "Default role 'user' not found. Please run seeders.".to_string(),
            ))?;

        let user_role_link = user_role::ActiveModel {
            user_id: Set(saved.id),
            role_id: Set(role_user.id),
        };

        user_role_link.insert(&txn).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "ROLE_ASSIGN_ERR", "Failed to assign role".to_string()))?;

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Failed to commit transaction".to_string()))?;

        tracing::info!("Registered new user: {}", saved.username);

        Ok(saved)
    }

    pub async fn login_user(
        db: &DatabaseConnection,
        username: String,
        password: String,
    ) -> Result<(String, user::Model, Vec<String>), (StatusCode, &'static str, String)> {
        let user = UserRepository::find_by_username(db, &username)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Invalid username or password".to_string(),
            ))?;

        let is_valid = Self::verify_password(password, &user.password_hash)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "HASH_ERR", "Password verification failed".to_string()))?;

        if !is_valid {
            tracing::warn!("Failed login attempt for user: {}", user.username);
            return Err((
                StatusCode::UNAUTHORIZED,
                "AUTH_FAILED",
                "Invalid username or password".to_string(),
            ));
        }

        let roles: Vec<String> = UserRepository::roles_for(db, &user)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error fetching roles".to_string()))?
            .into_iter()
            .map(|r| r.name)
            .collect();

        let token = JwtUtils::generate_jwt(user.id, &user.username)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "JWT_ERR", "Token generation failed".to_string()))?;

        Ok((token, user, roles))
    }

    // --- Utils ---

    pub fn hash_password(password: String) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
    }

    pub fn verify_password(
        password: String,
        hash: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn existing_user(id: i64, username: &str, password: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: AuthService::hash_password(password.to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username_without_persisting() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing_user(1, "alice", "secret123")]])
            .into_connection();

        let err = AuthService::register_user(
            &db,
            "alice".to_string(),
            "new@example.com".to_string(),
            "password123".to_string(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::CONFLICT);
        assert_eq!(err.1, "AUTH_DUPLICATE_USERNAME");

        // Only the collision check ran; no insert was attempted
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing_user(1, "alice", "correct-horse")]])
            .into_connection();

        let err = AuthService::login_user(&db, "alice".to_string(), "wrong".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1, "AUTH_FAILED");
    }

    #[tokio::test]
    async fn login_rejects_unknown_user_with_same_error_shape() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let err = AuthService::login_user(&db, "ghost".to_string(), "whatever".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1, "AUTH_FAILED");
    }

    #[test]
    fn password_hash_roundtrip() {
        let hash = AuthService::hash_password("hunter2hunter2".to_string()).unwrap();
        assert!(AuthService::verify_password("hunter2hunter2".to_string(), &hash).unwrap());
        assert!(!AuthService::verify_password("hunter3".to_string(), &hash).unwrap());
    }
}
