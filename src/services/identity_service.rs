use axum::http::StatusCode;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{board, role, user, user_role};
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::AuthService;

/// Name of the board auto-created for accounts provisioned through the
/// Google login flow
const ONBOARDING_BOARD_NAME: &str = "gmail";

/// The two shapes an authenticated principal can take. Handlers never branch
/// on provider types themselves; both login paths funnel through
/// `IdentityService::resolve` exactly once per request.
pub enum AuthPrincipal {
    Local {
        username: String,
    },
    Provider {
        attributes: serde_json::Map<String, serde_json::Value>,
    },
}

pub struct IdentityService;

impl IdentityService {
    /// Map a verified principal to its domain user, provisioning one on
    /// first third-party login. Returns the user together with its role
    /// names. Repeating a provider login with the same email never creates
    /// a second user or a second onboarding board.
    pub async fn resolve(
        db: &DatabaseConnection,
        principal: AuthPrincipal,
    ) -> Result<(user::Model, Vec<String>), (StatusCode, &'static str, String)> {
        match principal {
            AuthPrincipal::Local { username } => {
                let user = UserRepository::find_by_username(db, &username)
                    .await
                    .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
                    .ok_or((
                        StatusCode::UNAUTHORIZED,
                        "USER_NOT_FOUND",
                        "No account for this username".to_string(),
                    ))?;

                let roles = Self::role_names(db, &user).await?;
                Ok((user, roles))
            }
            AuthPrincipal::Provider { attributes } => {
                // The provider attribute set MUST contain an email
                let email = attributes
                    .get("email")
                    .and_then(|v| v.as_str())
                    .ok_or((
                        StatusCode::UNAUTHORIZED,
                        "OAUTH_NO_EMAIL",
                        "Email not found from OAuth2 provider".to_string(),
                    ))?
                    .to_string();

                match UserRepository::find_by_email(db, &email)
                    .await
                    .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?
                {
                    Some(existing) => {
                        let mut roles = Self::role_names(db, &existing).await?;
                        // An account that somehow lost its roles gets the
                        // default role back
                        if roles.is_empty() {
                            Self::assign_default_role(db, &existing).await?;
                            roles = vec!["user".to_string()];
                        }
                        Ok((existing, roles))
                    }
                    None => {
                        let created = Self::provision_user(db, &email).await?;
                        Ok((created, vec!["user".to_string()]))
                    }
                }
            }
        }
    }

    // First third-party login: create the user, its default role link and
    // the onboarding board in one transaction
    async fn provision_user(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<user::Model, (StatusCode, &'static str, String)> {
        // 1. Pick a username: the email verbatim, unless already taken
        let mut username = email.to_string();
        let taken = UserRepository::exists_by_username(db, &username)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error".to_string()))?;
        if taken {
            username = Self::fallback_username(email);
        }

        // 2. Random, never-disclosed password: this account is only ever
        // reached through the provider flow
        let random_password = Uuid::new_v4().to_string();
        let hashed_password = AuthService::hash_password(random_password)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "HASH_ERR", "Failed to hash password".to_string()))?;

        let txn = db.begin().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_ERR", "Failed to start transaction".to_string()))?;

        let created = UserRepository::create(&txn, username, email.to_string(), hashed_password)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to create user".to_string()))?;

        // 3. Exactly the default role
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

        let link = user_role::ActiveModel {
            user_id: Set(created.id),
            role_id: Set(role_user.id),
        };
        link.insert(&txn).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "ROLE_ASSIGN_ERR", "Failed to assign role".to_string()))?;

        // 4. Onboarding board
        let onboarding_board = board::ActiveModel {
            id: NotSet,
            name: Set(ONBOARDING_BOARD_NAME.to_string()),
            owner_id: Set(Some(created.id)),
            created_at: Set(Utc::now()),
        };
        onboarding_board.insert(&txn).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_WRITE_ERR", "Failed to create onboarding board".to_string()))?;

        txn.commit().await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "TXN_COMMIT_ERR", "Failed to commit transaction".to_string()))?;

        tracing::info!("Provisioned new user and onboarding board for: {}", created.username);

        Ok(created)
    }

    async fn assign_default_role(
        db: &DatabaseConnection,
        user: &user::Model,
    ) -> Result<(), (StatusCode, &'static str, String)> {
        let role_user = role::Entity::find()
            .filter(role::Column::Name.eq("user"))
            .one(db)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "ROLE_ERR", "Database error finding role".to_string()))?
            .ok_or((
                StatusCode::INTERNAL_SERVER_ERROR,
                "ROLE_NOT_FOUND",
                "Default role 'user' not found. Please run seeders.".to_string(),
            ))?;

        let link = user_role::ActiveModel {
            user_id: Set(user.id),
            role_id: Set(role_user.id),
        };
        link.insert(db).await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "ROLE_ASSIGN_ERR", "Failed to assign role".to_string()))?;

        Ok(())
    }

    async fn role_names(
        db: &DatabaseConnection,
        user: &user::Model,
    ) -> Result<Vec<String>, (StatusCode, &'static str, String)> {
        Ok(UserRepository::roles_for(db, user)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERR", "Database error fetching roles".to_string()))?
            .into_iter()
            .map(|r| r.name)
            .collect())
    }

    // localpart + short random suffix, so the derived name is unique even
    // when the email itself is taken as a username
    fn fallback_username(email: &str) -> String {
        let local_part = email.split('@').next().unwrap_or(email);
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(4)
            .map(char::from)
            .collect();
        format!("{}_{}", local_part, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn provider_principal(attrs: &[(&str, &str)]) -> AuthPrincipal {
        let mut attributes = serde_json::Map::new();
        for (k, v) in attrs {
            attributes.insert(k.to_string(), json!(v));
        }
        AuthPrincipal::Provider { attributes }
    }

    fn stored_user(id: i64, username: &str, email: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn provider_login_without_email_is_fatal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = IdentityService::resolve(&db, provider_principal(&[("name", "No Email")]))
            .await
            .unwrap_err();

        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.1, "OAUTH_NO_EMAIL");
    }

    #[tokio::test]
    async fn provider_login_reuses_existing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user(7, "gal", "gal@gmail.com")]])
            .append_query_results([vec![role::Model {
                id: 2,
                name: "user".to_string(),
                description: None,
            }]])
            .into_connection();

        let (user, roles) =
            IdentityService::resolve(&db, provider_principal(&[("email", "gal@gmail.com")]))
                .await
                .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(roles, vec!["user".to_string()]);

        // Lookup + role fetch only: no user row and no board were created
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn provider_login_provisions_user_role_and_onboarding_board() {
        let created = stored_user(9, "new@gmail.com", "new@gmail.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // 1. find_by_email -> none
            .append_query_results([Vec::<user::Model>::new()])
            // 2. username collision check -> free
            .append_query_results([Vec::<user::Model>::new()])
            // 3. insert user
            .append_query_results([vec![created.clone()]])
            // 4. default role lookup
            .append_query_results([vec![role::Model {
                id: 2,
                name: "user".to_string(),
                description: None,
            }]])
            // 5. role link insert
            .append_query_results([vec![user_role::Model {
                user_id: 9,
                role_id: 2,
            }]])
            // 6. onboarding board insert
            .append_query_results([vec![board::Model {
                id: 1,
                name: ONBOARDING_BOARD_NAME.to_string(),
                owner_id: Some(9),
                created_at: Utc::now(),
            }]])
            .into_connection();

        let (user, roles) =
            IdentityService::resolve(&db, provider_principal(&[("email", "new@gmail.com")]))
                .await
                .unwrap();

        assert_eq!(user.username, "new@gmail.com");
        assert_eq!(roles, vec!["user".to_string()]);
    }

    #[test]
    fn fallback_username_uses_local_part_and_suffix() {
        let name = IdentityService::fallback_username("gal@gmail.com");
        assert!(name.starts_with("gal_"));
        assert_eq!(name.len(), "gal_".len() + 4);
    }
}
