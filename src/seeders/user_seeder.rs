use chrono::Utc;
use sea_orm::*;

use crate::config::Config;
use crate::entities::{role, user, user_role};
use crate::services::auth_service::AuthService;

// The protected "admin" account; deletion of this user is refused everywhere
pub async fn seed_admin_user(db: &DatabaseConnection) -> Result<(), String> {
    let username = "admin";
    let email = "admin@ohmyimage.dev";

    let exists = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(|e| e.to_string())?;

    if exists.is_none() {
        println!("🚀 Creating admin user...");

        let cfg = Config::init();
        let hashed_password =
            AuthService::hash_password(cfg.admin_password).map_err(|e| e.to_string())?;

        let txn = db.begin().await.map_err(|e| e.to_string())?;

        let new_user = user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(hashed_password),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let user_model = new_user.insert(&txn).await.map_err(|e| e.to_string())?;

        let role_admin = role::Entity::find()
            .filter(role::Column::Name.eq("admin"))
            .one(&txn)
            .await
            .map_err(|e| e.to_string())?
            .ok_or("Role 'admin' not found")?;

        let link = user_role::ActiveModel {
            user_id: Set(user_model.id),
            role_id: Set(role_admin.id),
        };
        link.insert(&txn).await.map_err(|e| e.to_string())?;

        txn.commit().await.map_err(|e| e.to_string())?;
        println!("✅ Admin user created! (username: {})", username);
    }

    Ok(())
}
