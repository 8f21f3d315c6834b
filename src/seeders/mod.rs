pub mod role_seeder;
pub mod user_seeder;

use sea_orm::DatabaseConnection;

pub async fn run_seeders(db: &DatabaseConnection) -> Result<(), String> {
    // Roles first: the admin user links against them
    role_seeder::seed_roles(db).await.map_err(|e| e.to_string())?;

    user_seeder::seed_admin_user(db).await?;

    Ok(())
}
