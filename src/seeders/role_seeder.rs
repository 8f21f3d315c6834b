use sea_orm::*;

use crate::entities::{role, role::Entity as Role};

pub async fn seed_roles(db: &DatabaseConnection) -> Result<(), DbErr> {
    let roles = vec![
        ("admin", "Administrator with elevated access"),
        ("user", "Regular user, granted to every new account"),
    ];

    for (name, desc) in roles {
        let exists = Role::find()
            .filter(role::Column::Name.eq(name))
            .one(db)
            .await?;

        if exists.is_none() {
            let new_role = role::ActiveModel {
                name: Set(name.to_string()),
                description: Set(Some(desc.to_string())),
                ..Default::default()
            };
            new_role.insert(db).await?;
            println!("✅ Seeded role: {}", name);
        }
    }

    Ok(())
}
