use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Users
        manager.create_table(
            Table::create()
                .table(Users::Table)
                .if_not_exists()
                .col(ColumnDef::new(Users::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                .col(ColumnDef::new(Users::Email).string().not_null())
                .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .to_owned(),
        ).await?;

        // 2. Roles
        manager.create_table(
            Table::create()
                .table(Roles::Table)
                .if_not_exists()
                .col(ColumnDef::new(Roles::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                .col(ColumnDef::new(Roles::Description).string().null())
                .to_owned(),
        ).await?;

        // 3. User <-> Role link
        manager.create_table(
            Table::create()
                .table(UserRoles::Table)
                .if_not_exists()
                .col(ColumnDef::new(UserRoles::UserId).big_integer().not_null())
                .col(ColumnDef::new(UserRoles::RoleId).big_integer().not_null())
                .primary_key(
                    Index::create()
                        .name("pk_user_roles")
                        .col(UserRoles::UserId)
                        .col(UserRoles::RoleId),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_roles_user_id")
                        .from(UserRoles::Table, UserRoles::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_roles_role_id")
                        .from(UserRoles::Table, UserRoles::RoleId)
                        .to(Roles::Table, Roles::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // 4. Boards (owner survives user deletion: SET NULL)
        manager.create_table(
            Table::create()
                .table(Boards::Table)
                .if_not_exists()
                .col(ColumnDef::new(Boards::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Boards::Name).string().not_null())
                .col(ColumnDef::new(Boards::OwnerId).big_integer().null())
                .col(ColumnDef::new(Boards::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_boards_owner_id")
                        .from(Boards::Table, Boards::OwnerId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .to_owned(),
        ).await?;

        // 5. Pins (owner SET NULL; board SET NULL so deleting a board never
        // deletes its pins, it only drops the association)
        manager.create_table(
            Table::create()
                .table(Pins::Table)
                .if_not_exists()
                .col(ColumnDef::new(Pins::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Pins::Title).string().not_null())
                .col(ColumnDef::new(Pins::Description).text().null())
                .col(ColumnDef::new(Pins::ImageData).binary().not_null())
                .col(ColumnDef::new(Pins::OwnerId).big_integer().null())
                .col(ColumnDef::new(Pins::BoardId).big_integer().null())
                .col(ColumnDef::new(Pins::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pins_owner_id")
                        .from(Pins::Table, Pins::OwnerId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_pins_board_id")
                        .from(Pins::Table, Pins::BoardId)
                        .to(Boards::Table, Boards::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .to_owned(),
        ).await?;

        // 6. Comments (author SET NULL; pin CASCADE: a comment has no
        // lifecycle independent of its pin)
        manager.create_table(
            Table::create()
                .table(Comments::Table)
                .if_not_exists()
                .col(ColumnDef::new(Comments::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Comments::Text).text().not_null())
                .col(ColumnDef::new(Comments::UserId).big_integer().null())
                .col(ColumnDef::new(Comments::PinId).big_integer().not_null())
                .col(ColumnDef::new(Comments::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_comments_user_id")
                        .from(Comments::Table, Comments::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::SetNull),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_comments_pin_id")
                        .from(Comments::Table, Comments::PinId)
                        .to(Pins::Table, Pins::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // 7. Password Reset Tokens
        manager.create_table(
            Table::create()
                .table(PasswordResetTokens::Table)
                .if_not_exists()
                .col(ColumnDef::new(PasswordResetTokens::Id).big_integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(PasswordResetTokens::UserId).big_integer().not_null())
                .col(ColumnDef::new(PasswordResetTokens::Token).string().not_null().unique_key())
                .col(ColumnDef::new(PasswordResetTokens::ExpiresAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(PasswordResetTokens::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_password_reset_user_id")
                        .from(PasswordResetTokens::Table, PasswordResetTokens::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // Lookup indexes for the ownership scans used by account deletion
        manager.create_index(
            Index::create()
                .name("idx_boards_owner_id")
                .table(Boards::Table)
                .col(Boards::OwnerId)
                .to_owned(),
        ).await?;
        manager.create_index(
            Index::create()
                .name("idx_pins_owner_id")
                .table(Pins::Table)
                .col(Pins::OwnerId)
                .to_owned(),
        ).await?;
        manager.create_index(
            Index::create()
                .name("idx_pins_board_id")
                .table(Pins::Table)
                .col(Pins::BoardId)
                .to_owned(),
        ).await?;
        manager.create_index(
            Index::create()
                .name("idx_comments_pin_id")
                .table(Comments::Table)
                .col(Comments::PinId)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PasswordResetTokens::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Comments::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Pins::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Boards::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(UserRoles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Roles::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    Description,
}

#[derive(Iden)]
enum UserRoles {
    Table,
    UserId,
    RoleId,
}

#[derive(Iden)]
enum Boards {
    Table,
    Id,
    Name,
    OwnerId,
    CreatedAt,
}

#[derive(Iden)]
enum Pins {
    Table,
    Id,
    Title,
    Description,
    ImageData,
    OwnerId,
    BoardId,
    CreatedAt,
}

#[derive(Iden)]
enum Comments {
    Table,
    Id,
    Text,
    UserId,
    PinId,
    CreatedAt,
}

#[derive(Iden)]
enum PasswordResetTokens {
    Table,
    Id,
    UserId,
    Token,
    ExpiresAt,
    CreatedAt,
}
