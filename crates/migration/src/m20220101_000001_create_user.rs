//! Create `user` table.
//!
//! Internal key is a UUID; `public_id` is the externally visible identifier
//! and `email` carries the uniqueness invariant for registration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::PublicId, 64).unique_key().not_null())
                    .col(string_len(User::FirstName, 64).not_null())
                    .col(string_len(User::LastName, 64).not_null())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    // Explicitly nullable: cleared once verification completes
                    .col(
                        ColumnDef::new(User::EmailVerificationToken)
                            .string_len(64)
                            .null(),
                    )
                    .col(boolean(User::EmailVerificationStatus).not_null().default(false))
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    PublicId,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    EmailVerificationToken,
    EmailVerificationStatus,
    CreatedAt,
    UpdatedAt,
}
