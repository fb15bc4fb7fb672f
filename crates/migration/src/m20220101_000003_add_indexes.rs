use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Address: index on user_id for per-user lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_address_user")
                    .table(Address::Table)
                    .col(Address::UserId)
                    .to_owned(),
            )
            .await?;

        // Users: index on verification token for token lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_user_verification_token")
                    .table(User::Table)
                    .col(User::EmailVerificationToken)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_address_user").table(Address::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_verification_token")
                    .table(User::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Address { Table, UserId }

#[derive(DeriveIden)]
enum User { Table, EmailVerificationToken }
