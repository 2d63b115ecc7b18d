//! Create `app_user` table.
//!
//! Holds identities together with the argon2 password hash and the
//! receptionist flag that gates office management.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(uuid(AppUser::Id).primary_key())
                    .col(string_len(AppUser::Email, 255).unique_key().not_null())
                    .col(string_len(AppUser::UserName, 128).unique_key().not_null())
                    .col(string_len(AppUser::FullName, 255).not_null())
                    .col(string_len(AppUser::PhoneNumber, 32).not_null())
                    .col(string_len(AppUser::PasswordHash, 255).not_null())
                    .col(boolean(AppUser::IsReceptionist).not_null())
                    .col(timestamp_with_time_zone(AppUser::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AppUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AppUser { Table, Id, Email, UserName, FullName, PhoneNumber, PasswordHash, IsReceptionist, CreatedAt }
