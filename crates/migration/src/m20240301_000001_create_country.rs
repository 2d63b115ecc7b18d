//! Create `country` table. Countries are created lazily with their first city.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Country::Table)
                    .if_not_exists()
                    .col(uuid(Country::Id).primary_key())
                    .col(string_len(Country::Name, 128).unique_key().not_null())
                    .col(string_len(Country::Symbol, 8).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Country::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Country { Table, Id, Name, Symbol }
