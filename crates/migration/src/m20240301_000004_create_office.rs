//! Create `office` table with FKs to `city` and the creating `app_user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Office::Table)
                    .if_not_exists()
                    .col(uuid(Office::Id).primary_key())
                    .col(string_len(Office::Address, 255).not_null())
                    .col(string_len(Office::PostCode, 32).not_null())
                    .col(
                        ColumnDef::new(Office::OfficeMapUrl)
                            .string_len(1024)
                            .null(),
                    )
                    .col(uuid(Office::CityId).not_null())
                    .col(uuid(Office::CreatorId).not_null())
                    .col(timestamp_with_time_zone(Office::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Office::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_office_city")
                            .from(Office::Table, Office::CityId)
                            .to(City::Table, City::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_office_creator")
                            .from(Office::Table, Office::CreatorId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Office::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Office { Table, Id, Address, PostCode, OfficeMapUrl, CityId, CreatorId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum City { Table, Id }

#[derive(DeriveIden)]
enum AppUser { Table, Id }
