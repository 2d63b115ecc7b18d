//! Create `office_zone` table; rows go away with their office.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OfficeZone::Table)
                    .if_not_exists()
                    .col(uuid(OfficeZone::Id).primary_key())
                    .col(string_len(OfficeZone::Name, 128).not_null())
                    .col(integer(OfficeZone::Desks).not_null())
                    .col(uuid(OfficeZone::OfficeId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_office_zone_office")
                            .from(OfficeZone::Table, OfficeZone::OfficeId)
                            .to(Office::Table, Office::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OfficeZone::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum OfficeZone { Table, Id, Name, Desks, OfficeId }

#[derive(DeriveIden)]
enum Office { Table, Id }
