//! Create `parking_zone` table; same lifecycle as `office_zone`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingZone::Table)
                    .if_not_exists()
                    .col(uuid(ParkingZone::Id).primary_key())
                    .col(string_len(ParkingZone::Name, 128).not_null())
                    .col(integer(ParkingZone::Spaces).not_null())
                    .col(uuid(ParkingZone::OfficeId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_zone_office")
                            .from(ParkingZone::Table, ParkingZone::OfficeId)
                            .to(Office::Table, Office::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ParkingZone::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ParkingZone { Table, Id, Name, Spaces, OfficeId }

#[derive(DeriveIden)]
enum Office { Table, Id }
