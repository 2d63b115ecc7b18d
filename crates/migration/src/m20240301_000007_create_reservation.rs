//! Create `reservation` table.
//!
//! `day` stores the calendar day of `date` so that occupancy can be checked
//! (and uniquely indexed) with plain equality.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(uuid(Reservation::Id).primary_key())
                    .col(timestamp_with_time_zone(Reservation::Date).not_null())
                    .col(date(Reservation::Day).not_null())
                    .col(uuid(Reservation::OfficeId).not_null())
                    .col(uuid(Reservation::OfficeZoneId).not_null())
                    .col(string_len(Reservation::OfficeDesk, 64).not_null())
                    .col(ColumnDef::new(Reservation::ParkingZoneId).uuid().null())
                    .col(ColumnDef::new(Reservation::ParkingSpace).string_len(64).null())
                    .col(uuid(Reservation::UserId).not_null())
                    .col(timestamp_with_time_zone(Reservation::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_office")
                            .from(Reservation::Table, Reservation::OfficeId)
                            .to(Office::Table, Office::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_office_zone")
                            .from(Reservation::Table, Reservation::OfficeZoneId)
                            .to(OfficeZone::Table, OfficeZone::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_parking_zone")
                            .from(Reservation::Table, Reservation::ParkingZoneId)
                            .to(ParkingZone::Table, ParkingZone::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_user")
                            .from(Reservation::Table, Reservation::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reservation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reservation {
    Table,
    Id,
    Date,
    Day,
    OfficeId,
    OfficeZoneId,
    OfficeDesk,
    ParkingZoneId,
    ParkingSpace,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Office { Table, Id }

#[derive(DeriveIden)]
enum OfficeZone { Table, Id }

#[derive(DeriveIden)]
enum ParkingZone { Table, Id }

#[derive(DeriveIden)]
enum AppUser { Table, Id }
