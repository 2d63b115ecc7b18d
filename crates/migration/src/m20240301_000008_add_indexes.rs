use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Office: address is unique across all offices
        manager
            .create_index(
                Index::create()
                    .name("uniq_office_address")
                    .table(Office::Table)
                    .col(Office::Address)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // City: one name per country
        manager
            .create_index(
                Index::create()
                    .name("uniq_city_name_country")
                    .table(City::Table)
                    .col(City::Name)
                    .col(City::CountryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Zones: lookups by office
        manager
            .create_index(
                Index::create()
                    .name("idx_office_zone_office")
                    .table(OfficeZone::Table)
                    .col(OfficeZone::OfficeId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_parking_zone_office")
                    .table(ParkingZone::Table)
                    .col(ParkingZone::OfficeId)
                    .to_owned(),
            )
            .await?;

        // Reservation: a desk is booked at most once per zone and day
        manager
            .create_index(
                Index::create()
                    .name("uniq_reservation_slot")
                    .table(Reservation::Table)
                    .col(Reservation::OfficeId)
                    .col(Reservation::OfficeZoneId)
                    .col(Reservation::OfficeDesk)
                    .col(Reservation::Day)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_user")
                    .table(Reservation::Table)
                    .col(Reservation::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_office_address").table(Office::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_city_name_country").table(City::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_office_zone_office").table(OfficeZone::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parking_zone_office").table(ParkingZone::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_reservation_slot").table(Reservation::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reservation_user").table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Office { Table, Address }

#[derive(DeriveIden)]
enum City { Table, Name, CountryId }

#[derive(DeriveIden)]
enum OfficeZone { Table, OfficeId }

#[derive(DeriveIden)]
enum ParkingZone { Table, OfficeId }

#[derive(DeriveIden)]
enum Reservation { Table, OfficeId, OfficeZoneId, OfficeDesk, Day, UserId }
