//! Migrator registering the booking schema in dependency order:
//! country → city → app_user → office → zones → reservation.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_country;
mod m20240301_000002_create_city;
mod m20240301_000003_create_app_user;
mod m20240301_000004_create_office;
mod m20240301_000005_create_office_zone;
mod m20240301_000006_create_parking_zone;
mod m20240301_000007_create_reservation;
mod m20240301_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_country::Migration),
            Box::new(m20240301_000002_create_city::Migration),
            Box::new(m20240301_000003_create_app_user::Migration),
            Box::new(m20240301_000004_create_office::Migration),
            Box::new(m20240301_000005_create_office_zone::Migration),
            Box::new(m20240301_000006_create_parking_zone::Migration),
            Box::new(m20240301_000007_create_reservation::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000008_add_indexes::Migration),
        ]
    }
}
