//! Postgres-backed store over the `models` entities.

mod catalog;
mod identity;
mod office;
mod reservation;

use chrono::Utc;
use models::{app_user, city, country, office as office_row, office_zone, parking_zone, reservation as reservation_row};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr};

use crate::entities::{City, Country, LocatedOffice, Office, OfficeZone, ParkingZone, Reservation, User};

pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub fn connection(&self) -> &DatabaseConnection { &self.db }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Loads zones, city and country for an office row. `None` if the city or
/// country row is gone.
pub(crate) async fn locate<C: ConnectionTrait>(conn: &C, row: office_row::Model) -> Result<Option<LocatedOffice>, DbErr> {
    let Some((city, Some(country))) = city::Entity::find_by_id(row.city_id)
        .find_also_related(country::Entity)
        .one(conn)
        .await?
    else {
        return Ok(None);
    };
    let office_zones = office_zone::Entity::find()
        .filter(office_zone::Column::OfficeId.eq(row.id))
        .order_by_asc(office_zone::Column::Name)
        .all(conn)
        .await?;
    let parking_zones = parking_zone::Entity::find()
        .filter(parking_zone::Column::OfficeId.eq(row.id))
        .order_by_asc(parking_zone::Column::Name)
        .all(conn)
        .await?;
    Ok(Some(LocatedOffice {
        office: Office {
            id: row.id,
            address: row.address,
            post_code: row.post_code,
            office_map_url: row.office_map_url,
            city_id: row.city_id,
            creator_id: row.creator_id,
            office_zones: office_zones.into_iter().map(Into::into).collect(),
            parking_zones: parking_zones.into_iter().map(Into::into).collect(),
        },
        city: city.into(),
        country: country.into(),
    }))
}

impl From<country::Model> for Country {
    fn from(m: country::Model) -> Self {
        Self { id: m.id, name: m.name, symbol: m.symbol }
    }
}

impl From<city::Model> for City {
    fn from(m: city::Model) -> Self {
        Self { id: m.id, name: m.name, country_id: m.country_id }
    }
}

impl From<office_zone::Model> for OfficeZone {
    fn from(m: office_zone::Model) -> Self {
        Self { id: m.id, name: m.name, desks: m.desks, office_id: m.office_id }
    }
}

impl From<parking_zone::Model> for ParkingZone {
    fn from(m: parking_zone::Model) -> Self {
        Self { id: m.id, name: m.name, spaces: m.spaces, office_id: m.office_id }
    }
}

impl From<reservation_row::Model> for Reservation {
    fn from(m: reservation_row::Model) -> Self {
        Self {
            id: m.id,
            date: m.date.with_timezone(&Utc),
            office_id: m.office_id,
            office_zone_id: m.office_zone_id,
            office_desk: m.office_desk,
            parking_zone_id: m.parking_zone_id,
            parking_space: m.parking_space,
            user_id: m.user_id,
        }
    }
}

impl From<app_user::Model> for User {
    fn from(m: app_user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            user_name: m.user_name,
            full_name: m.full_name,
            phone_number: m.phone_number,
            password_hash: m.password_hash,
            is_receptionist: m.is_receptionist,
        }
    }
}
