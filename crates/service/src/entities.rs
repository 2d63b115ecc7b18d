//! Domain records shared by the admission services and the stores.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfficeZone {
    pub id: Uuid,
    pub name: String,
    pub desks: i32,
    pub office_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParkingZone {
    pub id: Uuid,
    pub name: String,
    pub spaces: i32,
    pub office_id: Uuid,
}

/// An office together with the zones it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub id: Uuid,
    pub address: String,
    pub post_code: String,
    pub office_map_url: Option<String>,
    pub city_id: Uuid,
    pub creator_id: Uuid,
    pub office_zones: Vec<OfficeZone>,
    pub parking_zones: Vec<ParkingZone>,
}

/// Office plus the city and country it sits in, as needed for responses.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedOffice {
    pub office: Office,
    pub city: City,
    pub country: Country,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub office_id: Uuid,
    pub office_zone_id: Uuid,
    pub office_desk: String,
    pub parking_zone_id: Option<Uuid>,
    pub parking_space: Option<String>,
    pub user_id: Uuid,
}

impl Reservation {
    /// Occupancy is decided per calendar day, not per instant.
    pub fn day(&self) -> NaiveDate {
        models::reservation::day_of(self.date)
    }
}

#[derive(Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub full_name: String,
    pub phone_number: String,
    pub password_hash: String,
    pub is_receptionist: bool,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("user_name", &self.user_name)
            .field("is_receptionist", &self.is_receptionist)
            .finish_non_exhaustive()
    }
}
