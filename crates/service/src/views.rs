//! Response shapes. Built from entities after a successful admission or lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{City, Country, LocatedOffice, OfficeZone, ParkingZone, Reservation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryModel {
    pub id: Uuid,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityModel {
    pub id: Uuid,
    pub name: String,
    pub country: CountryModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeZoneModel {
    pub id: Uuid,
    pub name: String,
    pub desks: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingZoneModel {
    pub id: Uuid,
    pub name: String,
    pub spaces: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeModel {
    pub id: Uuid,
    pub address: String,
    pub post_code: String,
    pub office_map_url: Option<String>,
    pub city: CityModel,
    pub office_zones: Vec<OfficeZoneModel>,
    pub parking_zones: Vec<ParkingZoneModel>,
    pub creator_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationModel {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub office: OfficeModel,
    pub office_zone: OfficeZoneModel,
    pub office_desk: String,
    pub parking_zone: Option<ParkingZoneModel>,
    pub parking_space: Option<String>,
    pub user_id: Uuid,
}

impl From<&Country> for CountryModel {
    fn from(c: &Country) -> Self {
        Self { id: c.id, name: c.name.clone(), symbol: c.symbol.clone() }
    }
}

impl CityModel {
    pub fn new(city: &City, country: &Country) -> Self {
        Self { id: city.id, name: city.name.clone(), country: country.into() }
    }
}

impl From<&OfficeZone> for OfficeZoneModel {
    fn from(z: &OfficeZone) -> Self {
        Self { id: z.id, name: z.name.clone(), desks: z.desks }
    }
}

impl From<&ParkingZone> for ParkingZoneModel {
    fn from(z: &ParkingZone) -> Self {
        Self { id: z.id, name: z.name.clone(), spaces: z.spaces }
    }
}

impl From<&LocatedOffice> for OfficeModel {
    fn from(l: &LocatedOffice) -> Self {
        let o = &l.office;
        Self {
            id: o.id,
            address: o.address.clone(),
            post_code: o.post_code.clone(),
            office_map_url: o.office_map_url.clone(),
            city: CityModel::new(&l.city, &l.country),
            office_zones: o.office_zones.iter().map(Into::into).collect(),
            parking_zones: o.parking_zones.iter().map(Into::into).collect(),
            creator_id: o.creator_id,
        }
    }
}

impl ReservationModel {
    pub fn assemble(
        r: &Reservation,
        office: &LocatedOffice,
        zone: &OfficeZone,
        parking_zone: Option<&ParkingZone>,
    ) -> Self {
        Self {
            id: r.id,
            date: r.date,
            office: office.into(),
            office_zone: zone.into(),
            office_desk: r.office_desk.clone(),
            parking_zone: parking_zone.map(Into::into),
            parking_space: r.parking_space.clone(),
            user_id: r.user_id,
        }
    }
}
