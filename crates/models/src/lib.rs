//! SeaORM entities for the booking schema plus connection helpers.
//!
//! Entities are passive rows; business rules live in the `service` crate.

pub mod errors;
pub mod db;
pub mod country;
pub mod city;
pub mod app_user;
pub mod office;
pub mod office_zone;
pub mod parking_zone;
pub mod reservation;

#[cfg(test)]
mod tests;
