//! Reservation admission: resolves the booked office and zones, refuses
//! occupied seats, and limits edits and deletes to the booking's owner.

pub mod conflict;
pub mod domain;
pub mod repository;
pub mod service;

pub use service::ReservationService;
