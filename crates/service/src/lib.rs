//! Booking business layer: admission rules for offices, reservations and
//! identities, independent of the web framework.
//!
//! Every operation answers with an [`Envelope`]; `Err(ServiceError)` is kept
//! for cancellation and for infrastructure failures the caller cannot fix.

pub mod auth;
pub mod cancel;
pub mod catalog;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod office;
pub mod reservation;
pub mod storage;
pub mod views;

pub use envelope::Envelope;
pub use errors::ServiceError;
