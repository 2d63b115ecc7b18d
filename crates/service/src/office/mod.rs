//! Office admission: validation, creator-only edits, zone reconciliation.

pub mod domain;
pub mod reconcile;
pub mod repository;
pub mod service;
pub mod validation;

pub use service::OfficeService;
