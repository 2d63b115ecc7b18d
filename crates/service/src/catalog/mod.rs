//! Countries and cities: the lookup tables offices are located in.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CatalogService;
