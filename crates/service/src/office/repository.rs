use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{City, Country, LocatedOffice, Office};
use crate::errors::ServiceError;

/// Persistence seam for office admission.
#[async_trait]
pub trait OfficeRepository: Send + Sync {
    /// First city with exactly this name, with its country.
    async fn locate_city(&self, name: &str) -> Result<Option<(City, Country)>, ServiceError>;
    /// Whether another office (not `except`) already uses `address`.
    async fn address_taken(&self, address: &str, except: Option<Uuid>) -> Result<bool, ServiceError>;
    async fn find_office(&self, id: Uuid) -> Result<Option<LocatedOffice>, ServiceError>;
    async fn list_offices(&self) -> Result<Vec<LocatedOffice>, ServiceError>;
    /// Stores the office and its zones atomically.
    async fn insert_office(&self, office: &Office) -> Result<(), ServiceError>;
    /// Overwrites the office row and replaces its zones with `office`'s zone
    /// lists: matching ids are updated, new ids inserted, missing ones deleted
    /// together with the reservations that point at them.
    async fn update_office(&self, office: &Office) -> Result<(), ServiceError>;
    /// Removes the zones, then the office; reservations go with them.
    async fn delete_office(&self, id: Uuid) -> Result<(), ServiceError>;
}
