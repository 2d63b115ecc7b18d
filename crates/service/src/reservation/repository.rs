use async_trait::async_trait;
use uuid::Uuid;

use super::conflict::ConflictRule;
use super::domain::Admission;
use crate::entities::{LocatedOffice, OfficeZone, ParkingZone, Reservation};
use crate::errors::ServiceError;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn load_office(&self, id: Uuid) -> Result<Option<LocatedOffice>, ServiceError>;
    async fn load_office_zone(&self, id: Uuid) -> Result<Option<OfficeZone>, ServiceError>;
    async fn load_parking_zone(&self, id: Uuid) -> Result<Option<ParkingZone>, ServiceError>;
    async fn load_reservation(&self, id: Uuid) -> Result<Option<Reservation>, ServiceError>;
    async fn reservations_of(&self, user_id: Uuid) -> Result<Vec<Reservation>, ServiceError>;
    /// Inserts `reservation` unless a stored one conflicts under `rule`. The
    /// check and the insert are one atomic step.
    async fn insert_if_vacant(&self, reservation: &Reservation, rule: ConflictRule) -> Result<Admission, ServiceError>;
    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), ServiceError>;
    async fn delete_reservation(&self, id: Uuid) -> Result<(), ServiceError>;
}
