use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create-or-update request. A nil `id` means create; `user_id` comes from
/// the session, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManageReservationInput {
    #[serde(default)]
    pub id: Uuid,
    pub office_id: Uuid,
    pub office_zone_id: Uuid,
    #[serde(default)]
    pub parking_zone_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub office_desk: String,
    #[serde(default)]
    pub parking_space: Option<String>,
    #[serde(skip)]
    pub user_id: Uuid,
}

impl ManageReservationInput {
    pub fn is_create(&self) -> bool { self.id.is_nil() }
}

/// Outcome of the atomic occupancy check plus insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Inserted,
    Occupied,
}
