use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeZoneInput {
    pub name: String,
    pub desks: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingZoneInput {
    pub name: String,
    pub spaces: i32,
}

/// Create-or-update request. A nil `id` means create. `creator_id` is never
/// read from the request body; the caller fills it from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManageOfficeInput {
    #[serde(default)]
    pub id: Uuid,
    pub address: String,
    pub post_code: String,
    #[serde(default)]
    pub office_map_url: Option<String>,
    pub city: String,
    #[serde(default)]
    pub office_zones: Vec<OfficeZoneInput>,
    #[serde(default)]
    pub parking_zones: Vec<ParkingZoneInput>,
    #[serde(skip)]
    pub creator_id: Uuid,
}

impl ManageOfficeInput {
    pub fn is_create(&self) -> bool { self.id.is_nil() }
}
