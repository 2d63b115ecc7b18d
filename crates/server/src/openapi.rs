//! OpenAPI document. Request and envelope schemas are mirrored here so the
//! service crate stays free of documentation derives.

use chrono::{DateTime, Utc};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub user_name: String,
    pub phone_number: String,
    pub is_receptionist: bool,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct CountryRequest {
    pub name: String,
    pub symbol: String,
}

#[derive(ToSchema)]
pub struct CreateCityRequest {
    pub name: String,
    pub country: CountryRequest,
}

#[derive(ToSchema)]
pub struct OfficeZoneRequest {
    pub name: String,
    pub desks: i32,
}

#[derive(ToSchema)]
pub struct ParkingZoneRequest {
    pub name: String,
    pub spaces: i32,
}

#[derive(ToSchema)]
pub struct ManageOfficeRequest {
    pub address: String,
    pub post_code: String,
    pub office_map_url: Option<String>,
    /// City name; must already exist.
    pub city: String,
    pub office_zones: Vec<OfficeZoneRequest>,
    pub parking_zones: Vec<ParkingZoneRequest>,
}

#[derive(ToSchema)]
pub struct ManageReservationRequest {
    pub office_id: Uuid,
    pub office_zone_id: Uuid,
    pub parking_zone_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub office_desk: String,
    pub parking_space: Option<String>,
}

/// Envelope whose `data` is a session token.
#[derive(ToSchema)]
pub struct TokenEnvelope {
    pub code: u16,
    pub data: Option<String>,
    pub errors: Option<Vec<String>>,
}

/// Failed envelope: `data` is null and `errors` lists every violation.
#[derive(ToSchema)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub errors: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::catalog::list_countries,
        crate::routes::catalog::list_cities,
        crate::routes::catalog::create_city,
        crate::routes::offices::list,
        crate::routes::offices::get,
        crate::routes::offices::create,
        crate::routes::offices::update,
        crate::routes::offices::delete,
        crate::routes::reservations::list,
        crate::routes::reservations::get,
        crate::routes::reservations::create,
        crate::routes::reservations::update,
        crate::routes::reservations::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CountryRequest,
            CreateCityRequest,
            OfficeZoneRequest,
            ParkingZoneRequest,
            ManageOfficeRequest,
            ManageReservationRequest,
            TokenEnvelope,
            ErrorEnvelope,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "catalog"),
        (name = "offices"),
        (name = "reservations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_booking_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/api/offices/{id}", "/api/reservations", "/api/users/login", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
