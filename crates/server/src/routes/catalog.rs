use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use service::catalog::domain::CreateCityInput;
use service::views::{CityModel, CountryModel};

use crate::auth::Receptionist;
use crate::errors::ApiResult;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CityFilter {
    /// Only cities of this country.
    pub country: Option<String>,
}

#[utoipa::path(get, path = "/api/countries", tag = "catalog", responses((status = 200, description = "All countries")))]
pub async fn list_countries(State(state): State<ServerState>) -> ApiResult<Vec<CountryModel>> {
    Ok(state.catalog.countries(&state.request_token()).await?.into())
}

#[utoipa::path(get, path = "/api/cities", tag = "catalog", params(CityFilter), responses((status = 200, description = "Cities with their country")))]
pub async fn list_cities(State(state): State<ServerState>, Query(filter): Query<CityFilter>) -> ApiResult<Vec<CityModel>> {
    Ok(state.catalog.cities(filter.country.as_deref(), &state.request_token()).await?.into())
}

#[utoipa::path(post, path = "/api/cities", tag = "catalog", request_body = crate::openapi::CreateCityRequest,
    responses((status = 200, description = "Created"), (status = 400, description = "Rejected", body = crate::openapi::ErrorEnvelope), (status = 401, description = "Receptionist role required")))]
pub async fn create_city(
    State(state): State<ServerState>,
    Receptionist(_user): Receptionist,
    Json(input): Json<CreateCityInput>,
) -> ApiResult<CityModel> {
    Ok(state.catalog.create_city(input, &state.request_token()).await?.into())
}
