use axum::extract::{Path, State};
use axum::Json;
use service::office::domain::ManageOfficeInput;
use service::views::OfficeModel;
use uuid::Uuid;

use crate::auth::{CurrentUser, Receptionist};
use crate::errors::ApiResult;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/offices", tag = "offices", responses((status = 200, description = "All offices")))]
pub async fn list(State(state): State<ServerState>, CurrentUser(_user): CurrentUser) -> ApiResult<Vec<OfficeModel>> {
    Ok(state.offices.list(&state.request_token()).await?.into())
}

#[utoipa::path(get, path = "/api/offices/{id}", tag = "offices", params(("id" = Uuid, Path, description = "Office id")),
    responses((status = 200, description = "Office"), (status = 404, description = "Not found", body = crate::openapi::ErrorEnvelope)))]
pub async fn get(
    State(state): State<ServerState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<OfficeModel> {
    Ok(state.offices.get(id, &state.request_token()).await?.into())
}

#[utoipa::path(post, path = "/api/offices", tag = "offices", request_body = crate::openapi::ManageOfficeRequest,
    responses((status = 200, description = "Created"), (status = 400, description = "Rejected", body = crate::openapi::ErrorEnvelope), (status = 401, description = "Receptionist role required")))]
pub async fn create(
    State(state): State<ServerState>,
    Receptionist(user): Receptionist,
    Json(mut input): Json<ManageOfficeInput>,
) -> ApiResult<OfficeModel> {
    input.id = Uuid::nil();
    input.creator_id = user.id;
    Ok(state.offices.upsert(input, &state.request_token()).await?.into())
}

#[utoipa::path(put, path = "/api/offices/{id}", tag = "offices", params(("id" = Uuid, Path, description = "Office id")), request_body = crate::openapi::ManageOfficeRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Rejected", body = crate::openapi::ErrorEnvelope), (status = 403, description = "Not the creator", body = crate::openapi::ErrorEnvelope), (status = 404, description = "Not found", body = crate::openapi::ErrorEnvelope)))]
pub async fn update(
    State(state): State<ServerState>,
    Receptionist(user): Receptionist,
    Path(id): Path<Uuid>,
    Json(mut input): Json<ManageOfficeInput>,
) -> ApiResult<OfficeModel> {
    input.id = id;
    input.creator_id = user.id;
    Ok(state.offices.upsert(input, &state.request_token()).await?.into())
}

#[utoipa::path(delete, path = "/api/offices/{id}", tag = "offices", params(("id" = Uuid, Path, description = "Office id")),
    responses((status = 200, description = "Deleted"), (status = 400, description = "Not the creator", body = crate::openapi::ErrorEnvelope), (status = 404, description = "Not found", body = crate::openapi::ErrorEnvelope)))]
pub async fn delete(
    State(state): State<ServerState>,
    Receptionist(user): Receptionist,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    Ok(state.offices.delete(id, user.id, &state.request_token()).await?.into())
}
