use axum::extract::{Path, State};
use axum::Json;
use service::reservation::domain::ManageReservationInput;
use service::views::ReservationModel;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::ApiResult;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/reservations", tag = "reservations", responses((status = 200, description = "The caller's reservations")))]
pub async fn list(State(state): State<ServerState>, CurrentUser(user): CurrentUser) -> ApiResult<Vec<ReservationModel>> {
    Ok(state.reservations.list_for_user(user.id, &state.request_token()).await?.into())
}

#[utoipa::path(get, path = "/api/reservations/{id}", tag = "reservations", params(("id" = Uuid, Path, description = "Reservation id")),
    responses((status = 200, description = "Reservation"), (status = 404, description = "Not found", body = crate::openapi::ErrorEnvelope)))]
pub async fn get(
    State(state): State<ServerState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ReservationModel> {
    Ok(state.reservations.get(id, &state.request_token()).await?.into())
}

#[utoipa::path(post, path = "/api/reservations", tag = "reservations", request_body = crate::openapi::ManageReservationRequest,
    responses((status = 200, description = "Booked"), (status = 400, description = "Rejected or seat taken", body = crate::openapi::ErrorEnvelope)))]
pub async fn create(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Json(mut input): Json<ManageReservationInput>,
) -> ApiResult<ReservationModel> {
    input.id = Uuid::nil();
    input.user_id = user.id;
    Ok(state.reservations.upsert(input, &state.request_token()).await?.into())
}

#[utoipa::path(put, path = "/api/reservations/{id}", tag = "reservations", params(("id" = Uuid, Path, description = "Reservation id")), request_body = crate::openapi::ManageReservationRequest,
    responses((status = 200, description = "Updated"), (status = 400, description = "Rejected", body = crate::openapi::ErrorEnvelope), (status = 403, description = "Not the owner", body = crate::openapi::ErrorEnvelope)))]
pub async fn update(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(mut input): Json<ManageReservationInput>,
) -> ApiResult<ReservationModel> {
    input.id = id;
    input.user_id = user.id;
    Ok(state.reservations.upsert(input, &state.request_token()).await?.into())
}

#[utoipa::path(delete, path = "/api/reservations/{id}", tag = "reservations", params(("id" = Uuid, Path, description = "Reservation id")),
    responses((status = 200, description = "Deleted"), (status = 400, description = "Not the owner", body = crate::openapi::ErrorEnvelope), (status = 404, description = "Not found", body = crate::openapi::ErrorEnvelope)))]
pub async fn delete(
    State(state): State<ServerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    Ok(state.reservations.delete(id, user.id, &state.request_token()).await?.into())
}
