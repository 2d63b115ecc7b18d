use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use service::auth::domain::{LoginInput, RegisterInput};

use crate::auth::AUTH_COOKIE;
use crate::errors::{ApiError, ApiResult, EnvelopeResponse};
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/users", tag = "users", request_body = crate::openapi::RegisterRequest,
    responses((status = 200, description = "Registered; data is the session token", body = crate::openapi::TokenEnvelope), (status = 400, description = "Rejected", body = crate::openapi::ErrorEnvelope)))]
pub async fn register(State(state): State<ServerState>, Json(input): Json<RegisterInput>) -> ApiResult<String> {
    Ok(state.auth.register(input, &state.request_token()).await?.into())
}

#[utoipa::path(post, path = "/api/users/login", tag = "users", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in; also sets the auth_token cookie", body = crate::openapi::TokenEnvelope), (status = 400, description = "Rejected", body = crate::openapi::ErrorEnvelope)))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, EnvelopeResponse<String>), ApiError> {
    let env = state.auth.login(input, &state.request_token()).await?;
    let jar = match &env.data {
        Some(token) => {
            let mut cookie = Cookie::new(AUTH_COOKIE, token.clone());
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookie.set_same_site(SameSite::Lax);
            jar.add(cookie)
        }
        None => jar,
    };
    Ok((jar, env.into()))
}
