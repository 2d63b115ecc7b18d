use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use service::auth::domain::AuthUser;
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

/// The authenticated caller, placed in request extensions by
/// [`require_bearer_token_state`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

/// An authenticated caller with office-management rights.
#[derive(Debug, Clone)]
pub struct Receptionist(pub AuthUser);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or(ApiError::Unauthorized)
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Receptionist {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_receptionist {
            warn!(user = %user.user_name, "receptionist role required");
            return Err(ApiError::Unauthorized);
        }
        Ok(Receptionist(user))
    }
}

/// Routes reachable without a session.
fn is_public(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS || path == "/health" || path.starts_with("/api-docs") {
        return true;
    }
    match *method {
        Method::POST => path == "/api/users" || path == "/api/users/login",
        Method::GET => path == "/api/countries" || path == "/api/cities",
        _ => false,
    }
}

/// `Authorization: Bearer <token>`, falling back to the `auth_token` cookie.
fn session_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let raw = value.to_str().map_err(|_| ApiError::Unauthorized)?;
        return match raw.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
            _ => {
                warn!("invalid Authorization format (expect Bearer)");
                Err(ApiError::Unauthorized)
            }
        };
    }
    let jar = CookieJar::from_headers(headers);
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|v| !v.is_empty()))
}

/// 全局中间件：除白名单外，校验会话令牌并把当前用户放进请求扩展
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(token) = session_token(req.headers())? else {
        warn!(path = %req.uri().path(), "missing Authorization header and auth_token cookie");
        return Err(ApiError::Unauthorized);
    };
    let Some(user) = state.auth.authenticate(&token, &state.request_token()).await? else {
        warn!(path = %req.uri().path(), "session token refused");
        return Err(ApiError::Unauthorized);
    };
    debug!(user = %user.user_name, "authenticated");
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn whitelist_is_method_aware() {
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::POST, "/api/users/login"));
        assert!(is_public(&Method::GET, "/api/cities"));
        assert!(!is_public(&Method::POST, "/api/cities"));
        assert!(!is_public(&Method::GET, "/api/offices"));
        assert!(is_public(&Method::OPTIONS, "/api/offices"));
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token=xyz"));
        assert_eq!(session_token(&headers).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn cookie_is_used_without_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token=xyz"));
        assert_eq!(session_token(&headers).unwrap().as_deref(), Some("xyz"));
        assert!(session_token(&HeaderMap::new()).unwrap().is_none());
    }

    #[test]
    fn non_bearer_scheme_is_refused() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(session_token(&headers).is_err());
    }
}
