use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use serde::Serialize;
use service::{Envelope, ServiceError};
use thiserror::Error;
use tracing::{error, warn};

/// Serializes an envelope as the body, with its code as the HTTP status.
#[derive(Debug)]
pub struct EnvelopeResponse<T>(pub Envelope<T>);

impl<T: Serialize> IntoResponse for EnvelopeResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

impl<T> From<Envelope<T>> for EnvelopeResponse<T> {
    fn from(env: Envelope<T>) -> Self { Self(env) }
}

/// Failures that never became an envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("request cancelled")]
    Cancelled,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Cancelled => ApiError::Cancelled,
            ServiceError::Auth(auth) => {
                error!(code = auth.code(), error = %auth, "auth failure");
                ApiError::Internal(auth.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status != StatusCode::INTERNAL_SERVER_ERROR {
            warn!(%status, "request refused");
        }
        // 内部错误细节只进日志，不回给调用方
        let message = match self {
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type ApiResult<T> = Result<EnvelopeResponse<T>, ApiError>;
