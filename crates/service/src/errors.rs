use models::errors::ModelError;
use thiserror::Error;
use tracing::error;

use crate::auth::errors::AuthError;
use crate::envelope::Envelope;

/// Failures that do not fit into a response envelope.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Db(String),
    #[error("operation was cancelled")]
    Cancelled,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

impl ServiceError {
    /// A failed write becomes a 400 envelope carrying `message`; cancellation
    /// is passed through untouched.
    pub(crate) fn into_save_failure<T>(self, message: &str) -> Result<Envelope<T>, ServiceError> {
        match self {
            ServiceError::Cancelled => Err(ServiceError::Cancelled),
            other => {
                error!(error = %other, "persist failed");
                Ok(Envelope::bad_request([message]))
            }
        }
    }
}
