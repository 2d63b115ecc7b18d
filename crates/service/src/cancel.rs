//! Cooperative cancellation for store calls.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::errors::ServiceError;

/// Runs `fut` unless `token` fires first. A token that is already cancelled
/// wins before the future is polled, so no store work starts.
pub async fn guarded<F, T, E>(token: &CancellationToken, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<ServiceError>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ServiceError::Cancelled),
        res = fut => res.map_err(Into::into),
    }
}
