//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;

pub use link_service::LinkService;
pub use redirect_service::RedirectService;

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Default deadline for a single storage call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs one storage call under `deadline`.
///
/// On expiry the inner future is dropped, which aborts the in-flight query
/// and releases its pooled connection.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| AppError::Timeout)?
}
