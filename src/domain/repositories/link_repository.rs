//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for managing short links.
///
/// Uniqueness of `code` and atomicity of click increments are the
/// responsibility of the implementation's storage layer, not of callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a new link with zero clicks.
    ///
    /// Must be atomic with respect to concurrent inserts of the same code:
    /// exactly one of them succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeAlreadyExists`] if the code is already taken.
    /// Returns [`AppError::Storage`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Increments `total_clicks` by one and sets `last_clicked_at = at`
    /// in a single storage operation.
    ///
    /// Returns the updated link, or `Ok(None)` if the code no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn increment_clicks(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError>;

    /// Deletes a link.
    ///
    /// Returns `Ok(true)` if the link was found and deleted, `Ok(false)` if
    /// it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Lists every link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Verifies the storage backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Releases the storage backend. Called once at shutdown.
    async fn close(&self);
}
