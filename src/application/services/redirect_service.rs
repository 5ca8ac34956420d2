//! Redirect resolution and click statistics service.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, warn};

use super::{DEFAULT_STORAGE_TIMEOUT, with_deadline};
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_valid_code;

/// Service behind the public redirect route and the stats endpoint.
///
/// Both paths perform the same lookup; only the redirect records a click.
pub struct RedirectService<R: LinkRepository + ?Sized> {
    link_repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    storage_timeout: Duration,
}

impl<R: LinkRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(link_repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            link_repository,
            cache,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Sets the deadline applied to each storage call.
    pub fn with_storage_timeout(mut self, storage_timeout: Duration) -> Self {
        self.storage_timeout = storage_timeout;
        self
    }

    /// Resolves a code to its target URL and records the click.
    ///
    /// # Request Flow
    ///
    /// 1. Reject malformed codes as not found without touching the store
    /// 2. Check cache for the target
    /// 3. On a hit, the atomic increment confirms the link still exists and
    ///    supplies the current target; a stale entry is dropped or refreshed
    /// 4. On a miss, read the store, populate the cache asynchronously, then
    ///    increment
    ///
    /// If the link is deleted between the store read in step 4 and the
    /// increment, the increment is a no-op and the redirect still happens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist; no click is
    /// recorded in that case.
    pub async fn resolve_and_record_click(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::not_found(code));
        }

        match self.cache.get_target(code).await {
            Ok(Some(cached)) => self.record_cached_click(code, cached).await,
            Ok(None) => self.record_uncached_click(code).await,
            Err(e) => {
                error!(code, error = %e, "Cache error, falling back to store");
                self.record_uncached_click(code).await
            }
        }
    }

    /// The store is authoritative: a cached target is only used once the
    /// increment has matched a live link.
    async fn record_cached_click(&self, code: &str, cached: String) -> Result<String, AppError> {
        let Some(link) = self.increment(code).await? else {
            debug!(code, "Cached target has no live link, dropping entry");
            if let Err(e) = self.cache.invalidate(code).await {
                warn!(code, error = %e, "Failed to invalidate stale cache entry");
            }
            return Err(AppError::not_found(code));
        };

        debug!(code, total_clicks = link.total_clicks, "Click recorded");
        if link.target_url != cached {
            debug!(code, "Cached target is stale, refreshing");
            self.fill_cache(&link);
        }

        metrics::counter!("redirects_total").increment(1);
        Ok(link.target_url)
    }

    async fn record_uncached_click(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .find(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        self.fill_cache(&link);

        match self.increment(code).await? {
            Some(updated) => debug!(code, total_clicks = updated.total_clicks, "Click recorded"),
            None => {
                warn!(code, "Link vanished before the click was recorded");
                metrics::counter!("clicks_lost_total").increment(1);
            }
        }

        metrics::counter!("redirects_total").increment(1);
        Ok(link.target_url)
    }

    /// Retrieves a link with its click statistics. Read-only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_stats(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::not_found(code));
        }

        self.find(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))
    }

    async fn find(&self, code: &str) -> Result<Option<Link>, AppError> {
        with_deadline(self.storage_timeout, self.link_repository.find_by_code(code)).await
    }

    async fn increment(&self, code: &str) -> Result<Option<Link>, AppError> {
        with_deadline(
            self.storage_timeout,
            self.link_repository.increment_clicks(code, Utc::now()),
        )
        .await
    }

    /// Fire-and-forget; the redirect does not wait for the cache write.
    fn fill_cache(&self, link: &Link) {
        let cache = self.cache.clone();
        let code = link.code.clone();
        let target_url = link.target_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_target(&code, &target_url, None).await {
                error!(code = %code, error = %e, "Failed to cache target");
            }
        });
    }
}
