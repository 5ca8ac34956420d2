//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Shared state cloned into every request.
///
/// Services are type-erased over the storage backend so the same router serves
/// PostgreSQL and in-memory deployments.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    /// Direct store handle for health checks and shutdown.
    pub repository: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    /// Public prefix without trailing slash.
    pub base_url: String,
    /// Deadline for storage calls made outside the services.
    pub storage_timeout: Duration,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
        storage_timeout: Duration,
    ) -> Self {
        let link_service = LinkService::new(repository.clone(), cache.clone())
            .with_storage_timeout(storage_timeout);
        let redirect_service = RedirectService::new(repository.clone(), cache.clone())
            .with_storage_timeout(storage_timeout);

        Self {
            link_service: Arc::new(link_service),
            redirect_service: Arc::new(redirect_service),
            repository,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage_timeout,
        }
    }
}
