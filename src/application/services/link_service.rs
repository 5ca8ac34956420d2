//! Link allocation and management service.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{DEFAULT_STORAGE_TIMEOUT, with_deadline};
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{generate_code, is_valid_code};
use crate::utils::url_validator::validate_target_url;

/// Attempts made to find a free random code before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service for allocating short codes and managing links.
///
/// Uniqueness is enforced by inserting and reacting to the store's duplicate
/// error, never by checking for existence first.
pub struct LinkService<R: LinkRepository + ?Sized> {
    link_repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    storage_timeout: Duration,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
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

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `target_url` - Absolute HTTP(S) URL to redirect to, stored verbatim
    /// - `custom_code` - Optional caller-chosen code; a random one is allocated otherwise
    ///
    /// # Code Allocation
    ///
    /// - A custom code is format-checked and inserted once
    /// - A random code is retried on collision, up to [`MAX_GENERATION_ATTEMPTS`] times
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `target_url` is not an absolute HTTP(S) URL
    /// - [`AppError::InvalidCodeFormat`] if `custom_code` is not 6-8 alphanumerics
    /// - [`AppError::CodeAlreadyExists`] if `custom_code` is taken
    /// - [`AppError::GenerationExhausted`] if every random candidate collided
    pub async fn create_link(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        validate_target_url(&target_url).map_err(|e| AppError::invalid_url(e.to_string()))?;

        let link = match custom_code {
            Some(code) => {
                if !is_valid_code(&code) {
                    return Err(AppError::invalid_code_format(code));
                }

                let link = self.insert(NewLink { code, target_url }).await?;
                metrics::counter!("links_created_total", "source" => "custom").increment(1);
                link
            }
            None => {
                let link = self.insert_with_generated_code(target_url).await?;
                metrics::counter!("links_created_total", "source" => "generated").increment(1);
                link
            }
        };

        info!(code = %link.code, id = link.id, "Link created");
        Ok(link)
    }

    /// Lists every link, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        with_deadline(self.storage_timeout, self.link_repository.list_all()).await
    }

    /// Deletes a link and drops its cached redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) {
            return Err(AppError::not_found(code));
        }

        let deleted = with_deadline(self.storage_timeout, self.link_repository.delete(code)).await?;
        if !deleted {
            return Err(AppError::not_found(code));
        }

        if let Err(e) = self.cache.invalidate(code).await {
            warn!(code, error = %e, "Failed to invalidate cache after delete");
        }

        info!(code, "Link deleted");
        Ok(())
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        with_deadline(self.storage_timeout, self.link_repository.insert(new_link)).await
    }

    /// Inserts under fresh random codes until one is accepted.
    ///
    /// Only [`AppError::CodeAlreadyExists`] is retried; any other failure ends
    /// the loop immediately.
    async fn insert_with_generated_code(&self, target_url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = NewLink {
                code: generate_code(),
                target_url: target_url.clone(),
            };

            match self.insert(candidate).await {
                Ok(link) => return Ok(link),
                Err(AppError::CodeAlreadyExists { code }) => {
                    debug!(attempt, code = %code, "Generated code collided, retrying");
                    metrics::counter!("code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Gave up allocating a random code"
        );
        Err(AppError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::NullCache;
    use chrono::Utc;
    use mockall::Sequence;

    fn link_from(new_link: NewLink) -> Link {
        Link::new(10, new_link.code, new_link.target_url, 0, None, Utc::now())
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(repo), Arc::new(NullCache::new()))
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .withf(|new_link| {
                new_link.code.len() == 6
                    && is_valid_code(&new_link.code)
                    && new_link.target_url == "https://example.com/x"
            })
            .times(1)
            .returning(|new_link| Ok(link_from(new_link)));

        let result = service(mock_link_repo)
            .create_link("https://example.com/x".to_string(), None)
            .await;

        let link = result.unwrap();
        assert_eq!(link.code.len(), 6);
        assert_eq!(link.target_url, "https://example.com/x");
        assert_eq!(link.total_clicks, 0);
        assert!(link.last_clicked_at.is_none());
    }

    #[tokio::test]
    async fn test_create_link_never_checks_existence_first() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_find_by_code().times(0);
        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|new_link| Ok(link_from(new_link)));

        let result = service(mock_link_repo)
            .create_link("https://example.com".to_string(), Some("abc123".to_string()))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "MyCode12")
            .times(1)
            .returning(|new_link| Ok(link_from(new_link)));

        let link = service(mock_link_repo)
            .create_link(
                "https://example.com".to_string(),
                Some("MyCode12".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.code, "MyCode12");
    }

    #[tokio::test]
    async fn test_create_link_custom_code_conflict() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|new_link| Err(AppError::code_already_exists(new_link.code)));

        let result = service(mock_link_repo)
            .create_link("https://example.com".to_string(), Some("abc123".to_string()))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::CodeAlreadyExists { code } if code == "abc123"
        ));
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_insert().times(0);

        let result = service(mock_link_repo)
            .create_link("not-a-url".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_invalid_url_reported_before_invalid_code() {
        let mock_link_repo = MockLinkRepository::new();

        let result = service(mock_link_repo)
            .create_link("ftp://example.com".to_string(), Some("!!".to_string()))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_create_link_invalid_custom_codes_persist_nothing() {
        for bad in ["abc12", "abcd12345", "abc-12", "abc 123", "", "ÄÖÜ123"] {
            let mut mock_link_repo = MockLinkRepository::new();
            mock_link_repo.expect_insert().times(0);

            let result = service(mock_link_repo)
                .create_link("https://example.com".to_string(), Some(bad.to_string()))
                .await;

            assert!(
                matches!(result, Err(AppError::InvalidCodeFormat { .. })),
                "code {bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let mut mock_link_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock_link_repo
            .expect_insert()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|new_link| Err(AppError::code_already_exists(new_link.code)));
        mock_link_repo
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(link_from(new_link)));

        let result = service(mock_link_repo)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_generation_exhausted_after_ten_attempts() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|new_link| Err(AppError::code_already_exists(new_link.code)));

        let result = service(mock_link_repo)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::GenerationExhausted { attempts: 10 }
        ));
    }

    #[tokio::test]
    async fn test_create_link_storage_error_not_retried() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::storage("connection reset")));

        let result = service(mock_link_repo)
            .create_link("https://example.com".to_string(), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_list_links_passes_through_order() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_list_all().times(1).returning(|| {
            Ok(vec![
                link_from(NewLink::new("newest", "https://a.com")),
                link_from(NewLink::new("oldest", "https://b.com")),
            ])
        });

        let links = service(mock_link_repo).list_links().await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].code, "newest");
    }

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_delete()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));

        let result = service(mock_link_repo).delete_link("abc123").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo
            .expect_delete()
            .times(1)
            .returning(|_| Ok(false));

        let result = service(mock_link_repo).delete_link("abc123").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_malformed_code_skips_store() {
        let mut mock_link_repo = MockLinkRepository::new();
        mock_link_repo.expect_delete().times(0);

        let result = service(mock_link_repo).delete_link("no").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
