//! Process-local implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory link store backed by a [`DashMap`] keyed by code.
///
/// Insertion goes through the entry API, so the existence check and the
/// insert happen under the same shard lock. Click increments mutate the
/// entry in place under that lock as well. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code) {
            Entry::Occupied(occupied) => Err(AppError::code_already_exists(occupied.key())),
            Entry::Vacant(vacant) => {
                let link = Link::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    vacant.key().clone(),
                    new_link.target_url,
                    0,
                    None,
                    Utc::now(),
                );
                vacant.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn increment_clicks(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Link>, AppError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            let link = entry.value_mut();
            link.total_clicks += 1;
            link.last_clicked_at = Some(at);
            link.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!(links = self.links.len(), "In-memory store dropped on close");
        self.links.clear();
    }
}
