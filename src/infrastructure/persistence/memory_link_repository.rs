//! Process-local link store for development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// In-memory repository backed by a [`DashMap`].
///
/// Uniqueness is enforced through the map's entry API and click increments
/// hold the shard write lock, so the repository contract holds under
/// concurrent use. Data is lost on restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: DashMap<String, ShortLink>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory link storage");
        Self::default()
    }

    /// Stores a record as-is, replacing any existing one with the same code.
    ///
    /// Bypasses the creation checks. Used to seed fixtures.
    pub fn put(&self, link: ShortLink) {
        self.links.insert(link.code.clone(), link);
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                serde_json::json!({ "code": new_link.code }),
            )),
            Entry::Vacant(slot) => {
                let link = new_link.into_link();
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.contains_key(code))
    }

    async fn find_by_destination(&self, destination: &str) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self
            .links
            .iter()
            .filter(|entry| entry.destination == destination)
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });

        Ok(links)
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let Some(mut link) = self.links.get_mut(code) else {
            return Ok(false);
        };

        if link.is_maxed_out() {
            return Ok(false);
        }

        link.click_count += 1;
        Ok(true)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn delete_stale_codes(
        &self,
        codes: &[String],
        now: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let removed = codes
            .iter()
            .filter(|code| {
                self.links
                    .remove_if(code.as_str(), |_, link| link.is_stale_at(now))
                    .is_some()
            })
            .count();

        Ok(removed as u64)
    }

    async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut removed = 0u64;
        self.links.retain(|_, link| {
            let stale = link.is_stale_at(now);
            if stale {
                removed += 1;
            }
            !stale
        });

        Ok(removed)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
