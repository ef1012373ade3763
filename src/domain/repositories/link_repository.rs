//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for short links.
///
/// Implementations must provide two guarantees natively rather than through
/// read-then-write sequences in the caller:
///
/// - `code` is unique: a second insert with the same code fails with
///   [`AppError::Conflict`], even when both inserts race.
/// - [`LinkRepository::increment_clicks`] is a single atomic update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link with a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns whether a record with this code is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Lists every stored link pointing at exactly `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_destination(&self, destination: &str) -> Result<Vec<ShortLink>, AppError>;

    /// Atomically adds one click, unless the quota is already used up.
    ///
    /// Returns `Ok(false)` when no row was updated: the record is gone, or a
    /// concurrent resolution consumed the last allowed click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Deletes a link. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Deletes the listed codes whose record is stale at `now`, returning how
    /// many rows were removed.
    ///
    /// Staleness is re-checked by the delete itself, so a code re-created
    /// after it was observed stale survives.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_stale_codes(
        &self,
        codes: &[String],
        now: DateTime<Utc>,
    ) -> Result<u64, AppError>;

    /// Deletes every link that is expired at `now` or has used up its quota.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store does not answer.
    async fn ping(&self) -> Result<(), AppError>;
}
