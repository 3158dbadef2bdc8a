//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Listing criteria for administrative queries.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    /// Case-insensitive substring of the original URL.
    pub search: Option<String>,
    /// Only links created at or after this instant.
    pub created_since: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl LinkFilter {
    pub fn new(limit: i64) -> Self {
        Self {
            search: None,
            created_since: None,
            limit,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn with_created_since(mut self, created_since: Option<DateTime<Utc>>) -> Self {
        self.created_since = created_since;
        self
    }
}

/// Repository interface for short links.
///
/// All writes are immediately visible to subsequent reads.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServiceUnavailable`] if the store cannot be reached.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Atomically increments `clicks` and sets `last_clicked = at`.
    ///
    /// Returns `Ok(false)` if the link no longer exists.
    async fn register_click(&self, id: i64, at: DateTime<Utc>) -> Result<bool, AppError>;

    /// Replaces (or clears, with `None`) the stored password hash.
    ///
    /// Returns `Ok(false)` if the link does not exist.
    async fn set_password_hash(
        &self,
        id: i64,
        password_hash: Option<String>,
    ) -> Result<bool, AppError>;

    /// Counts links whose `last_clicked` lies in `[from, to)`; `to = None` is unbounded.
    async fn count_clicked_between(
        &self,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<i64, AppError>;

    /// Lists links, newest first.
    async fn list(&self, filter: LinkFilter) -> Result<Vec<ShortLink>, AppError>;

    /// Deletes a link together with its click logs.
    ///
    /// Returns `Ok(false)` if the link does not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Checks that the store answers queries.
    async fn ping(&self) -> Result<(), AppError>;
}
