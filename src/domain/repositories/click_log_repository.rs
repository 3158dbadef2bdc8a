//! Repository trait for distinct-visitor click logs.

use crate::domain::entities::{ClickLog, NewClickLog};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click logs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickLogRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickLogRepository: Send + Sync {
    /// Inserts a log row unless one already exists for `(short_link_id, ip_address)`.
    ///
    /// Relies on the store's conflict handling, so concurrent calls for the same
    /// pair insert exactly one row. Returns `Ok(true)` if a row was inserted and
    /// `Ok(false)` if the pair was already logged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    async fn record_if_absent(&self, new_log: NewClickLog) -> Result<bool, AppError>;

    /// Counts distinct visitors of a link.
    async fn count_for_link(&self, short_link_id: i64) -> Result<i64, AppError>;

    /// Lists the most recent visitors of a link.
    async fn list_for_link(
        &self,
        short_link_id: i64,
        limit: i64,
    ) -> Result<Vec<ClickLog>, AppError>;
}
