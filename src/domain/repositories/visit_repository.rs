//! Repository trait for visit tracking.

use crate::domain::entities::{EncodedKey, UrlStats, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for visit records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a visit and increments the `VISITS` counter in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no shortened URL has this key.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(&self, key: &EncodedKey) -> Result<Visit, AppError>;

    /// Reads a URL and all of its visit timestamps in one read transaction.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlStats))` with visits sorted ascending
    /// - `Ok(None)` if the URL record does not exist, even when orphaned
    ///   visit rows do
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn stats_by_key(&self, key: &EncodedKey) -> Result<Option<UrlStats>, AppError>;
}
