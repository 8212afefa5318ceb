//! Repository trait for shortened URL records.

use crate::domain::entities::{EncodedKey, NewShortenedUrl, ShortenedUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for shortened URLs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and increments the `SHORTENED_URLS` counter in
    /// the same transaction.
    ///
    /// Either both writes happen or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key already exists. Nothing is
    /// written in that case and the caller may retry with another key.
    ///
    /// Returns [`AppError::Internal`] on any other storage failure.
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError>;

    /// Finds a record by its encoded key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_key(&self, key: &EncodedKey) -> Result<Option<ShortenedUrl>, AppError>;

    /// Sets the moderation flag of a record.
    ///
    /// Returns `Ok(false)` if no record has this key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_blocked(&self, key: &EncodedKey, blocked: bool) -> Result<bool, AppError>;
}
