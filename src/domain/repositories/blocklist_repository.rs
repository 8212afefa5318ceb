//! Repository trait for the persistent hostname blocklist.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for blocked hostnames.
///
/// The in-memory cache ([`crate::application::services::BlocklistService`])
/// only ever calls [`BlocklistRepository::list_all`]; the mutating methods
/// back the admin CLI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlocklistRepository: Send + Sync {
    /// Returns every blocked hostname.
    ///
    /// The list is expected to be small enough to load wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<String>, AppError>;

    /// Adds a hostname. Returns `Ok(false)` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn add(&self, hostname: &str) -> Result<bool, AppError>;

    /// Removes a hostname. Returns `Ok(false)` if it was not present.
    ///
    /// Running processes keep the hostname cached until restart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn remove(&self, hostname: &str) -> Result<bool, AppError>;
}
