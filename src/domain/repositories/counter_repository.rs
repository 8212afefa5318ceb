//! Repository trait for reading approximate counters.

use crate::domain::entities::ApproximateCount;
use crate::error::AppError;
use async_trait::async_trait;

/// Read access to approximate counters.
///
/// Counters are incremented only inside the transaction that creates the
/// record they count (see [`super::UrlRepository::create`] and
/// [`super::VisitRepository::record_visit`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Returns all counters. Kinds that were never incremented may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<ApproximateCount>, AppError>;
}
