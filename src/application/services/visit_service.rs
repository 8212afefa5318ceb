//! Visit tracking and statistics service.

use std::sync::Arc;

use crate::domain::entities::{ApproximateCount, CounterKind, ShortCode, UrlStats, Visit};
use crate::domain::repositories::{CounterRepository, VisitRepository};
use crate::error::AppError;

/// Service for recording visits and reading usage statistics.
pub struct VisitService<V: VisitRepository + ?Sized, C: CounterRepository + ?Sized> {
    visit_repository: Arc<V>,
    counter_repository: Arc<C>,
}

impl<V: VisitRepository + ?Sized, C: CounterRepository + ?Sized> VisitService<V, C> {
    /// Creates a new visit service.
    pub fn new(visit_repository: Arc<V>, counter_repository: Arc<C>) -> Self {
        Self {
            visit_repository,
            counter_repository,
        }
    }

    /// Records a visit to a short URL.
    ///
    /// # Note
    ///
    /// Redirects record visits asynchronously through the background worker
    /// (`visit_worker`), which calls this method.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not resolve.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn track_url_visit(&self, code: &ShortCode) -> Result<Visit, AppError> {
        self.visit_repository.record_visit(&code.encode()).await
    }

    /// Returns the long URL and the ascending visit timestamps for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn stats_for_url(&self, code: &ShortCode) -> Result<Option<UrlStats>, AppError> {
        self.visit_repository.stats_by_key(&code.encode()).await
    }

    /// Returns every approximate counter, reporting zero for kinds that
    /// have no stored value yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn approximate_counts(&self) -> Result<Vec<ApproximateCount>, AppError> {
        let stored = self.counter_repository.list().await?;

        Ok(CounterKind::ALL
            .into_iter()
            .map(|kind| ApproximateCount {
                kind,
                count: stored
                    .iter()
                    .find(|c| c.kind == kind)
                    .map_or(0, |c| c.count),
            })
            .collect())
    }
}
