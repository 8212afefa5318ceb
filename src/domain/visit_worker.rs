//! Background worker persisting visit events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::application::services::VisitService;
use crate::domain::repositories::{CounterRepository, VisitRepository};
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Retries after the first failed attempt of a transient error.
pub const VISIT_MAX_RETRIES: usize = 3;

/// Queues a visit without waiting.
///
/// Returns `false` if the event was dropped because the queue is full or the
/// worker has stopped.
pub fn enqueue_visit(sender: &mpsc::Sender<VisitEvent>, event: VisitEvent) -> bool {
    match sender.try_send(event) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(event)) => {
            warn!(code = %event.code, "Visit queue full, dropping visit");
            metrics::counter!("visits_dropped_total", "reason" => "queue_full").increment(1);
            false
        }
        Err(mpsc::error::TrySendError::Closed(event)) => {
            error!(code = %event.code, "Visit worker stopped, dropping visit");
            metrics::counter!("visits_dropped_total", "reason" => "worker_stopped").increment(1);
            false
        }
    }
}

/// Consumes visit events until every sender is dropped.
///
/// At most `concurrency` events are persisted at once. Events still in flight
/// when the channel closes are awaited before returning.
pub async fn run_visit_worker<V, C>(
    mut rx: mpsc::Receiver<VisitEvent>,
    service: Arc<VisitService<V, C>>,
    concurrency: usize,
) where
    V: VisitRepository + ?Sized + 'static,
    C: CounterRepository + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let service = service.clone();

        tasks.spawn(async move {
            let _permit = permit;
            process_event(&service, event).await;
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}

    info!("Visit worker stopped");
}

async fn process_event<V, C>(service: &VisitService<V, C>, event: VisitEvent)
where
    V: VisitRepository + ?Sized,
    C: CounterRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(VISIT_MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        || service.track_url_visit(&event.code),
        |e: &AppError| e.is_transient(),
    )
    .await;

    match result {
        Ok(visit) => {
            debug!(code = %event.code, at = %visit.timestamp, "Visit recorded");
            metrics::counter!("visits_recorded_total").increment(1);
        }
        Err(AppError::NotFound { .. }) => {
            warn!(code = %event.code, "Visit for unknown short code discarded");
            metrics::counter!("visits_dropped_total", "reason" => "not_found").increment(1);
        }
        Err(e) => {
            error!(code = %event.code, error = %e, "Failed to record visit");
            metrics::counter!("visits_dropped_total", "reason" => "storage").increment(1);
        }
    }
}
