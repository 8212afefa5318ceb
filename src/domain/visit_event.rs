//! Visit event model for asynchronous visit tracking.

use crate::domain::entities::ShortCode;

/// A resolved redirect waiting to be persisted as a visit.
///
/// Sent from the redirect handler to
/// [`crate::domain::visit_worker::run_visit_worker`] so the response does not
/// wait on the database write.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub code: ShortCode,
}

impl VisitEvent {
    pub fn new(code: ShortCode) -> Self {
        Self { code }
    }
}
