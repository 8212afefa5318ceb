//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Database unreachable or visit worker gone
///
/// # Components Checked
///
/// 1. **Database**: Reads the approximate counters
/// 2. **Visit Queue**: Channel open, remaining capacity
/// 3. **Blocklist**: Cached entry count and freshness (informational)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let visit_queue = check_visit_queue(&state);
    let blocklist = check_blocklist(&state);

    let all_healthy = database.is_ok() && visit_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database,
            visit_queue,
            blocklist,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.visit_service.approximate_counts().await {
        Ok(counts) => {
            let summary = counts
                .iter()
                .map(|c| format!("{}={}", c.kind, c.count))
                .collect::<Vec<_>>()
                .join(", ");
            CheckStatus::ok(format!("Connected, counters: {}", summary))
        }
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

fn check_visit_queue(state: &AppState) -> CheckStatus {
    if state.visit_sender.is_closed() {
        CheckStatus::error("Visit queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Capacity: {}/{}",
            state.visit_sender.capacity(),
            state.visit_sender.max_capacity()
        ))
    }
}

fn check_blocklist(state: &AppState) -> CheckStatus {
    let size = state.blocklist_service.len();

    if state.blocklist_service.is_stale() {
        CheckStatus::ok(format!("{} hostnames cached, refresh pending", size))
    } else {
        CheckStatus::ok(format!("{} hostnames cached", size))
    }
}
