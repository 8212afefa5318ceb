//! Handler for per-URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::stats::StatsResponse;
use crate::domain::entities::ShortCode;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the long URL and every visit timestamp of a short code.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com",
///   "visits": ["2024-01-01T00:00:00Z", "2024-01-02T08:30:00Z"]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let code = ShortCode::new(code);

    let stats = state
        .visit_service
        .stats_for_url(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code.as_str() })))?;

    Ok(Json(stats.into()))
}
