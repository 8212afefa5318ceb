//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::ShortCode;
use crate::domain::visit_event::VisitEvent;
use crate::domain::visit_worker::enqueue_visit;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::hostname::parse_long_url;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code
/// 2. Refuse flagged records and blocklisted hostnames
/// 3. Queue a visit for the background worker
/// 4. Return 307 Temporary Redirect
///
/// Visits are fire-and-forget: a full queue drops the visit, never the
/// redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 403 Forbidden if the short URL or its hostname is blocked.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let code = ShortCode::new(code);

    let resolved = state
        .url_service
        .retrieve_url(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code.as_str() })))?;

    if resolved.blocked {
        return Err(AppError::blocked(
            "Short URL has been blocked",
            json!({ "code": code.as_str() }),
        ));
    }

    match parse_long_url(&resolved.long_url) {
        Ok((_, hostname)) => {
            if state.blocklist_service.is_hostname_blocked(&hostname).await? {
                return Err(AppError::blocked(
                    "Hostname is blocked",
                    json!({ "code": code.as_str(), "hostname": hostname }),
                ));
            }
        }
        Err(e) => debug!(code = %code, error = %e, "Stored URL has no checkable hostname"),
    }

    enqueue_visit(&state.visit_sender, VisitEvent::new(code));

    Ok(Redirect::temporary(&resolved.long_url))
}
