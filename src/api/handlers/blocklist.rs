//! Handler for hostname blocklist checks.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::blocklist::BlocklistCheckResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::hostname::normalize_hostname;

/// Reports whether a hostname is blocked.
///
/// # Endpoint
///
/// `GET /api/blocklist/{hostname}`
///
/// Hostnames are compared case-insensitively; a trailing root dot is ignored.
pub async fn blocklist_check_handler(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
) -> Result<Json<BlocklistCheckResponse>, AppError> {
    let hostname = normalize_hostname(&hostname);

    let blocked = state.blocklist_service.is_hostname_blocked(&hostname).await?;

    Ok(Json(BlocklistCheckResponse { hostname, blocked }))
}
