//! Handler for short URL lookup.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::url::UrlResponse;
use crate::domain::entities::ShortCode;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a short URL's target without redirecting or counting a visit.
///
/// # Endpoint
///
/// `GET /api/urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let code = ShortCode::new(code);

    let resolved = state
        .url_service
        .retrieve_url(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code.as_str() })))?;

    Ok(Json(resolved.into()))
}
