//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::hostname::parse_long_url;

/// Creates a short code for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "Ab3dE9xZ",
///   "short_url": "http://localhost:3000/Ab3dE9xZ",
///   "long_url": "https://example.com/some/long/path"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL is not an absolute HTTP(S) URL
/// - 403 if the URL's hostname is blocklisted
/// - 503 if no unused short code was found within the attempt bound
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let (_, hostname) = parse_long_url(&payload.url)?;

    if state.blocklist_service.is_hostname_blocked(&hostname).await? {
        return Err(AppError::blocked(
            "Hostname is blocked",
            json!({ "hostname": hostname }),
        ));
    }

    let code = state.url_service.shorten_url(&payload.url).await?;

    tracing::info!(code = %code, hostname = %hostname, "Short URL created");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: code.to_url(&state.base_url),
            code: code.to_string(),
            long_url: payload.url,
        }),
    ))
}
