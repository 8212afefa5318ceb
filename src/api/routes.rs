//! API route configuration.

use crate::api::handlers::{blocklist_check_handler, shorten_handler, stats_handler, url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`               - Create a short URL
/// - `GET  /urls/{code}`           - Look up a short URL
/// - `GET  /stats/{code}`          - Visit history of a short URL
/// - `GET  /blocklist/{hostname}`  - Check a hostname against the blocklist
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls/{code}", get(url_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/blocklist/{hostname}", get(blocklist_check_handler))
}
