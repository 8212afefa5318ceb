//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL (must be an absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 8192, message = "URL is too long"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
}
