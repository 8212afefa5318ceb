//! DTOs for short URL lookup.

use serde::Serialize;

use crate::domain::entities::ResolvedUrl;

/// A short URL's target and moderation flag.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub long_url: String,
    pub blocked: bool,
}

impl From<ResolvedUrl> for UrlResponse {
    fn from(resolved: ResolvedUrl) -> Self {
        Self {
            long_url: resolved.long_url,
            blocked: resolved.blocked,
        }
    }
}
