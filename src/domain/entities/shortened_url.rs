//! Shortened URL entity.

use chrono::{DateTime, Utc};

use super::short_code::EncodedKey;

/// A persisted mapping from an encoded short code to a long URL.
///
/// `blocked` is set by moderation (see the `admin url block` command) and is
/// never changed by the shortening or resolution paths.
#[derive(Debug, Clone)]
pub struct ShortenedUrl {
    pub key: EncodedKey,
    pub long_url: String,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl ShortenedUrl {
    pub fn new(key: EncodedKey, long_url: String, blocked: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            long_url,
            blocked,
            created_at,
        }
    }
}

/// Input data for creating a shortened URL.
#[derive(Debug, Clone)]
pub struct NewShortenedUrl {
    pub key: EncodedKey,
    pub long_url: String,
}

/// What a short code resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub long_url: String,
    pub blocked: bool,
}

impl From<ShortenedUrl> for ResolvedUrl {
    fn from(url: ShortenedUrl) -> Self {
        Self {
            long_url: url.long_url,
            blocked: url.blocked,
        }
    }
}
