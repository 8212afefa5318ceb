//! Visit entity representing a single resolution of a short URL.

use chrono::{DateTime, Utc};

use super::short_code::EncodedKey;

/// An append-only visit record.
#[derive(Debug, Clone)]
pub struct Visit {
    pub id: i64,
    pub key: EncodedKey,
    pub timestamp: DateTime<Utc>,
}

impl Visit {
    pub fn new(id: i64, key: EncodedKey, timestamp: DateTime<Utc>) -> Self {
        Self { id, key, timestamp }
    }
}

/// A shortened URL together with its visit history.
///
/// `visits` is sorted ascending.
#[derive(Debug, Clone)]
pub struct UrlStats {
    pub url: String,
    pub visits: Vec<DateTime<Utc>>,
}
