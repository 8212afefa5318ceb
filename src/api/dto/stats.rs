//! DTOs for per-URL statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlStats;

/// Long URL with every visit timestamp, oldest first.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub url: String,
    pub visits: Vec<DateTime<Utc>>,
}

impl From<UrlStats> for StatsResponse {
    fn from(stats: UrlStats) -> Self {
        Self {
            url: stats.url,
            visits: stats.visits,
        }
    }
}
