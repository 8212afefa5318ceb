//! In-memory storage gateway.
//!
//! Implements every repository trait on one shared store so paired writes
//! (record plus counter) happen under a single lock. Used by the integration
//! tests and for running the service without PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::{
    ApproximateCount, CounterKind, EncodedKey, NewShortenedUrl, ShortenedUrl, UrlStats, Visit,
};
use crate::domain::repositories::{
    BlocklistRepository, CounterRepository, UrlRepository, VisitRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    urls: HashMap<EncodedKey, ShortenedUrl>,
    visits: Vec<Visit>,
    counters: HashMap<CounterKind, i64>,
    blocked_hostnames: BTreeSet<String>,
    next_visit_id: i64,
}

impl Tables {
    fn increment(&mut self, kind: CounterKind) {
        *self.counters.entry(kind).or_insert(0) += 1;
    }
}

/// Thread-safe in-memory implementation of the storage gateway.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose persistent blocklist already holds `hostnames`.
    pub fn with_blocked_hostnames<I, S>(hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store
            .tables
            .lock()
            .blocked_hostnames
            .extend(hostnames.into_iter().map(Into::into));
        store
    }

    /// Records a visit stamped with `timestamp` instead of the current time.
    ///
    /// Visits are kept in insertion order; reads sort them.
    pub fn record_visit_at(
        &self,
        key: &EncodedKey,
        timestamp: DateTime<Utc>,
    ) -> Result<Visit, AppError> {
        let mut tables = self.tables.lock();

        if !tables.urls.contains_key(key) {
            return Err(AppError::not_found(
                "Referenced record does not exist",
                json!({ "constraint": "visits_shortened_url_id_fkey" }),
            ));
        }

        tables.next_visit_id += 1;
        let visit = Visit::new(tables.next_visit_id, key.clone(), timestamp);
        tables.visits.push(visit.clone());
        tables.increment(CounterKind::Visits);

        Ok(visit)
    }
}

#[async_trait]
impl UrlRepository for MemoryStore {
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        let mut tables = self.tables.lock();

        if tables.urls.contains_key(&new_url.key) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "shortened_urls_pkey" }),
            ));
        }

        let url = ShortenedUrl::new(new_url.key.clone(), new_url.long_url, false, Utc::now());
        tables.urls.insert(new_url.key, url.clone());
        tables.increment(CounterKind::ShortenedUrls);

        Ok(url)
    }

    async fn find_by_key(&self, key: &EncodedKey) -> Result<Option<ShortenedUrl>, AppError> {
        Ok(self.tables.lock().urls.get(key).cloned())
    }

    async fn set_blocked(&self, key: &EncodedKey, blocked: bool) -> Result<bool, AppError> {
        match self.tables.lock().urls.get_mut(key) {
            Some(url) => {
                url.blocked = blocked;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl VisitRepository for MemoryStore {
    async fn record_visit(&self, key: &EncodedKey) -> Result<Visit, AppError> {
        self.record_visit_at(key, Utc::now())
    }

    async fn stats_by_key(&self, key: &EncodedKey) -> Result<Option<UrlStats>, AppError> {
        let tables = self.tables.lock();

        let Some(url) = tables.urls.get(key) else {
            return Ok(None);
        };

        let mut visits: Vec<_> = tables
            .visits
            .iter()
            .filter(|v| &v.key == key)
            .map(|v| v.timestamp)
            .collect();
        visits.sort();

        Ok(Some(UrlStats {
            url: url.long_url.clone(),
            visits,
        }))
    }
}

#[async_trait]
impl BlocklistRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<String>, AppError> {
        Ok(self.tables.lock().blocked_hostnames.iter().cloned().collect())
    }

    async fn add(&self, hostname: &str) -> Result<bool, AppError> {
        Ok(self
            .tables
            .lock()
            .blocked_hostnames
            .insert(hostname.to_string()))
    }

    async fn remove(&self, hostname: &str) -> Result<bool, AppError> {
        Ok(self.tables.lock().blocked_hostnames.remove(hostname))
    }
}

#[async_trait]
impl CounterRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<ApproximateCount>, AppError> {
        let tables = self.tables.lock();

        Ok(CounterKind::ALL
            .into_iter()
            .filter_map(|kind| {
                tables
                    .counters
                    .get(&kind)
                    .map(|&count| ApproximateCount { kind, count })
            })
            .collect())
    }
}
