//! Hostname blocklist with a TTL-refreshed in-memory cache.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::repositories::BlocklistRepository;
use crate::error::AppError;
use crate::utils::hostname::registrable_domain;

/// Default time a refresh stays fresh.
pub const DEFAULT_BLOCKLIST_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Default)]
struct BlocklistState {
    hostnames: HashSet<String>,
    refreshed_at: Option<Instant>,
}

/// Decides whether hostnames are blocked.
///
/// Holds the configured seed hostnames plus every hostname loaded from the
/// repository. The set only grows: a refresh adds the rows it reads and never
/// removes anything, so a stale cache is always a subset of the persistent
/// blocklist plus the seed.
///
/// A check on a stale cache (never refreshed, or last refreshed at least
/// `ttl` ago) refreshes first. Concurrent stale checks may each refresh;
/// refreshes are additive, so the only cost is a redundant read.
///
/// # Matching
///
/// A hostname is blocked if it, or its rightmost two labels, is in the set.
/// Blocking `example.com` therefore blocks `sub.example.com` as well. See
/// [`registrable_domain`] for the limits of that heuristic.
pub struct BlocklistService<R: BlocklistRepository + ?Sized> {
    repository: Arc<R>,
    ttl: Duration,
    state: RwLock<BlocklistState>,
}

impl<R: BlocklistRepository + ?Sized> BlocklistService<R> {
    /// Creates a blocklist seeded with statically configured hostnames.
    ///
    /// The cache starts stale; the first check (or an explicit
    /// [`Self::refresh`]) loads the persistent entries.
    pub fn new(repository: Arc<R>, seed: impl IntoIterator<Item = String>, ttl: Duration) -> Self {
        let state = BlocklistState {
            hostnames: seed.into_iter().collect(),
            refreshed_at: None,
        };

        Self {
            repository,
            ttl,
            state: RwLock::new(state),
        }
    }

    /// Returns whether `hostname` is blocked, refreshing a stale cache first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a needed refresh fails. The cache
    /// stays stale and the next check retries the refresh.
    pub async fn is_hostname_blocked(&self, hostname: &str) -> Result<bool, AppError> {
        if self.is_stale() {
            self.refresh().await?;
        }

        Ok(self.contains(hostname))
    }

    /// Returns `true` if the cache has never been refreshed or its last
    /// refresh is at least `ttl` old.
    pub fn is_stale(&self) -> bool {
        match self.state.read().refreshed_at {
            Some(at) => at.elapsed() >= self.ttl,
            None => true,
        }
    }

    /// Loads every persistent entry into the cache and marks it fresh.
    ///
    /// Returns the number of hostnames that were not cached before.
    ///
    /// The new entries and the freshness timestamp are applied together
    /// after the read completes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. Nothing changes in
    /// that case.
    pub async fn refresh(&self) -> Result<usize, AppError> {
        debug!("Loading blocked hostnames from database");
        let loaded = self.repository.list_all().await?;
        let loaded_count = loaded.len();

        let (added, size) = {
            let mut state = self.state.write();
            let before = state.hostnames.len();
            state.hostnames.extend(loaded);
            state.refreshed_at = Some(Instant::now());
            (state.hostnames.len() - before, state.hostnames.len())
        };

        info!(
            loaded = loaded_count,
            added, size, "Refreshed blocked hostnames cache"
        );

        Ok(added)
    }

    /// Number of cached hostnames, seed included.
    pub fn len(&self) -> usize {
        self.state.read().hostnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, hostname: &str) -> bool {
        let state = self.state.read();

        state.hostnames.contains(hostname)
            || state.hostnames.contains(&registrable_domain(hostname))
    }
}
