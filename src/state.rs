//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::services::{BlocklistService, UrlService, VisitService};
use crate::domain::repositories::{
    BlocklistRepository, CounterRepository, UrlRepository, VisitRepository,
};
use crate::domain::visit_event::VisitEvent;
use crate::infrastructure::persistence::{
    MemoryStore, PgBlocklistRepository, PgCounterRepository, PgUrlRepository, PgVisitRepository,
};
use crate::utils::code_generator::CodeGenerator;

/// The storage gateway as trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub urls: Arc<dyn UrlRepository>,
    pub visits: Arc<dyn VisitRepository>,
    pub blocklist: Arc<dyn BlocklistRepository>,
    pub counters: Arc<dyn CounterRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            urls: Arc::new(PgUrlRepository::new(pool.clone())),
            visits: Arc::new(PgVisitRepository::new(pool.clone())),
            blocklist: Arc::new(PgBlocklistRepository::new(pool.clone())),
            counters: Arc::new(PgCounterRepository::new(pool)),
        }
    }

    /// Every repository backed by the same in-memory store.
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            urls: store.clone(),
            visits: store.clone(),
            blocklist: store.clone(),
            counters: store,
        }
    }
}

pub type SharedUrlService = Arc<UrlService<dyn UrlRepository>>;
pub type SharedVisitService = Arc<VisitService<dyn VisitRepository, dyn CounterRepository>>;
pub type SharedBlocklistService = Arc<BlocklistService<dyn BlocklistRepository>>;

/// Application state cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub url_service: SharedUrlService,
    pub visit_service: SharedVisitService,
    pub blocklist_service: SharedBlocklistService,
    pub visit_sender: mpsc::Sender<VisitEvent>,
    /// Prefix for short URLs returned by the API, without trailing slash.
    pub base_url: String,
}

impl AppState {
    /// Wires the services on top of `repositories`.
    pub fn new(
        repositories: Repositories,
        generator: CodeGenerator,
        blocked_hostnames: Vec<String>,
        blocklist_ttl: Duration,
        visit_sender: mpsc::Sender<VisitEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();

        Self {
            url_service: Arc::new(UrlService::new(repositories.urls, generator)),
            visit_service: Arc::new(VisitService::new(
                repositories.visits,
                repositories.counters,
            )),
            blocklist_service: Arc::new(BlocklistService::new(
                repositories.blocklist,
                blocked_hostnames,
                blocklist_ttl,
            )),
            visit_sender,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}
