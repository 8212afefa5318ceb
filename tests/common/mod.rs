#![allow(dead_code)]

use axum::extract::ConnectInfo;
use link_warden::domain::entities::ShortCode;
use link_warden::domain::repositories::UrlRepository;
use link_warden::domain::visit_event::VisitEvent;
use link_warden::infrastructure::persistence::MemoryStore;
use link_warden::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://short.test";

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub visits: mpsc::Receiver<VisitEvent>,
}

/// State over a fresh in-memory store with `seed` as the static blocklist.
pub fn create_test_context(seed: &[&str]) -> TestContext {
    create_test_context_with_store(Arc::new(MemoryStore::new()), seed)
}

pub fn create_test_context_with_store(store: Arc<MemoryStore>, seed: &[&str]) -> TestContext {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Repositories::in_memory(store.clone()),
        CodeGenerator::default(),
        seed.iter().map(|h| h.to_string()).collect(),
        Duration::from_secs(3600),
        tx,
        BASE_URL,
    );

    TestContext {
        state,
        store,
        visits: rx,
    }
}

/// Inserts a short URL directly and returns its code.
pub async fn create_test_url(store: &MemoryStore, code: &str, long_url: &str) -> ShortCode {
    let code = ShortCode::new(code);

    store
        .create(link_warden::domain::entities::NewShortenedUrl {
            key: code.encode(),
            long_url: long_url.to_string(),
        })
        .await
        .unwrap();

    code
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
