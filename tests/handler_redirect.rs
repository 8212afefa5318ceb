mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_warden::api::handlers::redirect_handler;
use link_warden::domain::repositories::{BlocklistRepository, UrlRepository};
use link_warden::infrastructure::persistence::MemoryStore;
use std::sync::Arc;

fn server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let mut ctx = common::create_test_context(&[]);
    common::create_test_url(&ctx.store, "redirect1", "https://example.com/target").await;
    let server = server(&ctx);

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");

    let event = ctx.visits.try_recv().unwrap();
    assert_eq!(event.code.as_str(), "redirect1");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let mut ctx = common::create_test_context(&[]);
    let server = server(&ctx);

    let response = server.get("/missing").await;

    response.assert_status_not_found();
    assert!(ctx.visits.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_flagged_url_forbidden() {
    let mut ctx = common::create_test_context(&[]);
    let code = common::create_test_url(&ctx.store, "flagged", "https://example.com").await;
    ctx.store.set_blocked(&code.encode(), true).await.unwrap();
    let server = server(&ctx);

    let response = server.get("/flagged").await;

    response.assert_status(axum::http::StatusCode::FORBIDDEN);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "blocked");
    assert!(ctx.visits.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_blocklisted_hostname_forbidden() {
    let mut ctx = common::create_test_context(&["bad.com"]);
    common::create_test_url(&ctx.store, "sneaky", "https://cdn.bad.com/file").await;
    let server = server(&ctx);

    let response = server.get("/sneaky").await;

    response.assert_status(axum::http::StatusCode::FORBIDDEN);
    assert!(ctx.visits.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_blocklisted_hostname_with_trailing_dot_forbidden() {
    let mut ctx = common::create_test_context(&["bad.com"]);
    common::create_test_url(&ctx.store, "dotted", "https://x.bad.com./p").await;
    let server = server(&ctx);

    let response = server.get("/dotted").await;

    response.assert_status(axum::http::StatusCode::FORBIDDEN);
    assert!(ctx.visits.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_hostname_blocked_after_creation() {
    let store = Arc::new(MemoryStore::new());
    common::create_test_url(&store, "later", "https://later.example/x").await;
    store.add("later.example").await.unwrap();

    let ctx = common::create_test_context_with_store(store, &[]);
    let server = server(&ctx);

    server.get("/later").await.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_redirect_unflagged_url_redirects_again() {
    let ctx = common::create_test_context(&[]);
    let code = common::create_test_url(&ctx.store, "toggle", "https://example.com").await;
    let server = server(&ctx);

    ctx.store.set_blocked(&code.encode(), true).await.unwrap();
    server.get("/toggle").await.assert_status(axum::http::StatusCode::FORBIDDEN);

    ctx.store.set_blocked(&code.encode(), false).await.unwrap();
    assert_eq!(server.get("/toggle").await.status_code(), 307);
}

#[tokio::test]
async fn test_redirect_full_queue_still_redirects() {
    let ctx = common::create_test_context(&[]);
    common::create_test_url(&ctx.store, "busy", "https://example.com/busy").await;
    let server = server(&ctx);

    // Receiver is never drained; the channel holds 100 events.
    for _ in 0..105 {
        assert_eq!(server.get("/busy").await.status_code(), 307);
    }
}
