mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_warden::api::handlers::blocklist_check_handler;
use link_warden::infrastructure::persistence::MemoryStore;
use std::sync::Arc;

fn server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/api/blocklist/{hostname}", get(blocklist_check_handler))
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

async fn is_blocked(server: &TestServer, hostname: &str) -> bool {
    let response = server.get(&format!("/api/blocklist/{}", hostname)).await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()["blocked"]
        .as_bool()
        .unwrap()
}

#[tokio::test]
async fn test_blocklist_matching() {
    let ctx = common::create_test_context(&["bad.com"]);
    let server = server(&ctx);

    assert!(is_blocked(&server, "bad.com").await);
    assert!(is_blocked(&server, "x.bad.com").await);
    assert!(!is_blocked(&server, "notbad.com").await);
}

#[tokio::test]
async fn test_blocklist_case_insensitive() {
    let ctx = common::create_test_context(&["bad.com"]);
    let server = server(&ctx);

    let response = server.get("/api/blocklist/WWW.Bad.COM").await;
    let json = response.json::<serde_json::Value>();

    assert_eq!(json["hostname"], "www.bad.com");
    assert_eq!(json["blocked"], true);
}

#[tokio::test]
async fn test_blocklist_ignores_trailing_dot() {
    let ctx = common::create_test_context(&["bad.com"]);
    let server = server(&ctx);

    let response = server.get("/api/blocklist/x.bad.com.").await;
    let json = response.json::<serde_json::Value>();

    assert_eq!(json["hostname"], "x.bad.com");
    assert_eq!(json["blocked"], true);
}

#[tokio::test]
async fn test_blocklist_reads_persistent_entries() {
    let store = Arc::new(MemoryStore::with_blocked_hostnames(["db-blocked.net"]));
    let ctx = common::create_test_context_with_store(store, &[]);
    let server = server(&ctx);

    assert!(is_blocked(&server, "api.db-blocked.net").await);
    assert!(!ctx.state.blocklist_service.is_stale());
}

#[tokio::test]
async fn test_blocklist_multi_part_suffix_heuristic() {
    let ctx = common::create_test_context(&["co.uk"]);
    let server = server(&ctx);

    // Two-label matching treats co.uk as the registrable domain.
    assert!(is_blocked(&server, "shop.example.co.uk").await);
}
