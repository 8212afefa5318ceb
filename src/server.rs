//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, blocklist warm-up, worker
//! spawning and the Axum server lifecycle.

use crate::config::Config;
use crate::domain::visit_worker::run_visit_worker;
use crate::routes::app_router;
use crate::state::{AppState, Repositories};
use crate::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Opens the connection pool using the configured limits.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Migrations
/// - Blocklist cache (first refresh)
/// - Background visit worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database is unreachable, migrations fail, the
/// short code settings are invalid, or the listener cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let generator = CodeGenerator::new(&config.short_code_characters, config.short_code_length)
        .context("Invalid short code settings")?;

    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);

    let state = AppState::new(
        Repositories::postgres(Arc::new(pool)),
        generator,
        config.blocked_hostnames.clone(),
        config.blocklist_cache_ttl(),
        visit_tx,
        config.base_url.clone(),
    );

    state
        .blocklist_service
        .refresh()
        .await
        .context("Failed to load blocked hostnames")?;

    tokio::spawn(run_visit_worker(
        visit_rx,
        state.visit_service.clone(),
        config.visit_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.visit_worker_concurrency,
        "Visit worker started"
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
