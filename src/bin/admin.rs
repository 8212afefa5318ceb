//! CLI administration tool for link-warden.
//!
//! Manages the persistent hostname blocklist, moderates short URLs and
//! inspects counters without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Block a hostname (and its subdomains)
//! cargo run --bin admin -- blocklist add spam.example
//!
//! # List blocked hostnames
//! cargo run --bin admin -- blocklist list
//!
//! # Flag a short URL
//! cargo run --bin admin -- url block Ab3dE9xZ
//!
//! # Compare approximate and exact counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components, as for the server

use link_warden::application::services::{UrlService, VisitService};
use link_warden::config::mask_connection_string;
use link_warden::domain::entities::{CounterKind, ShortCode};
use link_warden::domain::repositories::BlocklistRepository;
use link_warden::infrastructure::persistence::{
    PgBlocklistRepository, PgCounterRepository, PgUrlRepository, PgVisitRepository,
};
use link_warden::utils::code_generator::CodeGenerator;
use link_warden::utils::hostname;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-warden.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the persistent hostname blocklist
    Blocklist {
        #[command(subcommand)]
        action: BlocklistAction,
    },

    /// Moderate individual short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show approximate and exact counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum BlocklistAction {
    /// Block a hostname and all of its subdomains
    Add {
        hostname: String,
    },

    /// Unblock a hostname (running servers keep it until restart)
    Remove {
        hostname: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List blocked hostnames
    List,
}

#[derive(Subcommand)]
enum UrlAction {
    /// Flag a short URL so it no longer redirects
    Block { code: String },

    /// Clear the flag on a short URL
    Unblock { code: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = link_warden::config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&config.database_url)
            )
        })?;

    match cli.command {
        Commands::Blocklist { action } => handle_blocklist_action(action, &pool).await?,
        Commands::Url { action } => handle_url_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Lowercases a hostname and rejects anything that is not a domain or IP.
fn normalize_hostname(input: &str) -> Result<String> {
    let hostname = hostname::normalize_hostname(input);

    url::Host::parse(&hostname)
        .map_err(|e| anyhow::anyhow!("Invalid hostname '{}': {}", input, e))?;

    Ok(hostname)
}

async fn handle_blocklist_action(action: BlocklistAction, pool: &PgPool) -> Result<()> {
    let repo = PgBlocklistRepository::new(Arc::new(pool.clone()));

    match action {
        BlocklistAction::Add { hostname } => {
            let hostname = normalize_hostname(&hostname)?;

            let added = repo
                .add(&hostname)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add hostname: {}", e))?;

            if added {
                println!("{} {}", "✅ Blocked".green().bold(), hostname.cyan());
                println!(
                    "{}",
                    "   Running servers pick this up at their next cache refresh.".bright_black()
                );
            } else {
                println!("{} {}", "⚠️  Already blocked:".yellow(), hostname.cyan());
            }
        }
        BlocklistAction::Remove { hostname, yes } => {
            let hostname = normalize_hostname(&hostname)?;

            println!(
                "{}",
                "⚠️  Running servers keep cached hostnames until they restart.".yellow()
            );

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Unblock {}?", hostname))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let removed = repo
                .remove(&hostname)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to remove hostname: {}", e))?;

            if removed {
                println!("{} {}", "✅ Unblocked".green().bold(), hostname.cyan());
            } else {
                println!("{} {}", "⚠️  Not in blocklist:".yellow(), hostname.cyan());
            }
        }
        BlocklistAction::List => {
            println!("{}", "🚫 Blocked Hostnames".bright_blue().bold());
            println!();

            let hostnames = repo
                .list_all()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list hostnames: {}", e))?;

            if hostnames.is_empty() {
                println!("{}", "  No hostnames blocked".yellow());
                return Ok(());
            }

            for hostname in &hostnames {
                println!("  {}", hostname.cyan());
            }

            println!();
            println!(
                "  Total: {}",
                hostnames.len().to_string().bright_white().bold()
            );
        }
    }

    println!();

    Ok(())
}

async fn handle_url_action(action: UrlAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let service = UrlService::new(repo, CodeGenerator::default());

    let (code, blocked) = match action {
        UrlAction::Block { code } => (code, true),
        UrlAction::Unblock { code } => (code, false),
    };
    let code = ShortCode::new(code);

    let updated = service
        .set_blocked(&code, blocked)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update short URL: {}", e))?;

    if !updated {
        anyhow::bail!("Short URL '{}' not found", code);
    }

    let verb = if blocked { "Blocked" } else { "Unblocked" };
    println!("{} {}", format!("✅ {}", verb).green().bold(), code.to_string().cyan());
    println!();

    Ok(())
}

/// Displays approximate counters next to exact row counts.
///
/// The approximate values come from `approximate_counts` and are what the
/// service reads; the exact values are full table counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool_arc = Arc::new(pool.clone());
    let service = VisitService::new(
        Arc::new(PgVisitRepository::new(pool_arc.clone())),
        Arc::new(PgCounterRepository::new(pool_arc)),
    );

    let counts = service
        .approximate_counts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read counters: {}", e))?;

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shortened_urls")
        .fetch_one(pool)
        .await?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(pool)
        .await?;

    let blocked_urls: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM shortened_urls WHERE blocked")
            .fetch_one(pool)
            .await?;

    let blocked_hostnames: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blocked_hostnames")
        .fetch_one(pool)
        .await?;

    println!(
        "  {:<18} {:>14} {:>14}",
        "".bright_white(),
        "Approximate".bright_white().bold(),
        "Exact".bright_white().bold()
    );
    println!("  {}", "─".repeat(48).bright_black());

    for count in &counts {
        let (label, exact) = match count.kind {
            CounterKind::ShortenedUrls => ("Short URLs", urls_count),
            CounterKind::Visits => ("Visits", visits_count),
        };

        println!(
            "  {:<18} {:>14} {:>14}",
            label,
            count.count.to_string().bright_green().bold(),
            exact.to_string().bright_black()
        );
    }

    println!();
    println!(
        "  Flagged URLs:      {}",
        blocked_urls.to_string().bright_yellow().bold()
    );
    println!(
        "  Blocked hostnames: {}",
        blocked_hostnames.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
