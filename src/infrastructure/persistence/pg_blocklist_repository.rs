//! PostgreSQL implementation of the hostname blocklist repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::BlocklistRepository;
use crate::error::AppError;

/// PostgreSQL repository backed by the `blocked_hostnames` table.
pub struct PgBlocklistRepository {
    pool: Arc<PgPool>,
}

impl PgBlocklistRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlocklistRepository for PgBlocklistRepository {
    async fn list_all(&self) -> Result<Vec<String>, AppError> {
        let hostnames = sqlx::query_scalar("SELECT hostname FROM blocked_hostnames ORDER BY hostname")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(hostnames)
    }

    async fn add(&self, hostname: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO blocked_hostnames (hostname) VALUES ($1) ON CONFLICT (hostname) DO NOTHING",
        )
        .bind(hostname)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, hostname: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blocked_hostnames WHERE hostname = $1")
            .bind(hostname)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
