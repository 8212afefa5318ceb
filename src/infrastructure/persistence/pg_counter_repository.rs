//! PostgreSQL implementation of the approximate counter repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Row};
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::{ApproximateCount, CounterKind};
use crate::domain::repositories::CounterRepository;
use crate::error::AppError;

/// Increments one counter inside the caller's transaction.
pub(crate) async fn increment_counter(
    conn: &mut PgConnection,
    kind: CounterKind,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO approximate_counts (kind, count)
        VALUES ($1, 1)
        ON CONFLICT (kind) DO UPDATE SET count = approximate_counts.count + 1
        "#,
    )
    .bind(kind.as_str())
    .execute(conn)
    .await?;

    Ok(())
}

/// PostgreSQL repository for approximate counters.
pub struct PgCounterRepository {
    pool: Arc<PgPool>,
}

impl PgCounterRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterRepository for PgCounterRepository {
    async fn list(&self) -> Result<Vec<ApproximateCount>, AppError> {
        let rows = sqlx::query("SELECT kind, count FROM approximate_counts ORDER BY kind")
            .fetch_all(self.pool.as_ref())
            .await?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in rows {
            let kind: String = row.try_get("kind")?;
            match kind.parse::<CounterKind>() {
                Ok(kind) => counts.push(ApproximateCount {
                    kind,
                    count: row.try_get("count")?,
                }),
                Err(_) => warn!(kind = %kind, "Ignoring unknown counter kind"),
            }
        }

        Ok(counts)
    }
}
