//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_counter_repository::increment_counter;
use crate::domain::entities::{CounterKind, EncodedKey, UrlStats, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository for visit tracking and per-URL statistics.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record_visit(&self, key: &EncodedKey) -> Result<Visit, AppError> {
        let mut tx = self.pool.begin().await?;

        let (id, timestamp): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO visits (shortened_url_id)
            VALUES ($1)
            RETURNING id, timestamp
            "#,
        )
        .bind(key.as_str())
        .fetch_one(&mut *tx)
        .await?;

        increment_counter(&mut tx, CounterKind::Visits).await?;

        tx.commit().await?;

        Ok(Visit::new(id, key.clone(), timestamp))
    }

    async fn stats_by_key(&self, key: &EncodedKey) -> Result<Option<UrlStats>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Both reads must see one snapshot.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let url: Option<String> =
            sqlx::query_scalar("SELECT url FROM shortened_urls WHERE short_base64 = $1")
                .bind(key.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let Some(url) = url else {
            tx.commit().await?;
            return Ok(None);
        };

        let visits: Vec<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT timestamp
            FROM visits
            WHERE shortened_url_id = $1
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(key.as_str())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(UrlStats { url, visits }))
    }
}
