//! PostgreSQL implementation of the shortened URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_counter_repository::increment_counter;
use crate::domain::entities::{CounterKind, EncodedKey, NewShortenedUrl, ShortenedUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for shortened URLs.
///
/// Keys are stored in `shortened_urls.short_base64`; the primary key
/// constraint is what makes generated codes unique.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortenedUrlRow {
    short_base64: String,
    url: String,
    blocked: bool,
    created_at: DateTime<Utc>,
}

impl From<ShortenedUrlRow> for ShortenedUrl {
    fn from(row: ShortenedUrlRow) -> Self {
        ShortenedUrl::new(
            EncodedKey::from_stored(row.short_base64),
            row.url,
            row.blocked,
            row.created_at,
        )
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ShortenedUrlRow>(
            r#"
            INSERT INTO shortened_urls (short_base64, url)
            VALUES ($1, $2)
            RETURNING short_base64, url, blocked, created_at
            "#,
        )
        .bind(new_url.key.as_str())
        .bind(&new_url.long_url)
        .fetch_one(&mut *tx)
        .await?;

        increment_counter(&mut tx, CounterKind::ShortenedUrls).await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_key(&self, key: &EncodedKey) -> Result<Option<ShortenedUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortenedUrlRow>(
            r#"
            SELECT short_base64, url, blocked, created_at
            FROM shortened_urls
            WHERE short_base64 = $1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn set_blocked(&self, key: &EncodedKey, blocked: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE shortened_urls SET blocked = $2 WHERE short_base64 = $1")
            .bind(key.as_str())
            .bind(blocked)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
