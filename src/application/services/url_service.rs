//! Short URL creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewShortenedUrl, ResolvedUrl, ShortCode};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::hostname::parse_long_url;
use tracing::{debug, warn};

/// Maximum number of collisions tolerated before shortening gives up.
///
/// The engine makes at most `MAX_SHORT_CODE_GENERATION_ATTEMPTS + 1` inserts.
pub const MAX_SHORT_CODE_GENERATION_ATTEMPTS: usize = 10;

/// Service for creating and resolving shortened URLs.
///
/// Uniqueness of generated codes is decided by the repository's key
/// constraint: each candidate is inserted directly and a conflict triggers a
/// new candidate, so there is no window between an existence check and the
/// insert.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    generator: CodeGenerator,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(repository: Arc<R>, generator: CodeGenerator) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Shortens a long URL and returns its new short code.
    ///
    /// Each call creates a new record, so shortening the same URL twice
    /// yields two different codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    ///
    /// Returns [`AppError::GenerationTimeout`] if every one of the
    /// `MAX_SHORT_CODE_GENERATION_ATTEMPTS + 1` candidates collided.
    ///
    /// Any other repository error is returned as-is on first occurrence.
    pub async fn shorten_url(&self, long_url: &str) -> Result<ShortCode, AppError> {
        parse_long_url(long_url)?;

        let max_attempts = MAX_SHORT_CODE_GENERATION_ATTEMPTS + 1;

        for attempt in 1..=max_attempts {
            let code = self.generator.generate();
            let new_url = NewShortenedUrl {
                key: code.encode(),
                long_url: long_url.to_string(),
            };

            match self.repository.create(new_url).await {
                Ok(_) => return Ok(code),
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = max_attempts,
            code_length = self.generator.length(),
            "Gave up generating a unique short code"
        );

        Err(AppError::GenerationTimeout {
            attempts: max_attempts,
        })
    }

    /// Resolves a short code to its long URL and moderation flag.
    ///
    /// Does not consult the hostname blocklist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn retrieve_url(&self, code: &ShortCode) -> Result<Option<ResolvedUrl>, AppError> {
        let url = self.repository.find_by_key(&code.encode()).await?;

        Ok(url.map(ResolvedUrl::from))
    }

    /// Sets or clears the moderation flag on a short URL.
    ///
    /// Returns `Ok(false)` if the code does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn set_blocked(&self, code: &ShortCode, blocked: bool) -> Result<bool, AppError> {
        self.repository.set_blocked(&code.encode(), blocked).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortenedUrl;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Mutex;

    fn stored(new_url: &NewShortenedUrl) -> ShortenedUrl {
        ShortenedUrl::new(
            new_url.key.clone(),
            new_url.long_url.clone(),
            false,
            Utc::now(),
        )
    }

    fn conflict() -> AppError {
        AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": "shortened_urls_pkey" }),
        )
    }

    #[tokio::test]
    async fn test_shorten_url_success() {
        let mut mock_repo = MockUrlRepository::new();
        let seen_keys = Arc::new(Mutex::new(Vec::new()));
        let seen = seen_keys.clone();

        mock_repo
            .expect_create()
            .withf(|new_url| new_url.long_url == "https://example.com/page")
            .times(1)
            .returning(move |new_url| {
                seen.lock().unwrap().push(new_url.key.clone());
                Ok(stored(&new_url))
            });

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let code = service
            .shorten_url("https://example.com/page")
            .await
            .unwrap();

        assert_eq!(code.as_str().len(), 8);
        assert_eq!(seen_keys.lock().unwrap().as_slice(), &[code.encode()]);
    }

    #[tokio::test]
    async fn test_shorten_url_retries_on_conflict() {
        let mut mock_repo = MockUrlRepository::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();

        mock_repo.expect_create().times(3).returning(move |new_url| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n < 3 {
                Err(conflict())
            } else {
                Ok(stored(&new_url))
            }
        });

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let result = service.shorten_url("https://example.com").await;

        assert!(result.is_ok());
        assert_eq!(*calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_shorten_url_times_out_after_bounded_attempts() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_create()
            .times(MAX_SHORT_CODE_GENERATION_ATTEMPTS + 1)
            .returning(|_| Err(conflict()));

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let result = service.shorten_url("https://example.com").await;

        assert!(matches!(
            result,
            Err(AppError::GenerationTimeout { attempts }) if attempts == MAX_SHORT_CODE_GENERATION_ATTEMPTS + 1
        ));
    }

    #[tokio::test]
    async fn test_shorten_url_does_not_retry_other_errors() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let result = service.shorten_url("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_shorten_url_rejects_invalid_url() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_create().times(0);

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let result = service.shorten_url("not-a-url").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_url_tiny_code_space_exhausts() {
        let mut mock_repo = MockUrlRepository::new();
        let taken = ShortCode::new("a").encode();

        mock_repo
            .expect_create()
            .times(MAX_SHORT_CODE_GENERATION_ATTEMPTS + 1)
            .returning(move |new_url| {
                assert_eq!(new_url.key, taken);
                Err(conflict())
            });

        let generator = CodeGenerator::new("a", 1).unwrap();
        let service = UrlService::new(Arc::new(mock_repo), generator);

        let result = service.shorten_url("https://example.com").await;

        assert!(matches!(result, Err(AppError::GenerationTimeout { .. })));
    }

    #[tokio::test]
    async fn test_retrieve_url_found() {
        let mut mock_repo = MockUrlRepository::new();
        let code = ShortCode::new("abc12345");
        let key = code.encode();

        mock_repo
            .expect_find_by_key()
            .withf(move |k| *k == key)
            .times(1)
            .returning(|k| {
                Ok(Some(ShortenedUrl::new(
                    k.clone(),
                    "https://example.com".to_string(),
                    false,
                    Utc::now(),
                )))
            });

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let resolved = service.retrieve_url(&code).await.unwrap();

        assert_eq!(
            resolved,
            Some(ResolvedUrl {
                long_url: "https://example.com".to_string(),
                blocked: false,
            })
        );
    }

    #[tokio::test]
    async fn test_retrieve_url_not_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|_| Ok(None));

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        let resolved = service
            .retrieve_url(&ShortCode::new("missing"))
            .await
            .unwrap();

        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_set_blocked_passes_encoded_key() {
        let mut mock_repo = MockUrlRepository::new();
        let key = ShortCode::new("abc").encode();

        mock_repo
            .expect_set_blocked()
            .withf(move |k, blocked| *k == key && *blocked)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = UrlService::new(Arc::new(mock_repo), CodeGenerator::default());

        assert!(service.set_blocked(&ShortCode::new("abc"), true).await.unwrap());
    }
}
