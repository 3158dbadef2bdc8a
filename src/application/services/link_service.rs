//! Link creation, lookup and administration service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use super::blocking::run_blocking;
use crate::domain::entities::{ClickLog, NewShortLink, ShortLink, short_link::hash_password};
use crate::domain::password::{PasswordHashError, PasswordHasher};
use crate::domain::repositories::{ClickLogRepository, LinkFilter, LinkRepository};
use crate::error::AppError;
use crate::utils::short_code::ShortCodeCodec;
use crate::utils::url_validator::validate_url;

/// Message shared by every "no such link" answer, so callers cannot tell an
/// undecodable code from a decodable one that points nowhere.
pub const INVALID_LINK_MESSAGE: &str = "Invalid URL";

/// Service for creating short links and mapping them to and from short codes.
///
/// The public code of a link is derived from its id with the injected
/// [`ShortCodeCodec`]; nothing but the id is persisted.
pub struct LinkService<L: LinkRepository + ?Sized, C: ClickLogRepository + ?Sized> {
    link_repository: Arc<L>,
    click_log_repository: Arc<C>,
    codec: Arc<ShortCodeCodec>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<L: LinkRepository + ?Sized, C: ClickLogRepository + ?Sized> LinkService<L, C> {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<L>,
        click_log_repository: Arc<C>,
        codec: Arc<ShortCodeCodec>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            link_repository,
            click_log_repository,
            codec,
            hasher,
        }
    }

    /// Creates a short link.
    ///
    /// The URL is stored as submitted once it passes validation. A blank
    /// password creates an unprotected link. Expirations in the past are
    /// accepted; such links answer every redirect with "expired".
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    /// Returns [`AppError::Internal`] if the password cannot be hashed.
    pub async fn create_short_link(
        &self,
        original_url: &str,
        expiration: Option<DateTime<Utc>>,
        password: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        let original_url = validate_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let password_hash = match password {
            Some(raw) => {
                let hasher = Arc::clone(&self.hasher);
                let raw = raw.to_owned();
                run_blocking(move || hash_password(&raw, hasher.as_ref())).await??
            }
            None => None,
        };

        let link = self
            .link_repository
            .create(NewShortLink {
                original_url,
                expiration,
                password_hash,
            })
            .await?;

        tracing::info!(
            link_id = link.id,
            protected = link.is_protected(),
            "Short link created"
        );

        Ok(link)
    }

    /// Decodes a short code into a link id.
    ///
    /// Returns `None` for anything the codec did not produce, including codes
    /// whose value does not fit a store id.
    pub fn decode_code(&self, code: &str) -> Option<i64> {
        self.codec
            .decode(code)
            .ok()
            .and_then(|id| i64::try_from(id).ok())
    }

    /// Returns the public short code of a link.
    pub fn short_code(&self, link: &ShortLink) -> String {
        self.codec.encode(link.id.unsigned_abs())
    }

    /// Builds the absolute short URL from a public origin and a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Fetches the link a short code points to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] both when the code does not decode and
    /// when no link has the decoded id.
    pub async fn find_by_code(&self, code: &str) -> Result<ShortLink, AppError> {
        let Some(id) = self.decode_code(code) else {
            return Err(invalid_link(code));
        };

        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| invalid_link(code))
    }

    /// Number of distinct visitor addresses that reached the link.
    pub async fn unique_clicks(&self, link: &ShortLink) -> Result<i64, AppError> {
        self.click_log_repository.count_for_link(link.id).await
    }

    /// Most recent distinct visitors of the link, newest first.
    pub async fn recent_visitors(
        &self,
        link: &ShortLink,
        limit: i64,
    ) -> Result<Vec<ClickLog>, AppError> {
        self.click_log_repository
            .list_for_link(link.id, limit.max(1))
            .await
    }

    /// Sets or, for blank input, clears the password of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not resolve to a link.
    pub async fn set_password(&self, code: &str, raw: &str) -> Result<ShortLink, AppError> {
        let mut link = self.find_by_code(code).await?;

        let hasher = Arc::clone(&self.hasher);
        let raw = raw.to_owned();
        link = run_blocking(move || {
            link.set_password(&raw, hasher.as_ref())?;
            Ok::<_, PasswordHashError>(link)
        })
        .await??;

        let updated = self
            .link_repository
            .set_password_hash(link.id, link.password_hash.clone())
            .await?;
        if !updated {
            return Err(invalid_link(code));
        }

        tracing::info!(
            link_id = link.id,
            protected = link.is_protected(),
            "Link password updated"
        );

        Ok(link)
    }

    /// Deletes a link together with its click logs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not resolve to a link.
    pub async fn delete(&self, code: &str) -> Result<ShortLink, AppError> {
        let link = self.find_by_code(code).await?;

        if !self.link_repository.delete(link.id).await? {
            return Err(invalid_link(code));
        }

        tracing::info!(link_id = link.id, "Short link deleted");
        Ok(link)
    }

    /// Lists links, newest first.
    pub async fn list(&self, filter: LinkFilter) -> Result<Vec<ShortLink>, AppError> {
        self.link_repository.list(filter).await
    }
}

fn invalid_link(code: &str) -> AppError {
    AppError::not_found(INVALID_LINK_MESSAGE, json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockClickLogRepository, MockLinkRepository};
    use chrono::Duration;

    /// Reversible stand-in so tests do not pay for Argon2.
    struct PrefixHasher;

    impl PasswordHasher for PrefixHasher {
        fn hash(&self, raw: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{raw}"))
        }

        fn verify(&self, raw: &str, hash: &str) -> bool {
            hash.strip_prefix("hashed:") == Some(raw)
        }
    }

    fn codec() -> Arc<ShortCodeCodec> {
        Arc::new(ShortCodeCodec::new("test salt", 6).unwrap())
    }

    fn service(
        links: MockLinkRepository,
        logs: MockClickLogRepository,
    ) -> LinkService<MockLinkRepository, MockClickLogRepository> {
        LinkService::new(Arc::new(links), Arc::new(logs), codec(), Arc::new(PrefixHasher))
    }

    fn stored(id: i64, url: &str, password_hash: Option<&str>) -> ShortLink {
        ShortLink::new(
            id,
            url.to_string(),
            Utc::now(),
            None,
            password_hash.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn test_create_short_link_success() {
        let mut links = MockLinkRepository::new();
        links
            .expect_create()
            .withf(|new_link| {
                new_link.original_url == "https://example.com"
                    && new_link.password_hash.is_none()
                    && new_link.expiration.is_none()
            })
            .times(1)
            .returning(|_| Ok(stored(1, "https://example.com", None)));

        let service = service(links, MockClickLogRepository::new());
        let link = service
            .create_short_link("https://example.com", None, None)
            .await
            .unwrap();

        assert_eq!(link.id, 1);
        assert_eq!(link.clicks, 0);
        assert_eq!(service.decode_code(&service.short_code(&link)), Some(1));
    }

    #[tokio::test]
    async fn test_create_short_link_hashes_password() {
        let expiration = Utc::now() + Duration::days(1);

        let mut links = MockLinkRepository::new();
        links
            .expect_create()
            .withf(move |new_link| {
                new_link.password_hash.as_deref() == Some("hashed:s3cret")
                    && new_link.expiration == Some(expiration)
            })
            .times(1)
            .returning(|new_link| {
                Ok(ShortLink::new(
                    2,
                    new_link.original_url,
                    Utc::now(),
                    new_link.expiration,
                    new_link.password_hash,
                ))
            });

        let service = service(links, MockClickLogRepository::new());
        let link = service
            .create_short_link("https://example.com", Some(expiration), Some("s3cret"))
            .await
            .unwrap();

        assert!(link.is_protected());
    }

    #[tokio::test]
    async fn test_create_short_link_blank_password_is_unprotected() {
        let mut links = MockLinkRepository::new();
        links
            .expect_create()
            .withf(|new_link| new_link.password_hash.is_none())
            .times(1)
            .returning(|_| Ok(stored(3, "https://example.com", None)));

        let service = service(links, MockClickLogRepository::new());
        let result = service
            .create_short_link("https://example.com", None, Some("   "))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_link_invalid_url() {
        let mut links = MockLinkRepository::new();
        links.expect_create().times(0);

        let service = service(links, MockClickLogRepository::new());
        let result = service.create_short_link("not-a-url", None, None).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_find_by_code_garbage_is_not_found_without_lookup() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_id().times(0);

        let service = service(links, MockClickLogRepository::new());
        let err = service.find_by_code("!!garbage!!").await.unwrap_err();

        match err {
            AppError::NotFound { message, .. } => assert_eq!(message, INVALID_LINK_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_by_code_unknown_id_is_not_found() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_id()
            .withf(|id| *id == 77)
            .times(1)
            .returning(|_| Ok(None));

        let service = service(links, MockClickLogRepository::new());
        let code = codec().encode(77);
        let err = service.find_by_code(&code).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unique_clicks_counts_click_logs() {
        let mut logs = MockClickLogRepository::new();
        logs.expect_count_for_link()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(3));

        let service = service(MockLinkRepository::new(), logs);
        let link = stored(5, "https://example.com", None);

        assert_eq!(service.unique_clicks(&link).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_recent_visitors_clamps_limit() {
        let mut logs = MockClickLogRepository::new();
        logs.expect_list_for_link()
            .withf(|id, limit| *id == 5 && *limit == 1)
            .times(1)
            .returning(|id, _| {
                Ok(vec![ClickLog {
                    id: 1,
                    short_link_id: id,
                    ip_address: "203.0.113.7".to_string(),
                    user_agent: None,
                    clicked_at: Utc::now(),
                }])
            });

        let service = service(MockLinkRepository::new(), logs);
        let link = stored(5, "https://example.com", None);

        let visitors = service.recent_visitors(&link, 0).await.unwrap();
        assert_eq!(visitors.len(), 1);
        assert_eq!(visitors[0].ip_address, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_set_password_and_clear() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_id()
            .times(2)
            .returning(|id| Ok(Some(stored(id, "https://example.com", Some("hashed:old")))));
        links
            .expect_set_password_hash()
            .withf(|id, hash| *id == 4 && hash.as_deref() == Some("hashed:new"))
            .times(1)
            .returning(|_, _| Ok(true));
        links
            .expect_set_password_hash()
            .withf(|id, hash| *id == 4 && hash.is_none())
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(links, MockClickLogRepository::new());
        let code = codec().encode(4);

        let protected = service.set_password(&code, "new").await.unwrap();
        assert!(protected.check_password("new", &PrefixHasher));

        let cleared = service.set_password(&code, "").await.unwrap();
        assert!(!cleared.is_protected());
    }

    #[tokio::test]
    async fn test_delete_unknown_code() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_id().returning(|_| Ok(None));
        links.expect_delete().times(0);

        let service = service(links, MockClickLogRepository::new());
        let result = service.delete(&codec().encode(9)).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_short_url() {
        let service = service(MockLinkRepository::new(), MockClickLogRepository::new());

        assert_eq!(
            service.short_url("https://s.example.com/", "abc123"),
            "https://s.example.com/abc123"
        );
        assert_eq!(
            service.short_url("http://localhost:3000", "abc123"),
            "http://localhost:3000/abc123"
        );
    }
}
