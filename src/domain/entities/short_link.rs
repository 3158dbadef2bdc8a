//! Short link entity with its expiration and password rules.

use chrono::{DateTime, Utc};

use crate::domain::password::{PasswordHashError, PasswordHasher};

/// A shortened URL with click counters and optional access restrictions.
///
/// `id` is assigned by the store and is what the public short code encodes.
/// `clicks` counts every successful redirect, including repeat visits from the
/// same IP; distinct visitors are tracked separately as click logs.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub expiration: Option<DateTime<Utc>>,
    pub last_clicked: Option<DateTime<Utc>>,
    pub password_hash: Option<String>,
}

impl ShortLink {
    /// Creates a link that has never been clicked.
    pub fn new(
        id: i64,
        original_url: String,
        created_at: DateTime<Utc>,
        expiration: Option<DateTime<Utc>>,
        password_hash: Option<String>,
    ) -> Self {
        Self {
            id,
            original_url,
            created_at,
            clicks: 0,
            expiration,
            last_clicked: None,
            password_hash,
        }
    }

    /// Returns true if an expiration is set and `now` has reached it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|expiration| now >= expiration)
    }

    /// Returns true if redirects require a password.
    pub fn is_protected(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Replaces the stored password with a salted hash of `raw`.
    ///
    /// Blank input removes the password instead of hashing it.
    pub fn set_password(
        &mut self,
        raw: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<(), PasswordHashError> {
        self.password_hash = hash_password(raw, hasher)?;
        Ok(())
    }

    /// Verifies `raw` against the stored hash.
    ///
    /// Links without a password accept any input.
    pub fn check_password(&self, raw: &str, hasher: &dyn PasswordHasher) -> bool {
        match &self.password_hash {
            None => true,
            Some(hash) => hasher.verify(raw, hash),
        }
    }
}

/// Hashes a raw password, mapping blank input to "no password".
pub fn hash_password(
    raw: &str,
    hasher: &dyn PasswordHasher,
) -> Result<Option<String>, PasswordHashError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    hasher.hash(raw).map(Some)
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub original_url: String,
    pub expiration: Option<DateTime<Utc>>,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::security::Argon2PasswordHasher;
    use chrono::Duration;

    fn link(expiration: Option<DateTime<Utc>>) -> ShortLink {
        ShortLink::new(
            1,
            "https://example.com".to_string(),
            Utc::now(),
            expiration,
            None,
        )
    }

    #[test]
    fn test_short_link_creation() {
        let now = Utc::now();
        let link = ShortLink::new(7, "https://example.com".to_string(), now, None, None);

        assert_eq!(link.id, 7);
        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, now);
        assert!(link.last_clicked.is_none());
        assert!(!link.is_protected());
    }

    #[test]
    fn test_never_expires_without_expiration() {
        let link = link(None);
        let now = Utc::now();

        assert!(!link.is_expired(now));
        assert!(!link.is_expired(now + Duration::days(365 * 100)));
        assert!(!link.is_expired(DateTime::<Utc>::MIN_UTC));
    }

    #[test]
    fn test_is_expired_in_past() {
        let now = Utc::now();
        let link = link(Some(now - Duration::days(1)));
        assert!(link.is_expired(now));
    }

    #[test]
    fn test_is_not_expired_in_future() {
        let now = Utc::now();
        let link = link(Some(now + Duration::days(1)));
        assert!(!link.is_expired(now));
    }

    #[test]
    fn test_is_expired_at_exact_boundary() {
        let now = Utc::now();
        let link = link(Some(now));

        assert!(link.is_expired(now));
        assert!(!link.is_expired(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_check_password_without_password_accepts_anything() {
        let hasher = Argon2PasswordHasher::default();
        let link = link(None);

        assert!(link.check_password("", &hasher));
        assert!(link.check_password("anything", &hasher));
    }

    #[test]
    fn test_set_and_check_password() {
        let hasher = Argon2PasswordHasher::default();
        let mut link = link(None);

        link.set_password("secret123", &hasher).unwrap();

        assert!(link.is_protected());
        assert_ne!(link.password_hash.as_deref(), Some("secret123"));
        assert!(link.check_password("secret123", &hasher));
        assert!(!link.check_password("wrongpass", &hasher));
        assert!(!link.check_password("secret1234", &hasher));
        assert!(!link.check_password("", &hasher));
    }

    #[test]
    fn test_blank_password_clears_protection() {
        let hasher = Argon2PasswordHasher::default();
        let mut link = link(None);

        link.set_password("secret", &hasher).unwrap();
        assert!(link.is_protected());

        link.set_password("   ", &hasher).unwrap();
        assert!(!link.is_protected());
        assert!(link.check_password("whatever", &hasher));
    }
}
