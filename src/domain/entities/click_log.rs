//! Click log entity: one row per distinct visitor IP of a link.

use chrono::{DateTime, Utc};

/// A distinct visitor of a short link.
///
/// `(short_link_id, ip_address)` is unique; `clicked_at` is the time of the
/// first successful redirect from that address. Rows are never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickLog {
    pub id: i64,
    pub short_link_id: i64,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

/// Input data for recording a visitor.
#[derive(Debug, Clone)]
pub struct NewClickLog {
    pub short_link_id: i64,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl NewClickLog {
    pub fn new(
        short_link_id: i64,
        ip_address: impl Into<String>,
        user_agent: Option<&str>,
        clicked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_link_id,
            ip_address: ip_address.into(),
            user_agent: user_agent.map(|s| s.to_string()),
            clicked_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_click_log_creation() {
        let now = Utc::now();
        let log = NewClickLog::new(99, "10.0.0.1", Some("Chrome/120"), now);

        assert_eq!(log.short_link_id, 99);
        assert_eq!(log.ip_address, "10.0.0.1");
        assert_eq!(log.user_agent, Some("Chrome/120".to_string()));
        assert_eq!(log.clicked_at, now);
    }

    #[test]
    fn test_new_click_log_without_user_agent() {
        let log = NewClickLog::new(1, "::1".to_string(), None, Utc::now());
        assert!(log.user_agent.is_none());
    }
}
