//! DTOs for link details endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a short link and its counters.
#[derive(Debug, Serialize)]
pub struct LinkDetailsResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    /// Every successful redirect, repeats included.
    pub clicks: i64,
    /// Distinct visitor addresses.
    pub unique_clicks: i64,
    pub expiration: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
    /// Whether redirects require a password.
    pub protected: bool,
}
