//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub original_url: String,

    /// Optional expiry timestamp. From this instant on, the link returns 410 Gone.
    pub expiration: Option<DateTime<Utc>>,

    /// Optional password. Write-only: never included in any response.
    pub password: Option<String>,
}

/// A short link as returned by the creation endpoint.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub unique_clicks: i64,
    pub expiration: Option<DateTime<Utc>>,
}
