//! Public origin resolution for absolute short URLs.

use axum::http::{HeaderMap, header};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Returns the origin (`scheme://host[:port]`) short URLs are built on.
///
/// A configured `base_url` wins. Otherwise the request's `Host` header is used,
/// with the scheme taken from `X-Forwarded-Proto` and defaulting to `http`.
/// Returns `None` when neither source is available.
pub fn public_origin(headers: &HeaderMap, base_url: Option<&str>) -> Option<String> {
    if let Some(base_url) = base_url {
        return Some(base_url.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|h| !h.is_empty())?;

    let scheme = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| v.eq_ignore_ascii_case("https") || v.eq_ignore_ascii_case("http"))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "http".to_string());

    Some(format!("{scheme}://{host}"))
}
