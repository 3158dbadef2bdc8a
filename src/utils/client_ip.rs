//! Client address resolution from request headers.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolves the visitor address used for click deduplication.
///
/// Prefers the first entry of `X-Forwarded-For` and falls back to the peer
/// address when the header is missing or its first entry is not an IP address.
///
/// The result is untrusted: it feeds analytics only, never access decisions.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = resolve_client_ip(&headers, "127.0.0.1:4000".parse().unwrap());
/// assert_eq!(ip, "203.0.113.7");
/// ```
pub fn resolve_client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    forwarded_ip(headers)
        .unwrap_or_else(|| peer.ip())
        .to_string()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let chain = headers.get(X_FORWARDED_FOR)?.to_str().ok()?;
    let first = chain.split(',').next()?.trim();
    first.parse().ok()
}
