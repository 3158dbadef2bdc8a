//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor};

/// Password attempts allowed in a burst per client.
pub const PASSWORD_ATTEMPTS_BURST: u32 = 5;

/// Time after which one password attempt is regained.
pub const PASSWORD_ATTEMPT_REFILL: Duration = Duration::from_secs(60);

/// Creates the rate limiter for password submissions on protected links.
///
/// # Limits
///
/// - **Burst**: 5 attempts
/// - **Refill**: one attempt per minute
///
/// Any half-open 60 second window admits at most 5 attempts. A closed window
/// whose ends touch a full burst and the next refill admits 6.
///
/// Requests exceeding the limit receive `429 Too Many Requests` before any
/// redirect logic runs.
///
/// # Key Extraction
///
/// Pass [`tower_governor::key_extractor::PeerIpKeyExtractor`] to key on the
/// socket peer address, or [`tower_governor::key_extractor::SmartIpKeyExtractor`]
/// to honour `X-Forwarded-For` / `X-Real-IP` behind a trusted reverse proxy.
///
/// # Example
///
/// ```rust,ignore
/// let unlock = post(unlock_handler).layer(rate_limit::password_layer(PeerIpKeyExtractor));
/// ```
pub fn password_layer<K: KeyExtractor>(
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .period(PASSWORD_ATTEMPT_REFILL)
            .burst_size(PASSWORD_ATTEMPTS_BURST)
            .key_extractor(key_extractor)
            .finish()
            .expect("password rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
