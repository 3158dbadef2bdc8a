//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`  - Short link redirect (public)
//! - `POST /{code}`  - Short link redirect with password (public, rate limited)
//! - `GET  /health`  - Health check (public)
//! - `GET  /metrics` - Prometheus counters
//! - `/api/*`        - JSON API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on password attempts
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, metrics_handler, redirect_handler, unlock_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::{MethodRouter, get, post};
use tower::Layer;
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, behind_proxy))
}

/// All routes with tracing, without path normalization.
pub fn router(state: AppState, behind_proxy: bool) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/{code}",
            get(redirect_handler).merge(unlock_route(behind_proxy)),
        )
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

fn unlock_route(behind_proxy: bool) -> MethodRouter<AppState> {
    if behind_proxy {
        post(unlock_handler).layer(rate_limit::password_layer(SmartIpKeyExtractor))
    } else {
        post(unlock_handler).layer(rate_limit::password_layer(PeerIpKeyExtractor))
    }
}
