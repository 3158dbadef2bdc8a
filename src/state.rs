//! Shared application state injected into every handler.

use std::sync::Arc;

use axum::http::HeaderMap;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::domain::password::PasswordHasher;
use crate::domain::repositories::{ClickLogRepository, LinkRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::InMemoryStore;
use crate::infrastructure::security::Argon2PasswordHasher;
use crate::utils::origin::public_origin;
use crate::utils::short_code::ShortCodeCodec;

pub type DynLinkService = LinkService<dyn LinkRepository, dyn ClickLogRepository>;
pub type DynRedirectService = RedirectService<dyn LinkRepository, dyn ClickLogRepository>;
pub type DynStatsService = StatsService<dyn LinkRepository>;

/// Services and settings shared across requests.
///
/// Cloning is cheap; every member is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub redirect_service: Arc<DynRedirectService>,
    pub stats_service: Arc<DynStatsService>,
    /// Used by the health check.
    pub link_repository: Arc<dyn LinkRepository>,
    /// Public origin for short URLs; `None` means "use the request's Host header".
    pub base_url: Option<String>,
    /// Renders `GET /metrics`; `None` when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires the services on top of the given repositories.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_log_repository: Arc<dyn ClickLogRepository>,
        codec: ShortCodeCodec,
        hasher: Arc<dyn PasswordHasher>,
        base_url: Option<String>,
    ) -> Self {
        let codec = Arc::new(codec);

        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            click_log_repository.clone(),
            codec.clone(),
            hasher.clone(),
        ));
        let redirect_service = Arc::new(RedirectService::new(
            link_repository.clone(),
            click_log_repository,
            codec,
            hasher,
        ));
        let stats_service = Arc::new(StatsService::new(link_repository.clone()));

        Self {
            link_service,
            redirect_service,
            stats_service,
            link_repository,
            base_url,
            metrics: None,
        }
    }

    /// Exposes the given recorder at `GET /metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// State backed by a fresh [`InMemoryStore`] and Argon2 hashing.
    pub fn in_memory(codec: ShortCodeCodec, base_url: Option<String>) -> Self {
        let store = Arc::new(InMemoryStore::new());

        Self::new(
            store.clone(),
            store,
            codec,
            Arc::new(Argon2PasswordHasher::new()),
            base_url,
        )
    }

    /// Builds the absolute short URL for `code` as seen by the current request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no `BASE_URL` is configured and the
    /// request carries no `Host` header.
    pub fn short_url(&self, headers: &HeaderMap, code: &str) -> Result<String, AppError> {
        let origin = public_origin(headers, self.base_url.as_deref())
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?;

        Ok(self.link_service.short_url(&origin, code))
    }
}
