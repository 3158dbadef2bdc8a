//! Redirect decision pipeline.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::blocking::run_blocking;
use crate::domain::entities::{NewClickLog, ShortLink};
use crate::domain::password::PasswordHasher;
use crate::domain::redirect::{Credential, RedirectOutcome, RedirectRequest, Rejection};
use crate::domain::repositories::{ClickLogRepository, LinkRepository};
use crate::error::AppError;
use crate::telemetry::{CLICK_RECORDING_FAILURES_TOTAL, REDIRECT_OUTCOMES_TOTAL};
use crate::utils::short_code::ShortCodeCodec;

/// Turns a redirect request into a single terminal outcome.
///
/// Pipeline: decode, lookup, expiration check, password gate, click recording.
/// Rejections are returned as [`RedirectOutcome::Rejected`]; only store failures
/// before the decision is made surface as [`AppError`].
pub struct RedirectService<L: LinkRepository + ?Sized, C: ClickLogRepository + ?Sized> {
    link_repository: Arc<L>,
    click_log_repository: Arc<C>,
    codec: Arc<ShortCodeCodec>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<L: LinkRepository + ?Sized, C: ClickLogRepository + ?Sized> RedirectService<L, C> {
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

    /// Runs the pipeline for one request at instant `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServiceUnavailable`] or [`AppError::Internal`] when the
    /// link lookup fails. Failures while recording the click are logged and
    /// never change a successful outcome.
    pub async fn resolve(
        &self,
        request: &RedirectRequest,
        now: DateTime<Utc>,
    ) -> Result<RedirectOutcome, AppError> {
        let outcome = self.decide(request, now).await?;

        metrics::counter!(REDIRECT_OUTCOMES_TOTAL, "outcome" => outcome.as_str()).increment(1);
        tracing::debug!(code = %request.code, outcome = outcome.as_str(), "Redirect resolved");

        Ok(outcome)
    }

    async fn decide(
        &self,
        request: &RedirectRequest,
        now: DateTime<Utc>,
    ) -> Result<RedirectOutcome, AppError> {
        let Some(id) = self
            .codec
            .decode(&request.code)
            .ok()
            .and_then(|id| i64::try_from(id).ok())
        else {
            return Ok(RedirectOutcome::Rejected(Rejection::Invalid));
        };

        let Some(link) = self.link_repository.find_by_id(id).await? else {
            return Ok(RedirectOutcome::Rejected(Rejection::Invalid));
        };

        if link.is_expired(now) {
            return Ok(RedirectOutcome::Rejected(Rejection::Expired));
        }

        if link.is_protected() {
            match &request.credential {
                Credential::None => {
                    return Ok(RedirectOutcome::Rejected(Rejection::PasswordRequired));
                }
                Credential::Password(raw) => {
                    let hasher = Arc::clone(&self.hasher);
                    let candidate = link.clone();
                    let raw = raw.clone();
                    let verified =
                        run_blocking(move || candidate.check_password(&raw, hasher.as_ref()))
                            .await?;

                    if !verified {
                        return Ok(RedirectOutcome::Rejected(Rejection::Forbidden));
                    }
                }
            }
        }

        self.record_click(&link, request, now).await;

        Ok(RedirectOutcome::Success {
            original_url: link.original_url,
        })
    }

    /// Best-effort analytics: a visitor row per address, then the total counter.
    async fn record_click(&self, link: &ShortLink, request: &RedirectRequest, now: DateTime<Utc>) {
        let log = NewClickLog::new(
            link.id,
            request.client_ip.as_str(),
            request.user_agent.as_deref(),
            now,
        );

        match self.click_log_repository.record_if_absent(log).await {
            Ok(inserted) => {
                tracing::debug!(link_id = link.id, new_visitor = inserted, "Click log recorded");
            }
            Err(e) => {
                tracing::error!(link_id = link.id, step = "click_log", error = %e, "Failed to record click");
                metrics::counter!(CLICK_RECORDING_FAILURES_TOTAL, "step" => "click_log")
                    .increment(1);
            }
        }

        match self.link_repository.register_click(link.id, now).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(link_id = link.id, "Link disappeared before its click was counted");
            }
            Err(e) => {
                tracing::error!(link_id = link.id, step = "counter", error = %e, "Failed to record click");
                metrics::counter!(CLICK_RECORDING_FAILURES_TOTAL, "step" => "counter")
                    .increment(1);
            }
        }
    }
}
