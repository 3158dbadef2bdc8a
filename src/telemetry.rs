//! Prometheus export of the service counters.
//!
//! Counters are recorded through the `metrics` facade wherever the event
//! happens. [`install_recorder`] routes them into a Prometheus recorder whose
//! handle renders the text exposition served at `GET /metrics`.

use anyhow::{Context, Result};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Redirect decisions, labelled by `outcome`.
pub const REDIRECT_OUTCOMES_TOTAL: &str = "redirect_outcomes_total";

/// Failed click bookkeeping after a successful redirect, labelled by `step`.
pub const CLICK_RECORDING_FAILURES_TOTAL: &str = "click_recording_failures_total";

/// Installs the process-wide Prometheus recorder.
///
/// # Errors
///
/// Fails if a recorder has already been installed in this process.
pub fn install_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install metrics recorder")?;

    describe();
    Ok(handle)
}

fn describe() {
    describe_counter!(
        REDIRECT_OUTCOMES_TOTAL,
        "Redirect decisions by outcome (success, invalid, expired, password_required, forbidden)"
    );
    describe_counter!(
        CLICK_RECORDING_FAILURES_TOTAL,
        "Click bookkeeping failures after a successful redirect, by step"
    );
}
