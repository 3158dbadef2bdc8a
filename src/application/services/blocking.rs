//! Offloading of CPU-heavy work from the async workers.

use serde_json::json;

use crate::error::AppError;

/// Runs `f` on Tokio's blocking pool.
///
/// Password hashing and verification take tens of milliseconds with Argon2
/// and would otherwise stall every request scheduled on the same worker.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if `f` panics.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "Blocking task failed");
        AppError::internal("Password processing failed", json!({}))
    })
}
