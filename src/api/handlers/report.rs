//! Handler for click report endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::report::ClickReportResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns how many links were clicked today and during the last week.
///
/// # Endpoint
///
/// `GET /api/report`
///
/// # Response
///
/// ```json
/// { "clicks_today": 3, "clicks_week": 12 }
/// ```
///
/// "Today" is the server-local calendar day; the week is the 7 days before now.
pub async fn report_handler(
    State(state): State<AppState>,
) -> Result<Json<ClickReportResponse>, AppError> {
    let report = state.stats_service.report(Utc::now()).await?;
    Ok(Json(report.into()))
}
