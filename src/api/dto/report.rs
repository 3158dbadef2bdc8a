//! DTOs for click report endpoint.

use serde::Serialize;

use crate::application::services::ClickReport;

/// Number of links clicked today and within the last seven days.
#[derive(Debug, Serialize)]
pub struct ClickReportResponse {
    pub clicks_today: i64,
    pub clicks_week: i64,
}

impl From<ClickReport> for ClickReportResponse {
    fn from(report: ClickReport) -> Self {
        Self {
            clicks_today: report.clicks_today,
            clicks_week: report.clicks_week,
        }
    }
}
