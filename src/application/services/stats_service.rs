//! Time-windowed click rollups.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Snapshot of recent link activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickReport {
    /// Links last clicked during the current server-local calendar day.
    pub clicks_today: i64,
    /// Links last clicked within the past seven days.
    pub clicks_week: i64,
}

/// Service computing click reports.
///
/// Both figures count links by `last_clicked` and are recomputed on every call.
pub struct StatsService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> StatsService<L> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Counts links whose last click falls on the same local date as `now`.
    pub async fn clicks_today(&self, now: DateTime<Utc>) -> Result<i64, AppError> {
        let (start, end) = day_bounds(now, &Local);
        self.repository
            .count_clicked_between(start, Some(end))
            .await
    }

    /// Counts links whose last click is at or after `now - 7 days`.
    pub async fn clicks_last_7_days(&self, now: DateTime<Utc>) -> Result<i64, AppError> {
        self.repository
            .count_clicked_between(now - Duration::days(7), None)
            .await
    }

    /// Computes both figures for `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ServiceUnavailable`] if the store cannot be reached.
    pub async fn report(&self, now: DateTime<Utc>) -> Result<ClickReport, AppError> {
        Ok(ClickReport {
            clicks_today: self.clicks_today(now).await?,
            clicks_week: self.clicks_last_7_days(now).await?,
        })
    }
}

/// Returns `[start, end)` of the calendar day containing `now` in `tz`, as UTC.
fn day_bounds<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(tz).date_naive();
    let start = start_of_day(today, tz);
    let end = today
        .succ_opt()
        .map(|tomorrow| start_of_day(tomorrow, tz))
        .unwrap_or(start + Duration::days(1));

    (start, end)
}

/// First instant of `date` in `tz`. Days that skip midnight start at the
/// earliest valid local time, found by probing forward hour by hour.
fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN);

    (0..24)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + Duration::hours(hour)))
                .earliest()
        })
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}
