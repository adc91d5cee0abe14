//! Deterministic date formatting for grouping and search.
//!
//! All strings are derived in UTC with chrono's English month and weekday
//! names, so the same timestamp always yields the same text regardless of
//! the host's locale. Callers that want local-time grouping can pass their
//! own key function to
//! [`GroupedProjection::project_with`](crate::GroupedProjection::project_with).

use chrono::{DateTime, Utc};

fn datetime(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// The month-year group key for a timestamp, e.g. `"March 2024"`.
#[must_use]
pub fn month_key(timestamp: i64) -> String {
    datetime(timestamp).format("%B %Y").to_string()
}

/// The long-form date shown on entry cells and matched by search,
/// e.g. `"Friday 15 February"`.
#[must_use]
pub fn long_date(timestamp: i64) -> String {
    datetime(timestamp).format("%A %d %B").to_string()
}
