pub mod doctor;
pub mod export;
pub mod graph;
pub mod notes;
pub mod reset;
pub mod stats;

use chrono::{DateTime, Utc};

/// `YYYY-MM-DD HH:MM` in UTC, or `-` for unknown timestamps.
pub(crate) fn format_millis(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
