//! Date and time utility functions
//!
//! Drafts carry epoch-millisecond timestamps. This module converts them to
//! local dates and renders them the way a person reads them ("5 minutes ago").

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::constants::EXPORT_DATE_FORMAT;

/// Current time as milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert epoch milliseconds to a local datetime
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn millis_to_local(millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(millis).single()
}

/// Format current local date for use in export file names (YYYY-MM-DD)
pub fn format_export_date() -> String {
    Local::now().format(EXPORT_DATE_FORMAT).to_string()
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS` in local time
pub fn format_millis(millis: i64) -> String {
    match millis_to_local(millis) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}

/// Human-readable distance between `millis` and `now_millis`
///
/// # Arguments
/// * `millis` - The timestamp to describe
/// * `now_millis` - Reference point, usually [`now_millis()`]
///
/// # Returns
/// * `String` - e.g. "just now", "3 minutes ago", "yesterday", or a date for older values
pub fn format_time_ago(millis: i64, now_millis: i64) -> String {
    let diff_secs = now_millis.saturating_sub(millis) / 1000;

    match diff_secs {
        d if d < 0 => format_millis(millis),
        d if d < 60 => "just now".to_string(),
        d if d < 120 => "1 minute ago".to_string(),
        d if d < 3600 => format!("{} minutes ago", d / 60),
        d if d < 7200 => "1 hour ago".to_string(),
        d if d < 86_400 => format!("{} hours ago", d / 3600),
        d if d < 172_800 => "yesterday".to_string(),
        d if d < 7 * 86_400 => format!("{} days ago", d / 86_400),
        _ => match millis_to_local(millis) {
            Some(dt) => {
                let current_year = millis_to_local(now_millis).map(|n| n.year());
                if current_year == Some(dt.year()) {
                    dt.format("%b %d").to_string()
                } else {
                    dt.format("%b %d, %Y").to_string()
                }
            }
            None => millis.to_string(),
        },
    }
}
