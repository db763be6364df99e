//! Duration and time utilities

use chrono::Utc;
use thiserror::Error;

/// A duration string that is not "M:SS"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration '{0}', expected M:SS")]
pub struct InvalidDuration(pub String);

/// Parse "M:SS" into seconds
///
/// Both parts must be non-negative integers; seconds may not exceed 59.
pub fn parse_duration(text: &str) -> Result<u32, InvalidDuration> {
    let invalid = || InvalidDuration(text.to_string());

    let (minutes, seconds) = text.trim().split_once(':').ok_or_else(invalid)?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.trim().parse().map_err(|_| invalid())?;

    if seconds >= 60 {
        return Err(invalid());
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)
}

/// Format seconds as "M:SS"
pub fn format_duration(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Convert seconds to human-readable duration (e.g., "1 hr, 30 min")
pub fn seconds_to_human_readable(seconds: i64) -> String {
    if seconds < 60 {
        return format!("{} sec", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;

    if remaining_minutes > 0 {
        format!("{} hr, {} min", hours, remaining_minutes)
    } else {
        format!("{} hr", hours)
    }
}

/// Current Unix timestamp in seconds
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}
