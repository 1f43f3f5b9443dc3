//! Wall clock helpers

use chrono::{DateTime, Utc};

/// Current time as Unix milliseconds
pub fn now_unix_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Format a session directory stamp (`2024-01-03-14-30-00`, UTC)
pub fn session_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d-%H-%M-%S").to_string()
}
