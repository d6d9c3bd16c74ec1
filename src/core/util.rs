//! Common utilities

use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Format a timestamp for diagnostics (UTC, second precision)
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}
