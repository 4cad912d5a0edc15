//! Timestamp formatting utilities
//!
//! Controls how the wall-clock time of an event is rendered by
//! [`LogFormatter`](crate::core::LogFormatter).

use super::log_event::MISSING_FIELD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp rendering options
///
/// # Examples
///
/// ```
/// use chihiro_log::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Unix.format(&time), "1736332245");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z` (default)
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Seconds since the Unix epoch
    Unix,

    /// Milliseconds since the Unix epoch
    UnixMillis,

    /// Any strftime-compatible pattern, e.g. `%Y-%m-%d %H:%M:%S`
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, time: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => time.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => time.to_rfc3339(),
            TimestampFormat::Unix => time.timestamp().to_string(),
            TimestampFormat::UnixMillis => time.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut rendered = String::new();
                match write!(rendered, "{}", time.format(pattern)) {
                    Ok(()) => rendered,
                    // chrono reports unknown specifiers as a fmt::Error
                    Err(_) => MISSING_FIELD.to_string(),
                }
            }
        }
    }

    /// Numeric value for formats that render a plain integer
    #[must_use]
    pub fn as_number(&self, time: &DateTime<Utc>) -> Option<i64> {
        match self {
            TimestampFormat::Unix => Some(time.timestamp()),
            TimestampFormat::UnixMillis => Some(time.timestamp_millis()),
            _ => None,
        }
    }
}
