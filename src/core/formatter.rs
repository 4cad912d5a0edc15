//! Rendering of log events into text
//!
//! [`EventFormatter`] is the seam appenders format through; [`LogFormatter`]
//! is the standard implementation with three layouts:
//!
//! - `Text` (default), tab-separated, one event per line:
//!   `timestamp	elapse	thread_id	fiber_id	[LEVEL]	file:line	[logger]	message`
//! - `Json`: one object with the keys `timestamp`, `elapse`, `thread_id`,
//!   `fiber_id`, `level`, `file`, `line`, `logger`, `message`
//! - `Logfmt`: the same keys as `key=value` pairs, in the same order
//!
//! Field order is fixed so that external tooling can parse the output.
//! Absent values render as [`MISSING_FIELD`].

use super::error::Result;
use super::log_event::{LogEvent, MISSING_FIELD};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Turns one event into display text.
///
/// Implementations must be total: any event renders to some string.
pub trait EventFormatter: Send + Sync {
    fn format(&self, event: &LogEvent) -> String;
}

/// Output layout for [`LogFormatter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Logfmt,
}

/// Standard formatter. Configuration is fixed once built, so one instance can
/// back any number of appenders through [`LogFormatter::shared`].
///
/// # Example
///
/// ```
/// use chihiro_log::core::{LogFormatter, OutputFormat, TimestampFormat};
///
/// let formatter = LogFormatter::new()
///     .with_output_format(OutputFormat::Logfmt)
///     .with_timestamp_format(TimestampFormat::UnixMillis);
/// assert_eq!(formatter.output_format(), OutputFormat::Logfmt);
/// let _shared = formatter.shared();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFormatter {
    output_format: OutputFormat,
    timestamp_format: TimestampFormat,
}

impl LogFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a strftime-compatible timestamp pattern
    #[must_use]
    pub fn with_custom_timestamp(mut self, pattern: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(pattern.to_string());
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Wrap in an `Arc` for sharing across appenders
    #[must_use]
    pub fn shared(self) -> Arc<dyn EventFormatter> {
        Arc::new(self)
    }

    fn format_text(&self, event: &LogEvent) -> String {
        format!(
            "{}\t{}\t{}\t{}\t[{}]\t{}:{}\t[{}]\t{}",
            self.timestamp_format.format(&event.time()),
            event.elapse(),
            event.thread_id(),
            event.fiber_id(),
            event.level_str(),
            event.file().unwrap_or(MISSING_FIELD),
            event.line(),
            event.logger_name(),
            event.message()
        )
    }

    fn format_json(&self, event: &LogEvent) -> Result<String> {
        let time = event.time();
        let timestamp = match self.timestamp_format.as_number(&time) {
            Some(number) => serde_json::Value::from(number),
            None => serde_json::Value::from(self.timestamp_format.format(&time)),
        };

        let value = serde_json::json!({
            "timestamp": timestamp,
            "elapse": event.elapse(),
            "thread_id": event.thread_id(),
            "fiber_id": event.fiber_id(),
            "level": event.level_str(),
            "file": event.file().unwrap_or(MISSING_FIELD),
            "line": event.line(),
            "logger": event.logger_name(),
            "message": event.message(),
        });
        Ok(serde_json::to_string(&value)?)
    }

    fn format_logfmt(&self, event: &LogEvent) -> String {
        [
            format!(
                "timestamp={}",
                escape_logfmt_value(&self.timestamp_format.format(&event.time()))
            ),
            format!("elapse={}", event.elapse()),
            format!("thread_id={}", event.thread_id()),
            format!("fiber_id={}", event.fiber_id()),
            format!("level={}", event.level_str()),
            format!(
                "file={}",
                escape_logfmt_value(event.file().unwrap_or(MISSING_FIELD))
            ),
            format!("line={}", event.line()),
            format!("logger={}", escape_logfmt_value(&event.logger_name())),
            // always quoted
            format!("message={}", quote_logfmt_value(event.message())),
        ]
        .join(" ")
    }
}

impl EventFormatter for LogFormatter {
    fn format(&self, event: &LogEvent) -> String {
        match self.output_format {
            OutputFormat::Text => self.format_text(event),
            OutputFormat::Json => self.format_json(event).unwrap_or_else(|e| {
                eprintln!("[LOGGER ERROR] Json formatting failed: {}", e);
                String::new()
            }),
            OutputFormat::Logfmt => self.format_logfmt(event),
        }
    }
}

fn escape_logfmt_value(value: &str) -> String {
    if value.is_empty() || value.contains([' ', '"', '=']) {
        quote_logfmt_value(value)
    } else {
        value.to_string()
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
