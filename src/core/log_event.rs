//! Log event structure

use super::identity;
use super::log_level::LogLevel;
use super::logger::Logger;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::sync::{Arc, Weak};

/// Placeholder rendered for absent fields (no file, logger dropped)
pub const MISSING_FIELD: &str = "-";

/// Escape newlines, carriage returns and tabs so a field can never split a
/// rendered line or add a field to it. Borrows when nothing needs escaping.
pub(crate) fn escape_control(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}

/// One log occurrence.
///
/// Built once with [`LogEvent::new`] or [`LogEvent::capture`] and the
/// `with_*` setters, then only ever borrowed by loggers and appenders.
/// The logger reference is weak and only used to name the logger in output.
#[derive(Debug, Clone)]
pub struct LogEvent {
    file: Option<Cow<'static, str>>,
    line: u32,
    elapse: u64,
    thread_id: u32,
    fiber_id: u32,
    time: DateTime<Utc>,
    message: String,
    level: LogLevel,
    logger: Weak<Logger>,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection
    ///
    /// Newlines, carriage returns and tabs become escape sequences so an event
    /// always renders as a single line with a fixed number of fields.
    fn sanitize_message(message: &str) -> String {
        escape_control(message).into_owned()
    }

    pub fn new(logger: &Arc<Logger>, level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            file: None,
            line: 0,
            elapse: 0,
            thread_id: 0,
            fiber_id: 0,
            time: Utc::now(),
            message: Self::sanitize_message(message.as_ref()),
            level,
            logger: Arc::downgrade(logger),
        }
    }

    /// Build an event with timing and identity taken from the default providers
    pub fn capture(
        logger: &Arc<Logger>,
        level: LogLevel,
        file: &'static str,
        line: u32,
        message: impl AsRef<str>,
    ) -> Self {
        Self::new(logger, level, message)
            .with_location(file, line)
            .with_elapse(identity::elapsed_ms())
            .with_thread_id(identity::current_thread_id())
            .with_fiber_id(identity::current_fiber_id())
    }

    /// Source location; control characters in `file` are escaped like the message
    #[must_use]
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        self.file = Some(escape_control(file));
        self.line = line;
        self
    }

    #[must_use]
    pub fn with_elapse(mut self, elapse: u64) -> Self {
        self.elapse = elapse;
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, thread_id: u32) -> Self {
        self.thread_id = thread_id;
        self
    }

    #[must_use]
    pub fn with_fiber_id(mut self, fiber_id: u32) -> Self {
        self.fiber_id = fiber_id;
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Milliseconds since process start
    pub fn elapse(&self) -> u64 {
        self.elapse
    }

    pub fn thread_id(&self) -> u32 {
        self.thread_id
    }

    pub fn fiber_id(&self) -> u32 {
        self.fiber_id
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn level_str(&self) -> &'static str {
        self.level.to_str()
    }

    /// The originating logger, if it is still alive
    pub fn logger(&self) -> Option<Arc<Logger>> {
        self.logger.upgrade()
    }

    /// Name of the originating logger, or [`MISSING_FIELD`] once it is dropped
    pub fn logger_name(&self) -> String {
        self.logger
            .upgrade()
            .map(|logger| logger.name().to_string())
            .unwrap_or_else(|| MISSING_FIELD.to_string())
    }
}
