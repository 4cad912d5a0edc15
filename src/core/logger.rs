//! Main logger implementation

use super::{
    appender::LogAppender,
    error::{LoggerError, Result},
    log_event::{escape_control, LogEvent},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// Name used by [`Logger::default`]
pub const ROOT_LOGGER_NAME: &str = "root";

type AppenderList = Arc<Vec<Arc<dyn LogAppender>>>;

/// Named routing point: gates events by its threshold and fans accepted
/// events out to its appenders in insertion order.
///
/// The appender list is copy-on-write. Dispatch takes a snapshot and
/// iterates it without holding the lock, so `add_appender`/`del_appender`
/// never wait on slow I/O and an appender may log through the same logger.
pub struct Logger {
    name: String,
    level: RwLock<LogLevel>,
    appenders: RwLock<AppenderList>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Newlines, carriage returns and tabs in `name` are stored escaped
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: escape_control(&name).into_owned(),
            level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Arc::new(Vec::new())),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    /// Set the threshold, returning the previous one
    pub fn set_level(&self, level: LogLevel) -> LogLevel {
        std::mem::replace(&mut *self.level.write(), level)
    }

    /// Whether an event at `level` passes this logger's threshold
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.level.read()
    }

    /// Append to the end of the appender list. Adding the same appender twice
    /// makes it write every event twice.
    pub fn add_appender(&self, appender: Arc<dyn LogAppender>) {
        let mut appenders = self.appenders.write();
        let mut next = Vec::with_capacity(appenders.len() + 1);
        next.extend(appenders.iter().cloned());
        next.push(appender);
        *appenders = Arc::new(next);
    }

    /// Remove the first occurrence of `appender` (by identity).
    /// Returns `false` if it was not attached.
    pub fn del_appender<A: LogAppender + ?Sized>(&self, appender: &Arc<A>) -> bool {
        let target = Arc::as_ptr(appender) as *const ();
        let mut appenders = self.appenders.write();

        let Some(idx) = appenders
            .iter()
            .position(|a| Arc::as_ptr(a) as *const () == target)
        else {
            return false;
        };

        let mut next: Vec<_> = appenders.iter().cloned().collect();
        next.remove(idx);
        *appenders = Arc::new(next);
        true
    }

    pub fn clear_appenders(&self) {
        *self.appenders.write() = Arc::new(Vec::new());
    }

    /// Snapshot of the attached appenders, in dispatch order
    pub fn appenders(&self) -> Vec<Arc<dyn LogAppender>> {
        self.snapshot().iter().cloned().collect()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn snapshot(&self) -> AppenderList {
        Arc::clone(&*self.appenders.read())
    }

    /// Route `event` at `level`.
    ///
    /// Below the threshold nothing happens. Otherwise every appender is
    /// called; an appender that fails or panics is reported on stderr and
    /// the remaining appenders still receive the event.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }
        self.metrics.record_dispatched();

        let appenders = self.snapshot();
        for appender in appenders.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(level, event)
            }));

            let error = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => panic_error(appender.name(), panic_info.as_ref()),
            };

            self.metrics.record_failure();
            eprintln!(
                "[LOGGER ERROR] Logger '{}': appender '{}' failed: {}",
                self.name,
                appender.name(),
                error
            );
        }
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Flush every appender, returning the first error after trying all.
    /// A panicking flush is reported as [`LoggerError::AppenderPanicked`].
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for appender in self.snapshot().iter() {
            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.flush()))
                    .unwrap_or_else(|panic_info| {
                        Err(panic_error(appender.name(), panic_info.as_ref()))
                    });

            if let Err(e) = result {
                eprintln!(
                    "[LOGGER ERROR] Logger '{}': flushing appender '{}' failed: {}",
                    self.name,
                    appender.name(),
                    e
                );
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use chihiro_log::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .name("http")
    ///     .level(LogLevel::Info)
    ///     .appender(Arc::new(StdoutLogAppender::new()))
    ///     .build();
    ///
    /// assert_eq!(logger.name(), "http");
    /// assert_eq!(logger.appender_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

fn panic_error(name: &str, panic_info: &(dyn std::any::Any + Send)) -> LoggerError {
    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    };
    LoggerError::panicked(name, panic_msg)
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

/// Builder for constructing a shared Logger with a fluent API
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    appenders: Vec<Arc<dyn LogAppender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            level: LogLevel::Debug,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: Arc<dyn LogAppender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger, already wrapped in the `Arc` events refer to
    pub fn build(self) -> Arc<Logger> {
        let logger = Logger::new(self.name);
        logger.set_level(self.level);
        *logger.appenders.write() = Arc::new(self.appenders);
        Arc::new(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
