//! Appender trait for log output destinations

use super::{
    error::Result,
    formatter::{EventFormatter, LogFormatter},
    log_event::LogEvent,
    log_level::LogLevel,
};
use parking_lot::RwLock;
use std::sync::Arc;

/// An output sink attached to one or more loggers.
///
/// Appenders are shared as `Arc<dyn LogAppender>`, so every method takes
/// `&self` and implementations guard their own state.
pub trait LogAppender: Send + Sync {
    /// Handle an event the logger accepted at `level`.
    ///
    /// Must re-check `level` against [`level`](LogAppender::level) and do
    /// nothing below it. Otherwise formats the event once and writes it.
    fn log(&self, level: LogLevel, event: &LogEvent) -> Result<()>;

    /// Minimum level this appender writes
    fn level(&self) -> LogLevel;

    fn set_level(&self, level: LogLevel);

    fn formatter(&self) -> Arc<dyn EventFormatter>;

    fn set_formatter(&self, formatter: Arc<dyn EventFormatter>);

    fn flush(&self) -> Result<()>;

    fn name(&self) -> &str;
}

/// Threshold and formatter shared by the built-in appenders
pub struct AppenderState {
    level: RwLock<LogLevel>,
    formatter: RwLock<Arc<dyn EventFormatter>>,
}

impl AppenderState {
    pub fn new() -> Self {
        Self {
            level: RwLock::new(LogLevel::Debug),
            formatter: RwLock::new(Arc::new(LogFormatter::default())),
        }
    }

    #[inline]
    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= *self.level.read()
    }

    pub fn level(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    pub fn formatter(&self) -> Arc<dyn EventFormatter> {
        self.formatter.read().clone()
    }

    pub fn set_formatter(&self, formatter: Arc<dyn EventFormatter>) {
        *self.formatter.write() = formatter;
    }

    /// Render with the current formatter and terminate the line
    pub fn render(&self, event: &LogEvent) -> String {
        let mut line = self.formatter().format(event);
        line.push('\n');
        line
    }
}

impl Default for AppenderState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Logger;

    struct Fixed(&'static str);

    impl EventFormatter for Fixed {
        fn format(&self, _event: &LogEvent) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_state_gate() {
        let state = AppenderState::new();
        assert!(state.accepts(LogLevel::Debug));

        state.set_level(LogLevel::Warn);
        assert!(!state.accepts(LogLevel::Info));
        assert!(state.accepts(LogLevel::Warn));
        assert!(state.accepts(LogLevel::Fatal));
    }

    #[test]
    fn test_state_render_uses_current_formatter() {
        let logger = Arc::new(Logger::default());
        let event = LogEvent::new(&logger, LogLevel::Info, "hello");
        let state = AppenderState::new();

        state.set_formatter(Arc::new(Fixed("fixed")));
        assert_eq!(state.render(&event), "fixed\n");
    }
}
