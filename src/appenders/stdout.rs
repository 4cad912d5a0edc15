//! Standard output appender implementation

use crate::core::{
    AppenderState, EventFormatter, LogAppender, LogEvent, LogLevel, LoggerError, Result,
};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes one formatted line per event to standard output, flushing after
/// every line.
///
/// # Example
///
/// ```
/// use chihiro_log::prelude::*;
///
/// let appender = StdoutLogAppender::new().with_level(LogLevel::Warn);
/// assert_eq!(appender.level(), LogLevel::Warn);
/// ```
pub struct StdoutLogAppender {
    state: AppenderState,
    sink: Mutex<Box<dyn Write + Send>>,
    #[cfg(feature = "console")]
    use_colors: bool,
}

impl StdoutLogAppender {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Send the output to another sink instead of the process's stdout
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            state: AppenderState::new(),
            sink: Mutex::new(Box::new(writer)),
            #[cfg(feature = "console")]
            use_colors: false,
        }
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    #[must_use]
    pub fn with_formatter(self, formatter: Arc<dyn EventFormatter>) -> Self {
        self.state.set_formatter(formatter);
        self
    }

    /// Colour each line by level. Off by default so output stays plain text.
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[cfg_attr(not(feature = "console"), allow(unused_variables))]
    fn render(&self, level: LogLevel, event: &LogEvent) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            let line = self.state.formatter().format(event);
            return format!("{}\n", line.color(level.color()));
        }
        self.state.render(event)
    }
}

impl Default for StdoutLogAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAppender for StdoutLogAppender {
    fn log(&self, level: LogLevel, event: &LogEvent) -> Result<()> {
        if !self.state.accepts(level) {
            return Ok(());
        }

        let mut sink = self.sink.lock();
        let line = self.render(level, event);
        sink.write_all(line.as_bytes())
            .and_then(|()| sink.flush())
            .map_err(|e| LoggerError::io_operation("writing to stdout", e))
    }

    fn level(&self) -> LogLevel {
        self.state.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.state.set_level(level);
    }

    fn formatter(&self) -> Arc<dyn EventFormatter> {
        self.state.formatter()
    }

    fn set_formatter(&self, formatter: Arc<dyn EventFormatter>) {
        self.state.set_formatter(formatter);
    }

    fn flush(&self) -> Result<()> {
        self.sink.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
