//! File appender implementation

use crate::core::{
    AppenderState, EventFormatter, LogAppender, LogEvent, LogLevel, LoggerError, Result,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Appends formatted lines to a file.
///
/// Works with external log rotation: after the rotating tool renames the
/// file, [`reopen`](FileLogAppender::reopen) starts a fresh file at the same
/// path. While the file is closed (a failed reopen) events are dropped and
/// counted instead of reported as errors.
///
/// # Example
///
/// ```no_run
/// use chihiro_log::prelude::*;
///
/// let appender = FileLogAppender::new("/var/log/app.log")?.with_level(LogLevel::Error);
/// // ... logrotate moves /var/log/app.log away ...
/// appender.reopen()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct FileLogAppender {
    path: PathBuf,
    state: AppenderState,
    stream: Mutex<Option<BufWriter<File>>>,
    dropped: AtomicU64,
}

impl FileLogAppender {
    /// Open `path` in append mode, creating the file if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let writer = Self::open(&path)?;

        Ok(Self {
            path,
            state: AppenderState::new(),
            stream: Mutex::new(Some(writer)),
            dropped: AtomicU64::new(0),
        })
    }

    fn open(path: &Path) -> Result<BufWriter<File>> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(BufWriter::new)
            .map_err(|e| LoggerError::transport(path.display().to_string(), e))
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

    /// Close the current handle and open the same path again.
    ///
    /// On failure the appender stays closed until a later successful call.
    pub fn reopen(&self) -> Result<()> {
        let mut stream = self.stream.lock();

        if let Some(mut old) = stream.take() {
            if let Err(e) = old.flush() {
                eprintln!(
                    "[LOGGER WARNING] Failed to flush '{}' before reopening: {}",
                    self.path.display(),
                    e
                );
            }
        }

        *stream = Some(Self::open(&self.path)?);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.stream.lock().is_some()
    }

    /// Events accepted while the file was closed
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl LogAppender for FileLogAppender {
    fn log(&self, level: LogLevel, event: &LogEvent) -> Result<()> {
        if !self.state.accepts(level) {
            return Ok(());
        }

        let mut stream = self.stream.lock();
        let Some(writer) = stream.as_mut() else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        };

        let line = self.state.render(event);
        writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log file", e))
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
        if let Some(writer) = self.stream.lock().as_mut() {
            writer
                .flush()
                .map_err(|e| LoggerError::io_operation("flushing log file", e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileLogAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = LogAppender::flush(self);
    }
}
