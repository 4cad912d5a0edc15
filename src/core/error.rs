//! Error types for the logging pipeline
//!
//! Errors never reach application code through [`Logger::log`]; they are
//! returned by the operations that can meaningfully fail (opening or
//! reopening a file, flushing) and reported by the logger's dispatch loop.
//!
//! [`Logger::log`]: crate::core::Logger::log

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A numeric rank or name that does not map to one of the five levels
    #[error("Invalid log level: '{value}'")]
    InvalidLevel { value: String },

    /// The file transport could not be opened or reopened
    #[error("Transport unavailable for '{path}': {source}")]
    TransportUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error with context
    #[error("IO error while {operation}: {source}")]
    IoOperation {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Async appender worker is gone
    #[error("Appender '{name}' already stopped")]
    AppenderStopped { name: String },

    /// An appender panicked while handling an event
    #[error("Appender '{name}' panicked: {message}")]
    AppenderPanicked { name: String, message: String },
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(value: impl ToString) -> Self {
        LoggerError::InvalidLevel {
            value: value.to_string(),
        }
    }

    /// Create a transport error for a file path
    pub fn transport(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::TransportUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(operation: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            source,
        }
    }

    pub fn stopped(name: impl Into<String>) -> Self {
        LoggerError::AppenderStopped { name: name.into() }
    }

    pub fn panicked(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderPanicked {
            name: name.into(),
            message: message.into(),
        }
    }
}
