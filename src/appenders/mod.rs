//! Appender implementations

pub mod async_appender;
pub mod file;
pub mod stdout;

pub use async_appender::{AsyncAppenderBuilder, AsyncLogAppender, DEFAULT_SHUTDOWN_TIMEOUT};
pub use file::FileLogAppender;
pub use stdout::StdoutLogAppender;

// Re-export the trait next to its implementations
pub use crate::core::LogAppender;
