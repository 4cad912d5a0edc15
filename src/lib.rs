//! # chihiro_log
//!
//! A small structured-logging library built around one pipeline:
//! event -> logger -> appender -> formatter.
//!
//! - **Two gates**: a [`Logger`] drops events below its threshold, and each
//!   appender drops events below its own threshold
//! - **Independent sinks**: every appender owns a shared formatter and a
//!   transport (stdout, file, or a background worker around either)
//! - **Never fails the caller**: appender errors and panics are reported on
//!   stderr and counted, never returned from [`Logger::log`]
//!
//! ```
//! use chihiro_log::prelude::*;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .level(LogLevel::Info)
//!     .appender(Arc::new(StdoutLogAppender::new().with_level(LogLevel::Warn)))
//!     .build();
//!
//! chihiro_log::info!(logger, "suppressed by the appender");
//! chihiro_log::error!(logger, "written: {}", 42);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{AsyncLogAppender, FileLogAppender, StdoutLogAppender};
    pub use crate::core::{
        EventFormatter, LogAppender, LogEvent, LogFormatter, LogLevel, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, OutputFormat, OverflowPolicy, Result, TimestampFormat,
    };
}

pub use self::appenders::{AsyncLogAppender, FileLogAppender, StdoutLogAppender};
pub use self::core::{
    level_name, AppenderState, EventFormatter, LogAppender, LogEvent, LogFormatter, LogLevel,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat, OverflowCallback,
    OverflowPolicy, Result, TimestampFormat,
};
