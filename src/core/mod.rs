//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod formatter;
pub mod identity;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod timestamp;

pub use appender::{AppenderState, LogAppender};
pub use error::{LoggerError, Result};
pub use formatter::{EventFormatter, LogFormatter, OutputFormat};
pub use log_event::{LogEvent, MISSING_FIELD};
pub use log_level::{level_name, LogLevel, UNKNOWN_LEVEL};
pub use logger::{Logger, LoggerBuilder, ROOT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use overflow_policy::{OverflowCallback, OverflowPolicy};
pub use timestamp::TimestampFormat;
