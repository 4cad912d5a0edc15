//! Logging macros
//!
//! Each macro captures `file!()` and `line!()`, builds a [`LogEvent`] with
//! the default identity providers and routes it through the given logger
//! (an `Arc<Logger>`). Formatting is skipped entirely when the logger's
//! threshold rejects the level.
//!
//! [`LogEvent`]: crate::core::LogEvent
//!
//! # Examples
//!
//! ```
//! use chihiro_log::prelude::*;
//! use chihiro_log::info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::default());
//!
//! info!(logger, "Server started");
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use chihiro_log::prelude::*;
/// # let logger = std::sync::Arc::new(Logger::default());
/// use chihiro_log::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &::std::sync::Arc<$crate::core::Logger> = &$logger;
        let level: $crate::core::LogLevel = $level;
        if logger.is_enabled(level) {
            let event = $crate::core::LogEvent::capture(
                logger,
                level,
                file!(),
                line!(),
                format!($($arg)+),
            );
            logger.log(level, &event);
        }
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use chihiro_log::prelude::*;
/// # let logger = std::sync::Arc::new(Logger::default());
/// use chihiro_log::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Fatal, $($arg)+)
    };
}
