//! Basic logger usage example
//!
//! Demonstrates a named logger with a stdout appender, the two level gates
//! and the three output formats.
//!
//! Run with: cargo run --example basic_usage

use chihiro_log::prelude::*;
use chihiro_log::{debug, error, fatal, info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== chihiro_log - Basic Usage Example ===\n");

    let stdout = Arc::new(StdoutLogAppender::new());
    let logger = Logger::builder()
        .name("demo")
        .level(LogLevel::Debug)
        .appender(stdout.clone())
        .build();

    println!("1. Logging at every level:");
    debug!(logger, "This is a debug message");
    info!(logger, "This is an info message");
    warn!(logger, "This is a warning message");
    error!(logger, "This is an error message");
    fatal!(logger, "This is a fatal message");

    println!("\n2. Raising the logger threshold to WARN:");
    let previous = logger.set_level(LogLevel::Warn);
    info!(logger, "Suppressed by the logger");
    warn!(logger, "Passes the logger gate");
    logger.set_level(previous);

    println!("\n3. Raising the appender threshold to ERROR:");
    stdout.set_level(LogLevel::Error);
    warn!(logger, "Suppressed by the appender");
    error!(logger, "Passes both gates");
    stdout.set_level(LogLevel::Debug);

    println!("\n4. Building an event by hand:");
    let event = LogEvent::new(&logger, LogLevel::Info, "multi\nline message")
        .with_location("demos/basic_usage.rs", 44)
        .with_fiber_id(7);
    logger.info(&event);

    println!("\n5. Switching formats:");
    stdout.set_formatter(
        LogFormatter::new()
            .with_output_format(OutputFormat::Json)
            .shared(),
    );
    info!(logger, "Rendered as JSON, user={}", "alice");
    stdout.set_formatter(
        LogFormatter::new()
            .with_output_format(OutputFormat::Logfmt)
            .with_timestamp_format(TimestampFormat::UnixMillis)
            .shared(),
    );
    info!(logger, "Rendered as logfmt");

    let metrics = logger.metrics();
    println!(
        "\nDispatched: {}, suppressed: {}, appender failures: {}",
        metrics.dispatched(),
        metrics.suppressed(),
        metrics.appender_failures()
    );

    logger.flush()
}
