//! File logging example
//!
//! Demonstrates writing to a file, filtering per appender and cooperating
//! with external log rotation through `reopen`.
//!
//! Run with: cargo run --example file_logging

use chihiro_log::prelude::*;
use chihiro_log::{error, info, warn};
use std::fs;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== chihiro_log - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("chihiro_log_demo");
    fs::create_dir_all(&dir)?;
    let all_path = dir.join("app.log");
    let error_path = dir.join("errors.log");

    let all = Arc::new(FileLogAppender::new(&all_path)?);
    let errors = Arc::new(FileLogAppender::new(&error_path)?.with_level(LogLevel::Error));

    let logger = Logger::builder()
        .name("files")
        .appender(all.clone())
        .appender(errors)
        .build();

    info!(logger, "Application started");
    warn!(logger, "Cache miss rate at {}%", 37);
    error!(logger, "Upstream timed out after {} ms", 3000);
    logger.flush()?;

    println!("1. Wrote to {}", all_path.display());
    println!("   Errors only in {}", error_path.display());

    // Simulate logrotate: move the file away, then reopen the same path
    let rotated = dir.join("app.log.1");
    fs::rename(&all_path, &rotated)?;
    all.reopen()?;

    info!(logger, "First line after rotation");
    logger.flush()?;

    println!("\n2. Rotated file:");
    print!("{}", fs::read_to_string(&rotated)?);
    println!("\n3. Fresh file:");
    print!("{}", fs::read_to_string(&all_path)?);

    Ok(())
}
