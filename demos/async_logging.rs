//! Asynchronous logging example
//!
//! Demonstrates wrapping a file appender in a background worker with a
//! bounded queue and an overflow policy.
//!
//! Run with: cargo run --example async_logging

use chihiro_log::prelude::*;
use chihiro_log::{error, info};
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== chihiro_log - Async Logging Example ===\n");

    let path = std::env::temp_dir().join("chihiro_log_async.log");
    let file = Arc::new(FileLogAppender::new(&path)?);

    let appender = Arc::new(
        AsyncLogAppender::builder(file)
            .buffer_size(256)
            .overflow_policy(OverflowPolicy::DropNewest)
            .on_overflow(Arc::new(|total| {
                eprintln!("queue overflow, {} events dropped so far", total);
            }))
            .build()?,
    );

    let logger = Logger::builder()
        .name("worker-pool")
        .appender(appender.clone())
        .build();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..1000 {
                    info!(logger, "thread {} processed job {}", t, i);
                }
                // Error events wait for room even when the queue is full
                error!(logger, "thread {} finished", t);
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("a producer thread panicked");
        }
    }

    logger.flush()?;
    println!("Wrote {}", path.display());
    println!("Dropped under load: {}", appender.dropped_count());

    Ok(())
}
