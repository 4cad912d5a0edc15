//! Background-thread appender
//!
//! Wraps any other appender so that formatting and I/O happen on a worker
//! thread. The wrapped appender's threshold is checked on the caller's
//! thread first, so suppressed events never reach the queue.

use crate::core::{
    EventFormatter, LogAppender, LogEvent, LogLevel, LoggerError, OverflowCallback,
    OverflowPolicy, Result,
};
use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// How long `Drop` waits for the worker to drain the queue
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Default queue capacity
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

enum Command {
    Event(LogLevel, LogEvent),
    Flush(Sender<Result<()>>),
}

/// # Example
///
/// ```
/// use chihiro_log::prelude::*;
/// use std::sync::Arc;
///
/// let appender = AsyncLogAppender::builder(Arc::new(StdoutLogAppender::new()))
///     .buffer_size(256)
///     .overflow_policy(OverflowPolicy::Block)
///     .build()?;
///
/// let logger = Logger::builder().appender(Arc::new(appender)).build();
/// # Ok::<(), LoggerError>(())
/// ```
pub struct AsyncLogAppender {
    name: String,
    inner: Arc<dyn LogAppender>,
    sender: Option<Sender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    capacity: usize,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
    dropped: AtomicU64,
}

impl AsyncLogAppender {
    pub fn builder(inner: Arc<dyn LogAppender>) -> AsyncAppenderBuilder {
        AsyncAppenderBuilder::new(inner)
    }

    /// Wrap `inner` with the default buffer size and overflow policy
    pub fn new(inner: Arc<dyn LogAppender>) -> Result<Self> {
        Self::builder(inner).build()
    }

    pub fn inner(&self) -> &Arc<dyn LogAppender> {
        &self.inner
    }

    /// Events dropped because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn run_worker(name: String, inner: Arc<dyn LogAppender>, receiver: Receiver<Command>) {
        for command in receiver {
            match command {
                Command::Event(level, event) => {
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        inner.log(level, &event)
                    }));
                    match result {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => {
                            eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", name, e);
                        }
                        Err(_) => {
                            eprintln!(
                                "[LOGGER CRITICAL] Appender '{}' panicked. Worker continues.",
                                name
                            );
                        }
                    }
                }
                Command::Flush(ack) => {
                    let _ = ack.send(inner.flush());
                }
            }
        }

        // Queue closed: everything sent before shutdown has been written
        if let Err(e) = inner.flush() {
            eprintln!("[LOGGER ERROR] Appender '{}' final flush failed: {}", name, e);
        }
    }

    fn sender(&self) -> Result<&Sender<Command>> {
        self.sender
            .as_ref()
            .ok_or_else(|| LoggerError::stopped(&self.name))
    }

    fn record_drop(&self) {
        let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;

        // Alert on the first drop and periodically thereafter
        if total == 1 || total % 1000 == 0 {
            eprintln!(
                "[LOGGER WARNING] Appender '{}' queue full (capacity {}), {} events dropped.",
                self.name, self.capacity, total
            );
            if let Some(ref callback) = self.on_overflow {
                callback(total);
            }
        }
    }
}

impl LogAppender for AsyncLogAppender {
    fn log(&self, level: LogLevel, event: &LogEvent) -> Result<()> {
        if level < self.inner.level() {
            return Ok(());
        }

        let sender = self.sender()?;
        let command = Command::Event(level, event.clone());
        let stopped = || LoggerError::stopped(&self.name);

        // Error and Fatal always wait for room
        let policy = if level >= LogLevel::Error {
            OverflowPolicy::Block
        } else {
            self.overflow_policy
        };

        match policy {
            OverflowPolicy::Block => sender.send(command).map_err(|_| stopped()),
            OverflowPolicy::DropNewest => match sender.try_send(command) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => {
                    self.record_drop();
                    Ok(())
                }
                Err(TrySendError::Disconnected(_)) => Err(stopped()),
            },
            OverflowPolicy::BlockWithTimeout(timeout) => {
                match sender.send_timeout(command, timeout) {
                    Ok(()) => Ok(()),
                    Err(SendTimeoutError::Timeout(_)) => {
                        self.record_drop();
                        Ok(())
                    }
                    Err(SendTimeoutError::Disconnected(_)) => Err(stopped()),
                }
            }
        }
    }

    fn level(&self) -> LogLevel {
        self.inner.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.inner.set_level(level);
    }

    fn formatter(&self) -> Arc<dyn EventFormatter> {
        self.inner.formatter()
    }

    fn set_formatter(&self, formatter: Arc<dyn EventFormatter>) {
        self.inner.set_formatter(formatter);
    }

    /// Wait until every event queued so far has been written, then flush
    /// the wrapped appender
    fn flush(&self) -> Result<()> {
        let (ack, done) = bounded(1);
        self.sender()?
            .send(Command::Flush(ack))
            .map_err(|_| LoggerError::stopped(&self.name))?;
        done.recv().map_err(|_| LoggerError::stopped(&self.name))?
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for AsyncLogAppender {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain pending events and exit
        drop(self.sender.take());

        // Runs on the worker itself when it held the last Arc<Logger> while
        // formatting. It exits on its own once the closed queue drains.
        let handle = self
            .worker
            .take()
            .filter(|handle| handle.thread().id() != thread::current().id());

        if let Some(handle) = handle {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Appender '{}' worker panicked during shutdown: {:?}",
                            self.name, e
                        );
                    }
                    break;
                }

                if start.elapsed() >= DEFAULT_SHUTDOWN_TIMEOUT {
                    eprintln!(
                        "[LOGGER WARNING] Appender '{}' worker did not finish within {:?}. \
                         Some events may be lost.",
                        self.name, DEFAULT_SHUTDOWN_TIMEOUT
                    );
                    break;
                }

                thread::sleep(Duration::from_millis(5));
            }
        }

        let dropped = self.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Appender '{}' shutting down with {} dropped events",
                self.name, dropped
            );
        }
    }
}

/// Builder for [`AsyncLogAppender`]
pub struct AsyncAppenderBuilder {
    inner: Arc<dyn LogAppender>,
    buffer_size: usize,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl AsyncAppenderBuilder {
    pub fn new(inner: Arc<dyn LogAppender>) -> Self {
        Self {
            inner,
            buffer_size: DEFAULT_BUFFER_SIZE,
            overflow_policy: OverflowPolicy::default(),
            on_overflow: None,
        }
    }

    /// Queue capacity; values below 1 are raised to 1
    #[must_use = "builder methods return a new value"]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    /// Start the worker thread
    pub fn build(self) -> Result<AsyncLogAppender> {
        let name = format!("async({})", self.inner.name());
        let (sender, receiver) = bounded(self.buffer_size);

        let worker_name = name.clone();
        let worker_inner = Arc::clone(&self.inner);
        let worker = thread::Builder::new()
            .name(format!("{}-worker", self.inner.name()))
            .spawn(move || AsyncLogAppender::run_worker(worker_name, worker_inner, receiver))
            .map_err(|e| LoggerError::io_operation("spawning appender worker", e))?;

        Ok(AsyncLogAppender {
            name,
            inner: self.inner,
            sender: Some(sender),
            worker: Some(worker),
            capacity: self.buffer_size,
            overflow_policy: self.overflow_policy,
            on_overflow: self.on_overflow,
            dropped: AtomicU64::new(0),
        })
    }
}
