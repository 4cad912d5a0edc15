//! Default clock and identity providers
//!
//! These fill in the timing and thread/fiber fields of events built with
//! [`LogEvent::capture`](crate::core::LogEvent::capture). Callers with their
//! own sources set the fields explicitly instead.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static PROCESS_START: OnceLock<Instant> = OnceLock::new();
static NEXT_THREAD_ID: AtomicU32 = AtomicU32::new(1);

thread_local! {
    static THREAD_ID: Cell<u32> = const { Cell::new(0) };
    static FIBER_ID: Cell<u32> = const { Cell::new(0) };
}

/// Pin the elapsed-time origin. Called implicitly by the first event; calling
/// it early in `main` makes `elapsed_ms` measure from process start.
pub fn init_clock() -> Instant {
    *PROCESS_START.get_or_init(Instant::now)
}

/// Milliseconds elapsed since the clock origin
pub fn elapsed_ms() -> u64 {
    init_clock().elapsed().as_millis() as u64
}

/// Small sequential id for the current thread, assigned on first use
pub fn current_thread_id() -> u32 {
    THREAD_ID.with(|id| {
        if id.get() == 0 {
            id.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        id.get()
    })
}

/// Fiber id of the current thread; `0` unless a fiber runtime set one
pub fn current_fiber_id() -> u32 {
    FIBER_ID.with(Cell::get)
}

/// Record the fiber currently running on this thread
pub fn set_current_fiber_id(fiber_id: u32) {
    FIBER_ID.with(|id| id.set(fiber_id));
}
