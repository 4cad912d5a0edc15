//! Queue-full behaviour for [`AsyncLogAppender`]
//!
//! [`AsyncLogAppender`]: crate::appenders::AsyncLogAppender

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// What to do with an event when the appender's queue is full.
///
/// `Error` and `Fatal` events always wait for queue space regardless of the
/// policy; the policy governs lower levels only.
///
/// # Example
///
/// ```
/// use chihiro_log::OverflowPolicy;
/// use std::time::Duration;
///
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(50));
/// assert_eq!(policy.to_string(), "BlockWithTimeout(50ms)");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Drop the new event, count it, and alert on stderr periodically
    #[default]
    DropNewest,

    /// Wait until the worker frees a slot
    Block,

    /// Wait up to the given duration, then drop
    BlockWithTimeout(Duration),
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
        }
    }
}

/// Called with the running drop total on the first drop and every 1000th after
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drops_newest() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::DropNewest);
    }

    #[test]
    fn test_display() {
        assert_eq!(OverflowPolicy::Block.to_string(), "Block");
        assert_eq!(
            OverflowPolicy::BlockWithTimeout(Duration::from_millis(100)).to_string(),
            "BlockWithTimeout(100ms)"
        );
    }
}
