//! Property-based tests for chihiro_log using proptest

use chihiro_log::core::{level_name, UNKNOWN_LEVEL};
use chihiro_log::prelude::*;
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

/// Records the level of every event it writes
struct LevelRecorder {
    threshold: Mutex<LogLevel>,
    seen: Mutex<Vec<LogLevel>>,
}

impl LevelRecorder {
    fn new(threshold: LogLevel) -> Arc<Self> {
        Arc::new(Self {
            threshold: Mutex::new(threshold),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl LogAppender for LevelRecorder {
    fn log(&self, level: LogLevel, _event: &LogEvent) -> Result<()> {
        if level >= *self.threshold.lock() {
            self.seen.lock().push(level);
        }
        Ok(())
    }

    fn level(&self) -> LogLevel {
        *self.threshold.lock()
    }

    fn set_level(&self, level: LogLevel) {
        *self.threshold.lock() = level;
    }

    fn formatter(&self) -> Arc<dyn EventFormatter> {
        LogFormatter::new().shared()
    }

    fn set_formatter(&self, _formatter: Arc<dyn EventFormatter>) {}

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

// ============================================================================
// LogLevel
// ============================================================================

proptest! {
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(level.to_string(), level.to_str());
    }

    #[test]
    fn test_level_order_follows_rank(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, a.rank() < b.rank());
        prop_assert_eq!(a == b, a.rank() == b.rank());
    }

    #[test]
    fn test_level_name_total(rank in any::<u8>()) {
        let name = level_name(rank);
        if (1..=5).contains(&rank) {
            prop_assert_eq!(name, LogLevel::try_from(rank).unwrap().to_str());
        } else {
            prop_assert_eq!(name, UNKNOWN_LEVEL);
        }
    }
}

// ============================================================================
// Two-gate routing
// ============================================================================

proptest! {
    /// An appender sees an event exactly when both thresholds allow it
    #[test]
    fn test_double_gate(
        logger_level in any_level(),
        appender_level in any_level(),
        event_level in any_level(),
    ) {
        let logger = Arc::new(Logger::default());
        logger.set_level(logger_level);
        let recorder = LevelRecorder::new(appender_level);
        logger.add_appender(recorder.clone());

        logger.log(event_level, &LogEvent::new(&logger, event_level, "x"));

        let expected = event_level >= logger_level && event_level >= appender_level;
        prop_assert_eq!(recorder.seen.lock().len(), usize::from(expected));
    }

    #[test]
    fn test_set_level_returns_previous(first in any_level(), second in any_level()) {
        let logger = Logger::default();
        let original = logger.set_level(first);
        prop_assert_eq!(original, LogLevel::Debug);
        prop_assert_eq!(logger.set_level(second), first);
        prop_assert_eq!(logger.set_level(original), second);
    }

    /// Adding then removing an appender leaves the list as it was
    #[test]
    fn test_add_del_roundtrip(existing in 0usize..5) {
        let logger = Logger::default();
        let mut attached = Vec::new();
        for _ in 0..existing {
            let recorder: Arc<dyn LogAppender> = LevelRecorder::new(LogLevel::Debug);
            logger.add_appender(recorder.clone());
            attached.push(recorder);
        }

        let extra = LevelRecorder::new(LogLevel::Debug);
        logger.add_appender(extra.clone());
        prop_assert!(logger.del_appender(&extra));

        let after = logger.appenders();
        prop_assert_eq!(after.len(), attached.len());
        for (a, b) in after.iter().zip(attached.iter()) {
            prop_assert!(std::ptr::eq(
                Arc::as_ptr(a) as *const (),
                Arc::as_ptr(b) as *const ()
            ));
        }

        // removing something never attached is a no-op
        let stranger = LevelRecorder::new(LogLevel::Debug);
        prop_assert!(!logger.del_appender(&stranger));
        prop_assert_eq!(logger.appender_count(), attached.len());
    }
}

// ============================================================================
// Formatting
// ============================================================================

proptest! {
    /// Any message renders as a single line with eight text fields
    #[test]
    fn test_text_format_single_line(message in ".*", level in any_level(), line in any::<u32>()) {
        let logger = Arc::new(Logger::new("prop"));
        let event = LogEvent::new(&logger, level, &message).with_location("src/lib.rs", line);
        let rendered = LogFormatter::new().format(&event);

        prop_assert!(!rendered.contains('\n'));
        prop_assert!(!rendered.contains('\r'));
        prop_assert_eq!(rendered.split('\t').count(), 8);
        let expected_location = format!("\tsrc/lib.rs:{}\t", line);
        prop_assert!(rendered.contains(&expected_location));
    }

    /// Control characters in the logger name or file never split the line
    #[test]
    fn test_text_format_hostile_names(name in "[a-z \t\r\n]{0,16}", level in any_level()) {
        let logger = Arc::new(Logger::new(name.as_str()));
        let file: &'static str = Box::leak(format!("src/{}.rs", name).into_boxed_str());
        let event = LogEvent::new(&logger, level, "hello").with_location(file, 1);
        let rendered = LogFormatter::new().format(&event);

        prop_assert!(!rendered.contains('\n'));
        prop_assert!(!rendered.contains('\r'));
        prop_assert_eq!(rendered.split('\t').count(), 8);
    }

    /// Json output always parses and keeps the message
    #[test]
    fn test_json_format_parses(message in ".*", level in any_level()) {
        let logger = Arc::new(Logger::default());
        let event = LogEvent::new(&logger, level, &message);
        let formatter = LogFormatter::new().with_output_format(OutputFormat::Json);

        let parsed: serde_json::Value = serde_json::from_str(&formatter.format(&event)).unwrap();
        prop_assert_eq!(parsed["level"].as_str(), Some(level.to_str()));
        prop_assert_eq!(parsed["message"].as_str(), Some(event.message()));
    }
}
