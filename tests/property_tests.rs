//! Property-based tests for bufferlog using proptest

use bufferlog::core::{Buffer, Formatter, LogRecord};
use bufferlog::prelude::*;
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that the gate agrees with the level ordering
    #[test]
    fn test_gate_matches_ordering(record in any_level(), threshold in any_level()) {
        prop_assert_eq!(record.passes(threshold), record >= threshold);
        prop_assert_eq!(record.passes(threshold), (record as u8) >= (threshold as u8));
    }

    #[test]
    fn test_log_level_invalid_parse(invalid in "[0-9 _.-]{0,12}") {
        prop_assert!(invalid.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Buffer Tests
// ============================================================================

proptest! {
    /// Pushed bytes come back in order, whatever the growth pattern
    #[test]
    fn test_buffer_preserves_pushed_bytes(
        initial in 1usize..64,
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..128), 0..32),
    ) {
        let mut buffer = Buffer::with_capacity(initial);
        let mut expected = Vec::new();
        for chunk in &chunks {
            buffer.push(chunk);
            expected.extend_from_slice(chunk);
        }

        prop_assert_eq!(buffer.readable_slice(), expected.as_slice());
        prop_assert_eq!(buffer.readable_size() + buffer.writable_size(), buffer.capacity());
    }

    /// Below the threshold a too-small buffer grows to `2 * capacity + len`
    #[test]
    fn test_buffer_growth_below_threshold(
        capacity in 1usize..4096,
        filled in 0usize..4096,
        len in 1usize..4096,
    ) {
        let filled = filled.min(capacity);
        let mut buffer = Buffer::with_capacity(capacity);
        buffer.push(&vec![1u8; filled]);

        buffer.push(&vec![2u8; len]);

        if len <= capacity - filled {
            prop_assert_eq!(buffer.capacity(), capacity);
        } else {
            prop_assert_eq!(buffer.capacity(), 2 * capacity + len);
        }
        prop_assert_eq!(buffer.readable_size(), filled + len);
    }

    /// Consuming and resetting never loses the allocation
    #[test]
    fn test_advance_and_reset(data in prop::collection::vec(any::<u8>(), 1..256), cut in 0usize..256) {
        let mut buffer = Buffer::with_capacity(data.len());
        buffer.push(&data);

        let cut = cut.min(data.len());
        buffer.advance_reader(cut);
        prop_assert_eq!(buffer.readable_slice(), &data[cut..]);

        let capacity = buffer.capacity();
        buffer.reset();
        prop_assert!(buffer.is_empty());
        prop_assert_eq!(buffer.capacity(), capacity);
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// Rendering is a pure function of the record
    #[test]
    fn test_render_is_deterministic(
        payload in ".*",
        file in "[a-z_/]{1,20}\\.rs",
        line in any::<u32>(),
        level in any_level(),
        timestamp in 0i64..4_000_000_000,
    ) {
        let formatter = Formatter::default();
        let record = LogRecord::new(level, &file, line, "prop", &payload)
            .with_timestamp(timestamp)
            .with_thread_id("ThreadId(7)");

        let first = formatter.render(&record);
        let second = formatter.render(&record);
        prop_assert_eq!(&first, &second);

        let expected_tail = format!("[ThreadId(7)][prop][{}:{}][{}]\t{}\n", file, line, level, payload);
        prop_assert!(first.ends_with(&expected_tail));
    }

    /// Patterns without directives render as themselves
    #[test]
    fn test_literal_patterns_render_verbatim(literal in "[^%]*") {
        let formatter = Formatter::compile(&literal).unwrap();
        let record = LogRecord::new(LogLevel::Info, "f.rs", 1, "prop", "ignored");
        prop_assert_eq!(formatter.render(&record), literal);
    }

    /// The payload is inserted byte for byte
    #[test]
    fn test_payload_not_escaped(payload in "\\PC*") {
        let formatter = Formatter::compile("%m").unwrap();
        let record = LogRecord::new(LogLevel::Warn, "f.rs", 1, "prop", &payload);
        prop_assert_eq!(formatter.render(&record), payload);
    }

    /// Compiling arbitrary text never panics
    #[test]
    fn test_compile_never_panics(pattern in ".*") {
        let _ = Formatter::compile(&pattern);
    }
}
