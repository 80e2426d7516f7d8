//! Timestamp rendering for the `%d{...}` pattern directive
//!
//! The sub-pattern is a strftime-style format string, validated once when
//! the owning pattern is compiled and rendered in local time.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{self, Write};

/// Sub-pattern used when `%d` carries no `{...}` (or an empty one)
pub const DEFAULT_TIME_PATTERN: &str = "%H:%M:%S";

/// A validated strftime-compatible time pattern
///
/// # Examples
///
/// ```
/// use bufferlog::core::TimestampPattern;
///
/// let pattern = TimestampPattern::parse("%s").unwrap();
/// let mut out = String::new();
/// pattern.render_into(1_700_000_000, &mut out).unwrap();
/// assert_eq!(out, "1700000000");
///
/// assert!(TimestampPattern::parse("%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampPattern {
    pattern: String,
}

impl TimestampPattern {
    /// Validate `pattern`; an empty pattern falls back to [`DEFAULT_TIME_PATTERN`]
    pub fn parse(pattern: &str) -> Result<Self> {
        let pattern = if pattern.is_empty() {
            DEFAULT_TIME_PATTERN
        } else {
            pattern
        };

        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "timestamp",
                format!("invalid strftime sub-pattern '{}'", pattern),
            ));
        }

        Ok(Self {
            pattern: pattern.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Append `secs` (seconds since the epoch) rendered in local time
    pub fn render_into(&self, secs: i64, out: &mut String) -> fmt::Result {
        match Local.timestamp_opt(secs, 0).single() {
            Some(datetime) => self.render_datetime(&datetime, out),
            None => write!(out, "{}", secs),
        }
    }

    fn render_datetime<Tz: TimeZone>(&self, datetime: &DateTime<Tz>, out: &mut String) -> fmt::Result
    where
        Tz::Offset: fmt::Display,
    {
        write!(out, "{}", datetime.format(&self.pattern))
    }
}

impl Default for TimestampPattern {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIME_PATTERN.to_string(),
        }
    }
}

impl fmt::Display for TimestampPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(TimestampPattern::default().as_str(), "%H:%M:%S");
        assert_eq!(TimestampPattern::parse("").unwrap().as_str(), "%H:%M:%S");
    }

    #[test]
    fn test_render_fixed_datetime() {
        let pattern = TimestampPattern::parse("%Y-%m-%d %H:%M:%S").unwrap();
        let mut out = String::new();
        pattern.render_datetime(&fixed_datetime(), &mut out).unwrap();
        assert_eq!(out, "2025-01-08 10:30:45");
    }

    #[test]
    fn test_render_epoch_seconds() {
        let pattern = TimestampPattern::parse("%s").unwrap();
        let mut out = String::from("t=");
        pattern.render_into(fixed_datetime().timestamp(), &mut out).unwrap();
        assert_eq!(out, format!("t={}", fixed_datetime().timestamp()));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = TimestampPattern::parse("%H:%").unwrap_err();
        assert!(err.is_configuration());
    }
}
