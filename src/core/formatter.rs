//! Pattern formatter
//!
//! A pattern such as `[%d{%H:%M:%S}][%p]%T%m%n` is compiled once into a list
//! of [`FormatItem`]s. Rendering replays that list against a [`LogRecord`].
//!
//! | Directive      | Output                                   |
//! |----------------|------------------------------------------|
//! | `%d{fmt}`      | record time in local time, strftime `fmt` (default `%H:%M:%S`) |
//! | `%T`           | tab                                      |
//! | `%t`           | thread id                                |
//! | `%p`           | level name                               |
//! | `%c`           | logger name                              |
//! | `%f`           | source file                              |
//! | `%l`           | source line                              |
//! | `%m`           | payload                                  |
//! | `%n`           | newline                                  |
//! | `%%`           | literal `%`                              |

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use super::timestamp::TimestampPattern;
use std::fmt::Write;

/// Pattern used when none is configured
pub const DEFAULT_PATTERN: &str = "[%d{%H:%M:%S}][%t][%c][%f:%l][%p]%T%m%n";

/// One compiled unit of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatItem {
    Literal(String),
    Payload,
    Level,
    Time(TimestampPattern),
    File,
    Line,
    ThreadId,
    LoggerName,
    Tab,
    Newline,
}

impl FormatItem {
    fn render(&self, record: &LogRecord<'_>, out: &mut String) -> std::fmt::Result {
        match self {
            FormatItem::Literal(text) => out.push_str(text),
            FormatItem::Payload => out.push_str(record.payload),
            FormatItem::Level => out.push_str(record.level.to_str()),
            FormatItem::Time(pattern) => pattern.render_into(record.timestamp, out)?,
            FormatItem::File => out.push_str(record.file),
            FormatItem::Line => write!(out, "{}", record.line)?,
            FormatItem::ThreadId => out.push_str(&record.thread_id),
            FormatItem::LoggerName => out.push_str(record.logger),
            FormatItem::Tab => out.push('\t'),
            FormatItem::Newline => out.push('\n'),
        }
        Ok(())
    }
}

/// A compiled, immutable rendering plan
///
/// # Examples
///
/// ```
/// use bufferlog::core::{Formatter, LogLevel, LogRecord};
///
/// let formatter = Formatter::compile("[%p]%m%n").unwrap();
/// let record = LogRecord::new(LogLevel::Info, "main.rs", 1, "root", "hello");
/// assert_eq!(formatter.render(&record), "[INFO]hello\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pattern: String,
    items: Vec<FormatItem>,
}

impl Formatter {
    /// Compile `pattern`, rejecting unknown directives, a dangling `%`
    /// and unterminated `{...}` sub-patterns
    pub fn compile(pattern: &str) -> Result<Self> {
        let items = parse_pattern(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            items,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    /// Render `record` into a new string
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        let mut out = String::with_capacity(self.pattern.len() + record.payload.len() + 32);
        self.render_into(record, &mut out);
        out
    }

    /// Append the rendering of `record` to `out`
    pub fn render_into(&self, record: &LogRecord<'_>, out: &mut String) {
        for item in &self.items {
            // Writing into a String only fails if a Display impl reports an
            // error; time patterns are validated at compile time.
            if item.render(record, out).is_err() {
                eprintln!(
                    "[LOGGER ERROR] Failed to render {:?} for pattern '{}'",
                    item, self.pattern
                );
            }
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            items: vec![
                FormatItem::Literal("[".to_string()),
                FormatItem::Time(TimestampPattern::default()),
                FormatItem::Literal("][".to_string()),
                FormatItem::ThreadId,
                FormatItem::Literal("][".to_string()),
                FormatItem::LoggerName,
                FormatItem::Literal("][".to_string()),
                FormatItem::File,
                FormatItem::Literal(":".to_string()),
                FormatItem::Line,
                FormatItem::Literal("][".to_string()),
                FormatItem::Level,
                FormatItem::Literal("]".to_string()),
                FormatItem::Tab,
                FormatItem::Payload,
                FormatItem::Newline,
            ],
        }
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<FormatItem>> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let (_, key) = chars
            .next()
            .ok_or_else(|| LoggerError::pattern(pattern, pos, "'%' at end of pattern"))?;

        if key == '%' {
            literal.push('%');
            continue;
        }

        if !literal.is_empty() {
            items.push(FormatItem::Literal(std::mem::take(&mut literal)));
        }

        let item = match key {
            'd' => {
                let mut sub = String::new();
                if let Some(&(open, '{')) = chars.peek() {
                    chars.next();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, ch)) => sub.push(ch),
                            None => {
                                return Err(LoggerError::pattern(
                                    pattern,
                                    open,
                                    "unterminated '{' sub-pattern",
                                ))
                            }
                        }
                    }
                }
                let time = TimestampPattern::parse(&sub)
                    .map_err(|e| LoggerError::pattern(pattern, pos, e.to_string()))?;
                FormatItem::Time(time)
            }
            'T' => FormatItem::Tab,
            't' => FormatItem::ThreadId,
            'p' => FormatItem::Level,
            'c' => FormatItem::LoggerName,
            'f' => FormatItem::File,
            'l' => FormatItem::Line,
            'm' => FormatItem::Payload,
            'n' => FormatItem::Newline,
            other => {
                return Err(LoggerError::pattern(
                    pattern,
                    pos,
                    format!("unknown directive '%{}'", other),
                ))
            }
        };
        items.push(item);
    }

    if !literal.is_empty() {
        items.push(FormatItem::Literal(literal));
    }

    Ok(items)
}
