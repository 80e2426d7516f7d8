//! Log record structure

use super::log_level::LogLevel;
use std::cell::RefCell;
use std::rc::Rc;

// Thread-local cache so repeated records from one thread don't re-format the id
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<Rc<str>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn current_thread_id() -> Rc<str> {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| Rc::from(format!("{:?}", std::thread::current().id())))
            .clone()
    })
}

/// Seconds since the Unix epoch
fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Snapshot of one log event.
///
/// Built once per log call that passes the level gate and consumed by the
/// formatter before the call returns. String fields borrow from the caller.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub timestamp: i64,
    pub level: LogLevel,
    pub file: &'a str,
    pub line: u32,
    pub thread_id: Rc<str>,
    pub logger: &'a str,
    pub payload: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Capture a record on the current thread at the current time
    pub fn new(level: LogLevel, file: &'a str, line: u32, logger: &'a str, payload: &'a str) -> Self {
        Self {
            timestamp: now_secs(),
            level,
            file,
            line,
            thread_id: current_thread_id(),
            logger,
            payload,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, thread_id: &str) -> Self {
        self.thread_id = Rc::from(thread_id);
        self
    }
}
