//! Main logger implementation

use super::{
    async_engine::AsyncEngine,
    buffer::{Buffer, DEFAULT_BUFFER_SIZE},
    config::{LoggerConfig, LoggerKind, SinkConfig},
    error::{LoggerError, Result},
    formatter::{Formatter, DEFAULT_PATTERN},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    overflow_policy::OverflowPolicy,
    registry::LoggerRegistry,
    reporter::{FailureReporter, SinkFailure},
    sink::Sink,
};
use crate::sinks::StdoutSink;
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

enum Delivery {
    /// Sinks written on the calling thread, one caller at a time
    Sync(Mutex<Vec<Box<dyn Sink>>>),
    /// Sinks owned by the engine's consumer thread
    Async(AsyncEngine),
}

/// A named, leveled logger delivering rendered records to its sinks
///
/// Build one with [`Logger::builder`]. Both delivery modes expose the same
/// logging surface; see the [`log!`](crate::log) family of macros for the
/// usual entry point.
pub struct Logger {
    name: String,
    level: AtomicU8,
    formatter: Formatter,
    delivery: Delivery,
    /// Metrics for observability (filtered count, failures, swaps, etc.)
    metrics: Arc<LoggerMetrics>,
    reporter: FailureReporter,
}

impl Logger {
    /// Create a logger that writes to its sinks on the calling thread
    pub fn new_sync(
        name: impl Into<String>,
        level: LogLevel,
        formatter: Formatter,
        sinks: Vec<Box<dyn Sink>>,
    ) -> Self {
        let name = name.into();
        let metrics = Arc::new(LoggerMetrics::new());
        let reporter = FailureReporter::new(&name, Arc::clone(&metrics));

        Self {
            name,
            level: AtomicU8::new(level as u8),
            formatter,
            delivery: Delivery::Sync(Mutex::new(sinks)),
            metrics,
            reporter,
        }
    }

    /// Create a logger that hands records to a background consumer thread
    ///
    /// `capacity` is the size in bytes of each of the engine's two buffers.
    pub fn new_async(
        name: impl Into<String>,
        level: LogLevel,
        formatter: Formatter,
        sinks: Vec<Box<dyn Sink>>,
        policy: OverflowPolicy,
        capacity: usize,
    ) -> Self {
        let name = name.into();
        let metrics = Arc::new(LoggerMetrics::new());
        let reporter = FailureReporter::new(&name, Arc::clone(&metrics));

        let mut sinks = sinks;
        let drain_reporter = reporter.clone();
        let engine = AsyncEngine::with_metrics(
            Box::new(move |buffer: &Buffer| {
                write_all_sinks(&mut sinks, buffer.readable_slice(), &drain_reporter);
            }),
            policy,
            capacity,
            Arc::clone(&metrics),
        );

        Self {
            name,
            level: AtomicU8::new(level as u8),
            formatter,
            delivery: Delivery::Async(engine),
            metrics,
            reporter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LoggerKind {
        match self.delivery {
            Delivery::Sync(_) => LoggerKind::Sync,
            Delivery::Async(_) => LoggerKind::Async,
        }
    }

    /// Overflow policy of the async engine, `None` for sync loggers
    pub fn overflow_policy(&self) -> Option<OverflowPolicy> {
        match &self.delivery {
            Delivery::Sync(_) => None,
            Delivery::Async(engine) => Some(engine.policy()),
        }
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Current threshold
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Whether a record at `level` would pass the threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 >= self.level.load(Ordering::Relaxed)
    }

    /// Log one record
    ///
    /// Records below the threshold return before anything is formatted.
    /// Sink failures never propagate to the caller; they are reported on
    /// stderr and through [`failures`](Self::failures).
    pub fn log(&self, level: LogLevel, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let payload: Cow<'_, str> = match args.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(fmt::format(args)),
        };
        let record = LogRecord::new(level, file, line, &self.name, &payload);
        let text = self.formatter.render(&record);
        self.metrics.record_logged();

        match &self.delivery {
            Delivery::Sync(sinks) => {
                let mut sinks = sinks.lock();
                write_all_sinks(&mut sinks, text.as_bytes(), &self.reporter);
            }
            Delivery::Async(engine) => {
                if let Err(e) = engine.push(text.as_bytes()) {
                    self.reporter.report("async_engine", e);
                }
            }
        }
    }

    #[inline]
    pub fn debug(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, file, line, args);
    }

    #[inline]
    pub fn info(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, file, line, args);
    }

    #[inline]
    pub fn warn(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, file, line, args);
    }

    #[inline]
    pub fn error(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, file, line, args);
    }

    #[inline]
    pub fn fatal(&self, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Fatal, file, line, args);
    }

    /// Receiver for sink failures observed by this logger
    ///
    /// # Example
    ///
    /// ```
    /// use bufferlog::{info, Logger};
    ///
    /// let logger = Logger::builder().name("app").build().unwrap();
    /// let failures = logger.failures();
    ///
    /// info!(logger, "hello");
    /// assert!(failures.try_recv().is_err());
    /// ```
    pub fn failures(&self) -> Receiver<SinkFailure> {
        self.reporter.receiver()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Flush every sink of a sync logger
    ///
    /// Async sinks are flushed by the consumer thread after each drained
    /// buffer, so this is a no-op for async loggers.
    pub fn flush(&self) -> Result<()> {
        if let Delivery::Sync(sinks) = &self.delivery {
            for sink in sinks.lock().iter_mut() {
                sink.flush()?;
            }
        }
        Ok(())
    }

    /// Drain and stop the async engine, or flush a sync logger
    ///
    /// Everything logged before this call reaches the sinks before it
    /// returns. Records logged afterwards through an async logger are
    /// rejected and reported. Calling it twice is harmless.
    pub fn shutdown(&self) {
        match &self.delivery {
            Delivery::Async(engine) => engine.stop(),
            Delivery::Sync(_) => {
                if let Err(e) = self.flush() {
                    eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
                }
            }
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use bufferlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("worker")
    ///     .level(LogLevel::Debug)
    ///     .pattern("[%p]%m%n")
    ///     .async_mode()
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.kind(), LoggerKind::Async);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("kind", &self.kind())
            .field("pattern", &self.formatter.pattern())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();

        let failures = self.metrics.write_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' shutting down after {} sink failures (failure rate: {:.2}%)",
                self.name,
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Best-effort fan-out of `bytes` to every sink in registration order
///
/// **Per-sink panic isolation**: each sink call is wrapped in catch_unwind so
/// that one failing sink cannot keep the others from receiving the data.
fn write_all_sinks(sinks: &mut [Box<dyn Sink>], bytes: &[u8], reporter: &FailureReporter) {
    for sink in sinks.iter_mut() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<()> {
            sink.write(bytes)?;
            sink.flush()
        }));

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => reporter.report(sink.name(), e),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                     Other sinks continue to function.",
                    sink.name(),
                    panic_msg
                );
                reporter.report(sink.name(), LoggerError::writer(format!("sink panicked: {}", panic_msg)));
            }
        }
    }
}

enum PendingSink {
    Ready(Box<dyn Sink>),
    Config(SinkConfig),
}

/// Builder for constructing a Logger with a fluent API
///
/// Sinks are written in the order they were added. A logger built without
/// any sink writes to stdout.
///
/// # Example
/// ```
/// use bufferlog::prelude::*;
///
/// let logger = Logger::builder()
///     .name("app")
///     .level(LogLevel::Warn)
///     .pattern("[%d{%H:%M:%S}][%p] %m%n")
///     .sink(StdoutSink::new())
///     .async_mode()
///     .overflow_policy(OverflowPolicy::Safe)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    name: String,
    level: LogLevel,
    pattern: String,
    sinks: Vec<PendingSink>,
    kind: LoggerKind,
    overflow_policy: OverflowPolicy,
    buffer_capacity: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::new(),
            level: LogLevel::Debug,
            pattern: DEFAULT_PATTERN.to_string(),
            sinks: Vec::new(),
            kind: LoggerKind::Sync,
            overflow_policy: OverflowPolicy::Safe,
            buffer_capacity: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Start from a configuration document
    pub fn from_config(config: &LoggerConfig) -> Self {
        let mut builder = Self::new()
            .name(config.name.clone())
            .level(config.level)
            .pattern(config.pattern.clone())
            .kind(config.kind)
            .overflow_policy(config.overflow_policy);
        if let Some(capacity) = config.buffer_capacity {
            builder = builder.buffer_capacity(capacity);
        }
        for sink in &config.sinks {
            builder = builder.sink_config(sink.clone());
        }
        builder
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the formatter pattern; it is compiled in [`build`](Self::build)
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Add an already constructed sink
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(PendingSink::Ready(Box::new(sink)));
        self
    }

    /// Add a sink that is opened in [`build`](Self::build)
    #[must_use = "builder methods return a new value"]
    pub fn sink_config(mut self, sink: SinkConfig) -> Self {
        self.sinks.push(PendingSink::Config(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn kind(mut self, kind: LoggerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Deliver through a background consumer thread
    ///
    /// If not called, the logger writes synchronously.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(self) -> Self {
        self.kind(LoggerKind::Async)
    }

    /// Set the overflow policy for async logging (default `Safe`)
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Shorthand for `overflow_policy(OverflowPolicy::Unsafe)`
    ///
    /// Producers never block but buffered memory is unbounded.
    #[must_use = "builder methods return a new value"]
    pub fn unsafe_async(self) -> Self {
        self.overflow_policy(OverflowPolicy::Unsafe)
    }

    /// Size in bytes of each async buffer
    #[must_use = "builder methods return a new value"]
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a malformed pattern, a zero buffer capacity
    /// or a sink that cannot be opened.
    pub fn build(self) -> Result<Logger> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("LoggerBuilder", "logger name must not be empty"));
        }
        if self.buffer_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerBuilder",
                "buffer capacity must be greater than zero",
            ));
        }

        let formatter = Formatter::compile(&self.pattern)?;

        let mut sinks: Vec<Box<dyn Sink>> = Vec::with_capacity(self.sinks.len().max(1));
        for pending in self.sinks {
            sinks.push(match pending {
                PendingSink::Ready(sink) => sink,
                PendingSink::Config(config) => config.build()?,
            });
        }
        if sinks.is_empty() {
            sinks.push(Box::new(StdoutSink::new()));
        }

        Ok(match self.kind {
            LoggerKind::Sync => Logger::new_sync(self.name, self.level, formatter, sinks),
            LoggerKind::Async => Logger::new_async(
                self.name,
                self.level,
                formatter,
                sinks,
                self.overflow_policy,
                self.buffer_capacity,
            ),
        })
    }

    /// Build the Logger and register it in the global registry
    ///
    /// # Errors
    ///
    /// Fails like [`build`](Self::build), or if the name is already taken.
    pub fn build_global(self) -> Result<Arc<Logger>> {
        let logger = Arc::new(self.build()?);
        LoggerRegistry::global().register(Arc::clone(&logger))?;
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
