//! # bufferlog
//!
//! An embeddable logging engine with named loggers, pattern formatting and
//! pluggable sinks.
//!
//! ## Features
//!
//! - **Pattern Formatting**: patterns like `[%d{%H:%M:%S}][%p]%T%m%n` are
//!   compiled once and replayed for every record
//! - **Sync or Async**: write on the calling thread, or hand records to a
//!   double-buffered background consumer with a `Safe` (blocking) or
//!   `Unsafe` (growing) overflow policy
//! - **Sinks**: stdout, append-only file and size-rolling files
//! - **Registry**: process-wide lookup of loggers by name, with a root
//!   logger as the fallback
//!
//! ## Example
//!
//! ```
//! use bufferlog::prelude::*;
//! use bufferlog::info;
//!
//! let logger = Logger::builder()
//!     .name("app")
//!     .level(LogLevel::Info)
//!     .pattern("[%p]%m%n")
//!     .sink(StdoutSink::new())
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "listening on {}", 8080);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        get_logger, root_logger, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerKind, LoggerMetrics, LoggerRegistry, OverflowPolicy, Result, Sink, SinkConfig,
        SinkFailure,
    };
    pub use crate::sinks::{FileSink, RollingFileSink, StdoutSink};
}

pub use crate::core::{
    get_logger, root_logger, shutdown, AsyncEngine, Buffer, Formatter, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerKind, LoggerMetrics, LoggerRegistry,
    OverflowPolicy, Result, Sink, SinkConfig, SinkFailure,
};
pub use sinks::{FileSink, RollingFileSink, StdoutSink};
