//! Core logger types and traits

pub mod async_engine;
pub mod buffer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod overflow_policy;
pub mod registry;
mod reporter;
pub mod sink;
pub mod timestamp;

pub use async_engine::{AsyncEngine, DrainCallback};
pub use buffer::{Buffer, DEFAULT_BUFFER_SIZE, INCREMENT_BUFFER_SIZE, THRESHOLD_BUFFER_SIZE};
pub use config::{LoggerConfig, LoggerKind, SinkConfig};
pub use error::{LoggerError, Result};
pub use formatter::{FormatItem, Formatter, DEFAULT_PATTERN};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use overflow_policy::OverflowPolicy;
pub use registry::{get_logger, root_logger, shutdown, LoggerRegistry, ROOT_LOGGER_NAME};
pub use reporter::{SinkFailure, FAILURE_CHANNEL_CAPACITY};
pub use sink::Sink;
pub use timestamp::{TimestampPattern, DEFAULT_TIME_PATTERN};
