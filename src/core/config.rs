//! Serializable logger configuration
//!
//! A [`LoggerConfig`] describes everything needed to build one logger and
//! can be loaded from JSON:
//!
//! ```
//! use bufferlog::core::{LoggerConfig, LoggerKind, SinkConfig};
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "name": "net",
//!     "level": "WARN",
//!     "pattern": "[%p]%m%n",
//!     "kind": "async",
//!     "overflow_policy": "safe",
//!     "sinks": [
//!         { "kind": "stdout" },
//!         { "kind": "rolling", "base_path": "logs/net-", "max_bytes": 1048576 }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(config.kind, LoggerKind::Async);
//! assert_eq!(config.sinks[0], SinkConfig::Stdout);
//! ```

use super::error::{LoggerError, Result};
use super::formatter::DEFAULT_PATTERN;
use super::log_level::LogLevel;
use super::overflow_policy::OverflowPolicy;
use super::sink::Sink;
use crate::sinks::{FileSink, RollingFileSink, StdoutSink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Delivery mode of a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerKind {
    /// Sinks are written on the calling thread
    #[default]
    Sync,
    /// Records are pushed to a background consumer thread
    Async,
}

impl fmt::Display for LoggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerKind::Sync => write!(f, "sync"),
            LoggerKind::Async => write!(f, "async"),
        }
    }
}

/// Descriptor of one sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SinkConfig {
    Stdout,
    File {
        path: PathBuf,
    },
    Rolling {
        base_path: PathBuf,
        max_bytes: u64,
        #[serde(default)]
        compress: bool,
    },
}

impl SinkConfig {
    /// Open the described sink
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidConfiguration`](LoggerError::InvalidConfiguration)
    /// error if the target cannot be created or opened.
    pub fn build(&self) -> Result<Box<dyn Sink>> {
        self.open().map_err(|e| match e {
            e if e.is_configuration() => e,
            e => LoggerError::config(format!("{} sink", self.kind_name()), e.to_string()),
        })
    }

    fn kind_name(&self) -> &'static str {
        match self {
            SinkConfig::Stdout => "stdout",
            SinkConfig::File { .. } => "file",
            SinkConfig::Rolling { .. } => "rolling",
        }
    }

    fn open(&self) -> Result<Box<dyn Sink>> {
        Ok(match self {
            SinkConfig::Stdout => Box::new(StdoutSink::new()),
            SinkConfig::File { path } => Box::new(FileSink::new(path.clone())?),
            SinkConfig::Rolling {
                base_path,
                max_bytes,
                compress,
            } => Box::new(
                RollingFileSink::new(base_path.clone(), *max_bytes)?.with_compression(*compress),
            ),
        })
    }
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

/// Complete description of one logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
    #[serde(default)]
    pub kind: LoggerKind,
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
    /// Capacity of each async buffer in bytes; engine default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::default(),
            pattern: default_pattern(),
            sinks: Vec::new(),
            kind: LoggerKind::default(),
            overflow_policy: OverflowPolicy::default(),
            buffer_capacity: None,
        }
    }

    /// Parse a configuration document
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or an empty logger name.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a document holding an array of logger configurations
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let configs: Vec<LoggerConfig> = serde_json::from_str(json)?;
        for config in &configs {
            config.validate()?;
        }
        Ok(configs)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "logger name must not be empty"));
        }
        if self.buffer_capacity == Some(0) {
            return Err(LoggerError::config(
                "LoggerConfig",
                "buffer_capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}
