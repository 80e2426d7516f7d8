//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed configuration document
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Formatter pattern rejected at compile time
    #[error("Invalid pattern '{pattern}' at byte {position}: {message}")]
    InvalidPattern {
        pattern: String,
        position: usize,
        message: String,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A logger with this name is already registered
    #[error("Logger '{0}' is already registered")]
    DuplicateLogger(String),

    /// Engine no longer accepts data
    #[error("Logger already stopped")]
    LoggerStopped,

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a pattern error pointing at the offending byte offset
    pub fn pattern(pattern: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        LoggerError::InvalidPattern {
            pattern: pattern.into(),
            position,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error belongs to the configuration class
    ///
    /// Configuration errors are only ever returned from constructors and
    /// builders; they never surface from a log call. A sink opened through
    /// [`SinkConfig::build`](crate::core::SinkConfig::build) reports an
    /// unopenable target in this class; calling a sink constructor directly
    /// keeps the underlying file error.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::InvalidPattern { .. }
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::DuplicateLogger(_)
                | LoggerError::JsonError(_)
        )
    }
}
