//! Logging macros for ergonomic log message formatting.
//!
//! These macros capture the call site with `file!()` and `line!()` and take
//! the same arguments as `format!`. Records below the logger's threshold are
//! discarded before the arguments are formatted.
//!
//! # Examples
//!
//! ```
//! use bufferlog::prelude::*;
//! use bufferlog::info;
//!
//! let logger = Logger::builder().name("server").build().unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Without a logger the record goes to the root logger
//! info!("Configuration loaded from {}", "app.json");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use bufferlog::prelude::*;
/// # let logger = Logger::builder().name("doc").build().unwrap();
/// use bufferlog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, file!(), line!(), format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use bufferlog::prelude::*;
/// # let logger = Logger::builder().name("doc").build().unwrap();
/// use bufferlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::root_logger(), $crate::LogLevel::Debug, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::root_logger(), $crate::LogLevel::Info, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use bufferlog::prelude::*;
/// # let logger = Logger::builder().name("doc").build().unwrap();
/// use bufferlog::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::root_logger(), $crate::LogLevel::Warn, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::root_logger(), $crate::LogLevel::Error, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// Delivery is the same as for any other level; the process keeps running.
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($arg:tt)*) => {
        $crate::log!($crate::root_logger(), $crate::LogLevel::Fatal, $fmt $($arg)*)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
