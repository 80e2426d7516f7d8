//! Process-wide registry of named loggers

use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::log_level::LogLevel;
use super::logger::Logger;
use crate::sinks::StdoutSink;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Name reserved for the root logger
pub const ROOT_LOGGER_NAME: &str = "root";

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

/// Maps logger names to loggers
///
/// Every registry owns a root logger: synchronous, threshold `DEBUG`, the
/// default pattern and a single stdout sink. Looking up an unknown name
/// yields `None`; [`get_logger`] falls back to the root logger instead.
///
/// # Example
///
/// ```
/// use bufferlog::core::LoggerRegistry;
/// use bufferlog::Logger;
/// use std::sync::Arc;
///
/// let registry = LoggerRegistry::new();
/// let logger = Arc::new(Logger::builder().name("db").build().unwrap());
/// registry.register(logger).unwrap();
///
/// assert!(registry.lookup("db").is_some());
/// assert!(registry.lookup("cache").is_none());
/// assert_eq!(registry.root().name(), "root");
/// ```
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    root: Arc<Logger>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        let root = Logger::new_sync(
            ROOT_LOGGER_NAME,
            LogLevel::Debug,
            Formatter::default(),
            vec![Box::new(StdoutSink::new())],
        );

        Self {
            loggers: RwLock::new(HashMap::new()),
            root: Arc::new(root),
        }
    }

    /// The process-wide registry, created on first use
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    /// Register `logger` under its own name
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::DuplicateLogger`] if the name is taken or is
    /// the reserved root name. The existing entry is left untouched.
    pub fn register(&self, logger: Arc<Logger>) -> Result<()> {
        let name = logger.name().to_string();
        if name == ROOT_LOGGER_NAME {
            return Err(LoggerError::DuplicateLogger(name));
        }

        let mut loggers = self.loggers.write();
        if loggers.contains_key(&name) {
            return Err(LoggerError::DuplicateLogger(name));
        }
        loggers.insert(name, logger);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Logger>> {
        if name == ROOT_LOGGER_NAME {
            return Some(self.root());
        }
        self.loggers.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        name == ROOT_LOGGER_NAME || self.loggers.read().contains_key(name)
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Registered names, excluding the root logger, in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Drain every registered logger and flush the root logger
    ///
    /// Loggers held by a static registry are never dropped, so call this
    /// before the process exits to get pending async records written.
    pub fn shutdown_all(&self) {
        for logger in self.loggers.read().values() {
            logger.shutdown();
        }
        self.root.shutdown();
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up `name` in the global registry, falling back to the root logger
pub fn get_logger(name: &str) -> Arc<Logger> {
    let registry = LoggerRegistry::global();
    registry.lookup(name).unwrap_or_else(|| registry.root())
}

/// The global root logger
pub fn root_logger() -> Arc<Logger> {
    LoggerRegistry::global().root()
}

/// Drain and flush every logger in the global registry
pub fn shutdown() {
    LoggerRegistry::global().shutdown_all();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerKind, DEFAULT_PATTERN};

    fn named(name: &str) -> Arc<Logger> {
        Arc::new(Logger::builder().name(name).build().unwrap())
    }

    #[test]
    fn test_root_logger_defaults() {
        let registry = LoggerRegistry::new();
        let root = registry.root();
        assert_eq!(root.name(), ROOT_LOGGER_NAME);
        assert_eq!(root.kind(), LoggerKind::Sync);
        assert_eq!(root.level(), LogLevel::Debug);
        assert_eq!(root.formatter().pattern(), DEFAULT_PATTERN);
        assert!(registry.contains(ROOT_LOGGER_NAME));
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = LoggerRegistry::new();
        let logger = named("net");
        registry.register(Arc::clone(&logger)).unwrap();

        let found = registry.lookup("net").unwrap();
        assert!(Arc::ptr_eq(&found, &logger));
        assert!(registry.lookup("missing").is_none());
        assert_eq!(registry.names(), vec!["net".to_string()]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let registry = LoggerRegistry::new();
        let first = named("dup");
        registry.register(Arc::clone(&first)).unwrap();

        let err = registry.register(named("dup")).unwrap_err();
        assert!(matches!(err, LoggerError::DuplicateLogger(ref n) if n == "dup"));
        assert!(Arc::ptr_eq(&registry.lookup("dup").unwrap(), &first));

        assert!(registry.register(named(ROOT_LOGGER_NAME)).is_err());
    }

    #[test]
    fn test_global_falls_back_to_root() {
        let logger = get_logger("registry-tests-never-registered");
        assert_eq!(logger.name(), ROOT_LOGGER_NAME);
        assert!(Arc::ptr_eq(&logger, &root_logger()));
    }

    #[test]
    fn test_build_global_registers() {
        let logger = Logger::builder()
            .name("registry-tests-global")
            .build_global()
            .unwrap();
        assert!(Arc::ptr_eq(&get_logger("registry-tests-global"), &logger));

        let again = Logger::builder().name("registry-tests-global").build_global();
        assert!(again.is_err());
    }
}
