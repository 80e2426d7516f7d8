//! Integration tests for the logging engine
//!
//! These tests verify:
//! - Level filtering and record order
//! - Exact rendering through the public API
//! - Best-effort fan-out and the failure channel
//! - Async delivery to files
//! - Size rolling
//! - Configuration documents and the registry

use bufferlog::core::LoggerRegistry;
use bufferlog::prelude::*;
use bufferlog::{error, fatal, info, warn};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

/// Sink collecting records in memory, one entry per write
#[derive(Clone, Default)]
struct MemorySink {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }

    fn text(&self) -> String {
        self.writes.lock().concat()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> bufferlog::Result<()> {
        self.writes.lock().push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }

    fn flush(&mut self) -> bufferlog::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

struct BrokenSink;

impl Sink for BrokenSink {
    fn write(&mut self, _bytes: &[u8]) -> bufferlog::Result<()> {
        Err(LoggerError::writer("disk unplugged"))
    }

    fn flush(&mut self) -> bufferlog::Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "broken"
    }
}

fn files_with_suffix(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|entry| entry.expect("Failed to read entry").path())
        .filter(|path| path.to_string_lossy().ends_with(suffix))
        .collect();
    files.sort();
    files
}

#[test]
fn test_threshold_delivers_in_order() {
    let memory = MemorySink::default();
    let logger = Logger::builder()
        .name("filter")
        .level(LogLevel::Warn)
        .pattern("%p:%m%n")
        .sink(memory.clone())
        .build()
        .expect("Failed to build logger");

    info!(logger, "dropped");
    warn!(logger, "w");
    error!(logger, "e");

    assert_eq!(memory.writes(), vec!["WARN:w\n", "ERROR:e\n"]);
    assert_eq!(logger.metrics().filtered_count(), 1);
}

#[test]
fn test_exact_rendering() {
    let memory = MemorySink::default();
    let logger = Logger::builder()
        .name("render")
        .pattern("[%p]%m%n")
        .sink(memory.clone())
        .build()
        .expect("Failed to build logger");

    info!(logger, "hello");
    assert_eq!(memory.text(), "[INFO]hello\n");
}

#[test]
fn test_default_pattern_fields() {
    let memory = MemorySink::default();
    let logger = Logger::builder()
        .name("fields")
        .sink(memory.clone())
        .build()
        .expect("Failed to build logger");

    logger.log(LogLevel::Error, "db.rs", 17, format_args!("connection lost"));

    let line = memory.text();
    // [HH:MM:SS][ThreadId(n)][fields][db.rs:17][ERROR]\tconnection lost\n
    assert!(line.ends_with("[fields][db.rs:17][ERROR]\tconnection lost\n"), "{line}");
    assert_eq!(&line[0..1], "[");
    assert_eq!(&line[9..11], "][");
    assert!(line[1..9].chars().all(|c| c.is_ascii_digit() || c == ':'));
    assert!(line.contains("[ThreadId("));
}

#[test]
fn test_thread_ids_differ_between_threads() {
    let memory = MemorySink::default();
    let logger = Arc::new(
        Logger::builder()
            .name("threads")
            .pattern("%t%n")
            .sink(memory.clone())
            .build()
            .expect("Failed to build logger"),
    );

    info!(logger, "main");
    let other = Arc::clone(&logger);
    thread::spawn(move || info!(other, "spawned"))
        .join()
        .expect("Thread panicked");

    let writes = memory.writes();
    assert_eq!(writes.len(), 2);
    assert_ne!(writes[0], writes[1]);
}

#[test]
fn test_failing_sink_is_isolated() {
    let first = MemorySink::default();
    let last = MemorySink::default();
    let logger = Logger::builder()
        .name("isolation")
        .pattern("%m")
        .sink(first.clone())
        .sink(BrokenSink)
        .sink(last.clone())
        .build()
        .expect("Failed to build logger");
    let failures = logger.failures();

    fatal!(logger, "still delivered");

    assert_eq!(first.text(), "still delivered");
    assert_eq!(last.text(), "still delivered");

    let failure = failures.try_recv().expect("Failure should be reported");
    assert_eq!(failure.logger, "isolation");
    assert_eq!(failure.sink, "broken");
    assert!(failure.error.to_string().contains("disk unplugged"));
    assert_eq!(logger.metrics().write_failures(), 1);
}

#[test]
fn test_async_logger_to_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("async.log");

    let logger = Logger::builder()
        .name("async-file")
        .pattern("%m%n")
        .sink(FileSink::new(&log_file).expect("Failed to create sink"))
        .async_mode()
        .buffer_capacity(1024)
        .build()
        .expect("Failed to build logger");

    for i in 0..1000 {
        info!(logger, "record {}", i);
    }
    logger.shutdown();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1000);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(*line, format!("record {}", i));
    }
    assert!(logger.metrics().buffer_swaps() >= 1);
}

#[test]
fn test_rolling_logger_splits_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let max_bytes = 200;

    let logger = Logger::builder()
        .name("rolling")
        .pattern("%m%n")
        .sink(RollingFileSink::new(temp_dir.path().join("app-"), max_bytes).expect("sink"))
        .build()
        .expect("Failed to build logger");

    // Every rendered record is exactly 10 bytes
    for i in 0..50 {
        info!(logger, "record{:02}", i);
    }
    drop(logger);

    let files = files_with_suffix(temp_dir.path(), ".log");
    assert!(files.len() >= 2, "expected a roll, got {:?}", files);

    let mut total = 0;
    for file in &files {
        let len = fs::metadata(file).expect("metadata").len();
        assert!(len <= max_bytes + 10, "{} is {} bytes", file.display(), len);
        total += len;
    }
    assert_eq!(total, 500);
}

#[test]
fn test_async_rolling_with_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = LoggerConfig::new("configured");
    config.kind = LoggerKind::Async;
    config.pattern = "%p %m%n".to_string();
    config.buffer_capacity = Some(512);
    config.sinks.push(SinkConfig::Rolling {
        base_path: temp_dir.path().join("svc-"),
        max_bytes: 1024,
        compress: false,
    });

    let json = config.to_json().expect("Failed to serialize");
    let parsed = LoggerConfig::from_json(&json).expect("Failed to parse");
    let logger = LoggerBuilder::from_config(&parsed)
        .build()
        .expect("Failed to build logger");
    assert_eq!(logger.kind(), LoggerKind::Async);

    for i in 0..200 {
        warn!(logger, "event {}", i);
    }
    logger.shutdown();

    let mut content = String::new();
    for file in files_with_suffix(temp_dir.path(), ".log") {
        content.push_str(&fs::read_to_string(file).expect("Failed to read"));
    }
    assert_eq!(content.lines().count(), 200);
    for i in [0, 99, 199] {
        assert!(content.contains(&format!("WARN event {}\n", i)));
    }
}

#[test]
fn test_invalid_pattern_rejected_at_build() {
    let err = Logger::builder()
        .name("bad")
        .pattern("[%q]")
        .build()
        .expect_err("Unknown directive must be rejected");
    assert!(matches!(err, LoggerError::InvalidPattern { position: 1, .. }));
}

#[test]
fn test_registry_lookup_and_fallback() {
    let registry = LoggerRegistry::new();
    for name in ["alpha", "beta"] {
        let logger = Logger::builder()
            .name(name)
            .sink(MemorySink::default())
            .build()
            .expect("Failed to build logger");
        registry.register(Arc::new(logger)).expect("Failed to register");
    }

    assert_eq!(registry.names(), vec!["alpha", "beta"]);
    assert_eq!(registry.lookup("beta").expect("beta").name(), "beta");
    assert!(registry.lookup("gamma").is_none());
    assert_eq!(registry.lookup("root").expect("root").name(), "root");

    let duplicate = Arc::new(Logger::builder().name("alpha").build().expect("build"));
    assert!(matches!(
        registry.register(duplicate),
        Err(LoggerError::DuplicateLogger(_))
    ));

    assert_eq!(get_logger("integration-unknown").name(), "root");
}

#[test]
fn test_shared_logger_across_threads() {
    let memory = MemorySink::default();
    let logger = Arc::new(
        Logger::builder()
            .name("shared")
            .pattern("%m%n")
            .sink(memory.clone())
            .build()
            .expect("Failed to build logger"),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    info!(logger, "{}-{}", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let writes = memory.writes();
    assert_eq!(writes.len(), 400);
    // Sync writes are whole records, never interleaved
    assert!(writes.iter().all(|w| w.ends_with('\n') && w.matches('\n').count() == 1));
}
