//! File logging example
//!
//! Demonstrates the append-only file sink, the size-rolling sink and
//! loading a logger from a JSON configuration.
//!
//! Run with: cargo run --example file_logging

use bufferlog::prelude::*;
use bufferlog::{error, info, warn};

fn main() -> Result<()> {
    println!("=== bufferlog - File Logging Example ===\n");

    println!("1. Single file:");
    let logger = Logger::builder()
        .name("file")
        .pattern("[%d{%Y-%m-%d %H:%M:%S}][%p]%T%m%n")
        .sink(FileSink::new("logs/application.log")?)
        .build()?;
    info!(logger, "Application started");
    warn!(logger, "Configuration file not found, using defaults");
    error!(logger, "Failed to connect to database");
    println!("   Written to logs/application.log");

    println!("\n2. Rolling files of at most ~4 KiB, compressed after rolling:");
    let rolling = RollingFileSink::new("logs/rolling-", 4 * 1024)?.with_compression(true);
    let logger = Logger::builder()
        .name("rolling")
        .pattern("[%d][%f:%l][%p]%T%m%n")
        .sink(rolling)
        .build()?;
    for i in 0..500 {
        info!(logger, "Rolling record number {}", i);
    }
    println!("   Written to logs/rolling-*.log");

    println!("\n3. From a configuration document:");
    let config = LoggerConfig::from_json(
        r#"{
            "name": "configured",
            "level": "INFO",
            "pattern": "%p %c: %m%n",
            "kind": "async",
            "sinks": [
                { "kind": "stdout" },
                { "kind": "file", "path": "logs/configured.log" }
            ]
        }"#,
    )?;
    let logger = LoggerBuilder::from_config(&config).build()?;
    info!(logger, "Configured logger is running");
    logger.shutdown();

    let failures: Vec<SinkFailure> = logger.failures().try_iter().collect();
    println!("   {} sink failures reported", failures.len());

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
