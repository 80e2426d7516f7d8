//! Basic logger usage example
//!
//! Demonstrates synchronous logging to stdout, level filtering and the
//! global registry.
//!
//! Run with: cargo run --example basic_usage

use bufferlog::prelude::*;
use bufferlog::{debug, error, fatal, info, warn};

fn main() -> Result<()> {
    println!("=== bufferlog - Basic Usage Example ===\n");

    // The root logger needs no setup
    let root = root_logger();
    info!(root, "Logging through the root logger");

    // A named logger with its own pattern, registered globally
    let logger = Logger::builder()
        .name("basic")
        .level(LogLevel::Debug)
        .pattern("[%d{%Y-%m-%d %H:%M:%S}][%c][%p]%T%m%n")
        .sink(StdoutSink::new())
        .build_global()?;

    println!("\n1. Logging at every level:");
    debug!(logger, "Debug message - detailed debugging information");
    info!(logger, "Info message - general information");
    warn!(logger, "Warning message - something unexpected");
    error!(logger, "Error message - something failed");
    fatal!(logger, "Fatal message - critical failure");

    println!("\n2. Formatted messages:");
    let user = "alice";
    let attempts = 3;
    info!(logger, "User {} logged in after {} attempts", user, attempts);

    println!("\n3. Raising the threshold to WARN:");
    logger.set_level(LogLevel::Warn);
    info!(logger, "This info message is filtered out");
    warn!(logger, "This warning is shown");

    println!("\n4. Looking the logger up by name:");
    let same = get_logger("basic");
    error!(same, "Found '{}' in the registry", same.name());

    let unknown = get_logger("no-such-logger");
    info!(unknown, "Unknown names fall back to '{}'", unknown.name());

    println!(
        "\nLogged {} records, filtered {}",
        logger.metrics().total_logged(),
        logger.metrics().filtered_count()
    );

    bufferlog::shutdown();
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
