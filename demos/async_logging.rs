//! Async logging example
//!
//! Demonstrates the double-buffered async logger with several producer
//! threads and both overflow policies.
//!
//! Run with: cargo run --example async_logging

use bufferlog::prelude::*;
use bufferlog::info;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn run(policy: OverflowPolicy, path: &str) -> Result<()> {
    let logger = Arc::new(
        Logger::builder()
            .name(format!("async-{}", policy))
            .pattern("[%d{%H:%M:%S}][%t][%p]%T%m%n")
            .sink(FileSink::new(path)?)
            .async_mode()
            .overflow_policy(policy)
            .buffer_capacity(64 * 1024)
            .build()?,
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..25_000 {
                    info!(logger, "Thread {} - Message {}", thread_id, i);
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("A producer thread panicked");
        }
    }
    let produced = start.elapsed();

    // Waits until everything pushed so far has reached the file
    logger.shutdown();
    let drained = start.elapsed();

    let metrics = logger.metrics();
    println!(
        "   {}: produced in {:?}, drained in {:?}, {} swaps, {} producer waits",
        policy,
        produced,
        drained,
        metrics.buffer_swaps(),
        metrics.block_events()
    );
    Ok(())
}

fn main() -> Result<()> {
    println!("=== bufferlog - Async Logging Example ===\n");
    println!("4 threads x 25000 records each:");

    run(OverflowPolicy::Safe, "async_safe.log")?;
    run(OverflowPolicy::Unsafe, "async_unsafe.log")?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'async_safe.log' and 'async_unsafe.log' for file output");
    Ok(())
}
