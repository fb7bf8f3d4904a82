//! Basic logger usage example
//!
//! Demonstrates buffered logging to a file, threshold filtering and the
//! synchronous error path.
//!
//! Run with: cargo run --example basic_usage

use rust_buffered_logger::prelude::*;
use rust_buffered_logger::{debug, error, info, log_if, warning};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Buffered Logger - Basic Usage Example ===\n");

    let log_path = std::env::temp_dir().join("buffered_logger_demo.log");

    let logger = Logger::new();
    logger.start(
        LoggerConfig::new(&log_path, LogLevel::Info).flush_interval(Duration::from_secs(1)),
    )?;

    println!("1. Logging at different levels (threshold INFO):");
    debug!(logger, "This debug message is filtered out");
    info!(logger, "This info message waits in the buffer");
    warning!(logger, "This warning waits in the buffer too");
    println!("   buffer empty: {}", logger.is_buffer_empty());

    println!("\n2. An error flushes the buffer and is written immediately:");
    error!(logger, "Something went wrong: code {}", 500);
    println!("   buffer empty: {}", logger.is_buffer_empty());

    println!("\n3. Conditional logging:");
    for attempt in 1..=3 {
        log_if!(logger, LogLevel::Warning, attempt == 3, "giving up after {} attempts", attempt);
    }

    logger.stop();

    let metrics = logger.metrics();
    println!(
        "\nBuffered: {}, synchronous: {}, filtered: {}",
        metrics.buffered(),
        metrics.synchronous(),
        metrics.filtered()
    );
    println!("\nLog written to {}:", log_path.display());
    print!("{}", std::fs::read_to_string(&log_path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
