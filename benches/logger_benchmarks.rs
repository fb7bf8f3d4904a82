//! Criterion benchmarks for rust_buffered_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_buffered_logger::prelude::*;
use rust_buffered_logger::{debug, error, info, LogBuffer, LogRecord};
use std::sync::Arc;
use std::time::Duration;

/// Destination that discards everything, so only the logger itself is measured
struct NullAppender;

impl Appender for NullAppender {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        black_box(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn started_logger(min_level: LogLevel) -> Logger {
    let logger = Logger::new();
    logger
        .start_with_appender(
            LoggerConfig::default()
                .min_level(min_level)
                .crash_handler(false)
                .flush_interval(Duration::from_millis(100)),
            Box::new(NullAppender),
        )
        .expect("Failed to start logger");
    logger
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = started_logger(LogLevel::Info);

    group.bench_function("info_buffered", |b| {
        b.iter(|| {
            info!(logger, "Processing item {}", black_box(42));
        });
    });

    group.bench_function("debug_filtered", |b| {
        b.iter(|| {
            debug!(logger, "Not emitted {}", black_box(42));
        });
    });

    group.bench_function("error_synchronous", |b| {
        b.iter(|| {
            error!(logger, "Request failed with {}", black_box(500));
        });
    });

    group.finish();
    logger.stop();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(started_logger(LogLevel::Info));

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..100 {
                            info!(logger, "Concurrent message {}", black_box(i));
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
    logger.stop();
}

// ============================================================================
// Record Formatting Benchmarks
// ============================================================================

fn bench_record_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_formatting");
    group.throughput(Throughput::Elements(1));

    group.bench_function("format_line", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                black_box(LogLevel::Info),
                black_box(7),
                black_box("bench.rs"),
                black_box(42),
                format_args!("Test message {}", black_box(1)),
            );
            black_box(record.format_line())
        });
    });

    group.bench_function("format_line_sanitized", |b| {
        b.iter(|| {
            let record = LogRecord::new(
                LogLevel::Warning,
                7,
                "bench.rs",
                42,
                format_args!("{}", black_box("line one\nline two\tand\rmore")),
            );
            black_box(record.format_line())
        });
    });

    group.finish();
}

// ============================================================================
// Buffer Benchmarks
// ============================================================================

fn bench_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    let line = b"01-01-2025 00:00:00,    INFO Thread     1, bench.rs:1 => message\n";
    group.throughput(Throughput::Bytes(line.len() as u64));

    group.bench_function("append_and_flush", |b| {
        let mut buffer = LogBuffer::with_capacity(4096).unwrap();
        let mut sink = NullAppender;
        b.iter(|| {
            if !buffer.try_append(black_box(line)) {
                buffer.flush_to(&mut sink).unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logging,
    bench_concurrent_logging,
    bench_record_formatting,
    bench_buffer,
);

criterion_main!(benches);
