//! Integration tests for logger system
//!
//! These tests verify:
//! - Destination selection (file, stderr fallback, open failure)
//! - Threshold filtering
//! - Buffered vs synchronous writes
//! - Background flushing and prompt shutdown
//! - Lifecycle misuse handling

use parking_lot::Mutex;
use rust_buffered_logger::prelude::*;
use rust_buffered_logger::{debug, error, info, log_if, warning};
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct MemoryAppender {
    out: Arc<Mutex<Vec<u8>>>,
}

impl MemoryAppender {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.out.lock()).into_owned()
    }
}

impl Appender for MemoryAppender {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.lock().extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn file_config(path: &Path, level: LogLevel) -> LoggerConfig {
    LoggerConfig::new(path, level).crash_handler(false)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[test]
#[serial(logger)]
fn test_file_contains_message_after_stop() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::new();
    logger
        .start(file_config(&log_file, LogLevel::Info))
        .expect("Failed to start logger");
    info!(logger, "written at shutdown");
    logger.stop();

    let metadata = fs::metadata(&log_file).expect("log file exists");
    assert!(metadata.len() > 0);
    let content = read(&log_file);
    assert!(content.contains("written at shutdown"));
    assert!(content.contains("    INFO Thread "));
    assert_eq!(content.lines().count(), 1);
}

#[test]
#[serial(logger)]
fn test_file_is_appended_across_sessions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    for run in 0..2 {
        let logger = Logger::new();
        logger
            .start(file_config(&log_file, LogLevel::Info))
            .expect("Failed to start logger");
        info!(logger, "session {}", run);
        logger.stop();
    }

    let content = read(&log_file);
    assert!(content.contains("session 0"));
    assert!(content.contains("session 1"));
}

#[test]
#[serial(logger)]
fn test_relative_path_falls_back_to_stderr() {
    let relative = "relative_fallback_test.log";

    let logger = Logger::new();
    logger
        .start(LoggerConfig::new(relative, LogLevel::Info).crash_handler(false))
        .expect("stderr fallback is not an error");
    assert!(logger.is_started());
    info!(logger, "goes to stderr");
    logger.stop();

    assert!(!Path::new(relative).exists());
}

#[test]
#[serial(logger)]
fn test_open_failure_is_returned_and_logger_stays_stopped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("no_such_dir").join("app.log");

    let logger = Logger::new();
    let result = logger.start(file_config(&log_file, LogLevel::Info));
    assert!(matches!(result, Err(LoggerError::DestinationOpen { .. })));
    assert!(!logger.is_started());

    // The failed attempt does not hold the process-wide slot
    let valid = temp_dir.path().join("app.log");
    logger
        .start(file_config(&valid, LogLevel::Info))
        .expect("start after failure");
    logger.stop();
}

#[test]
#[serial(logger)]
fn test_fatal_threshold_drops_everything_else() {
    let logger = Logger::new();
    let memory = MemoryAppender::default();
    logger
        .start_with_appender(
            LoggerConfig::default()
                .min_level(LogLevel::Fatal)
                .crash_handler(false)
                .fatal_exit(false),
            Box::new(memory.clone()),
        )
        .expect("start");

    error!(logger, "error");
    warning!(logger, "warning");
    info!(logger, "info");
    debug!(logger, "debug");
    assert!(logger.is_buffer_empty());
    logger.flush().expect("flush");
    assert!(memory.contents().is_empty());

    rust_buffered_logger::fatal!(logger, "only this");
    logger.stop();

    let out = memory.contents();
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("only this"));
}

#[test]
#[serial(logger)]
fn test_levels_below_threshold_never_grow_buffer() {
    for threshold in LogLevel::ALL {
        let logger = Logger::new();
        let memory = MemoryAppender::default();
        logger
            .start_with_appender(
                LoggerConfig::default()
                    .min_level(threshold)
                    .crash_handler(false)
                    .fatal_exit(false),
                Box::new(memory.clone()),
            )
            .expect("start");

        for level in LogLevel::ALL.into_iter().filter(|l| *l > threshold) {
            logger.log(level, 1, "t.rs", 1, format_args!("suppressed {}", level));
        }
        assert!(logger.is_buffer_empty(), "threshold {}", threshold);
        logger.stop();
        assert!(memory.contents().is_empty(), "threshold {}", threshold);
    }
}

#[test]
#[serial(logger)]
fn test_info_stays_buffered_until_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::new();
    logger
        .start(file_config(&log_file, LogLevel::Info))
        .expect("start");

    info!(logger, "deferred message");
    assert!(logger.buffer_contains("deferred message"));
    assert!(!read(&log_file).contains("deferred message"));

    error!(logger, "forcing message");
    assert!(logger.is_buffer_empty());
    let content = read(&log_file);
    let deferred = content.find("deferred message").expect("flushed");
    let forcing = content.find("forcing message").expect("written");
    assert!(deferred < forcing);

    logger.stop();
}

#[test]
#[serial(logger)]
fn test_overflowing_record_forces_flush() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::new();
    logger
        .start(file_config(&log_file, LogLevel::Debug).buffer_capacity(256))
        .expect("start");

    let mut sent = 0;
    while logger.metrics().synchronous() == 0 {
        debug!(logger, "record {}", sent);
        sent += 1;
        assert!(sent < 100, "buffer never overflowed");
    }

    // The overflowing record went out together with everything before it
    let content = read(&log_file);
    assert_eq!(content.lines().count(), sent);
    assert!(logger.is_buffer_empty());
    logger.stop();
}

#[test]
#[serial(logger)]
fn test_background_flush_runs_without_stop() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::new();
    logger
        .start(file_config(&log_file, LogLevel::Info).flush_interval(Duration::from_millis(50)))
        .expect("start");

    info!(logger, "flushed by timer");
    let deadline = Instant::now() + Duration::from_secs(5);
    while !read(&log_file).contains("flushed by timer") && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(read(&log_file).contains("flushed by timer"));
    assert!(logger.metrics().flushes() >= 1);
    logger.stop();
}

#[test]
#[serial(logger)]
fn test_stop_does_not_wait_for_flush_interval() {
    let logger = Logger::new();
    logger
        .start_with_appender(
            LoggerConfig::default().crash_handler(false),
            Box::new(MemoryAppender::default()),
        )
        .expect("start");

    let started = Instant::now();
    logger.stop();
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
#[serial(logger)]
fn test_lifecycle_misuse_is_counted_not_fatal() {
    let logger = Logger::new();
    logger.stop();
    assert_eq!(logger.metrics().usage_errors(), 1);

    logger
        .start_with_appender(
            LoggerConfig::default().crash_handler(false),
            Box::new(MemoryAppender::default()),
        )
        .expect("start");
    logger
        .start_with_appender(
            LoggerConfig::default().crash_handler(false),
            Box::new(MemoryAppender::default()),
        )
        .expect("second start");
    assert_eq!(logger.metrics().usage_errors(), 2);
    assert!(logger.is_started());

    logger.stop();
    logger.stop();
    assert_eq!(logger.metrics().usage_errors(), 3);
}

#[test]
#[serial(logger)]
fn test_logging_before_start_is_silent() {
    let logger = Logger::new();
    info!(logger, "nobody listening");
    error!(logger, "nobody listening");
    assert!(logger.is_buffer_empty());
    assert!(!logger.buffer_contains("nobody"));
    assert_eq!(logger.metrics().total_emitted(), 0);
    assert_eq!(logger.metrics().usage_errors(), 0);
}

#[test]
#[serial(logger)]
fn test_conditional_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::new();
    logger
        .start(file_config(&log_file, LogLevel::Info))
        .expect("start");
    log_if!(logger, LogLevel::Info, false, "guard was false");
    log_if!(logger, LogLevel::Info, true, "guard was true");
    logger.stop();

    let content = read(&log_file);
    assert!(!content.contains("guard was false"));
    assert!(content.contains("guard was true"));
}

#[test]
#[serial(logger)]
fn test_start_from_json_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let json = format!(
        r#"{{"path": {}, "min_level": "Warning", "crash_handler": false}}"#,
        serde_json::to_string(&log_file).expect("path to json")
    );

    let config = LoggerConfig::from_json(&json).expect("valid config");
    let logger = Logger::new();
    logger.start(config).expect("start");
    info!(logger, "below warning");
    warning!(logger, "at warning");
    logger.stop();

    let content = read(&log_file);
    assert!(!content.contains("below warning"));
    assert!(content.contains("WARNING Thread"));
}
