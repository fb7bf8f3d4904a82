//! # Rust Buffered Logger
//!
//! A process-embedded logger that buffers formatted records in memory,
//! flushes them to one destination (a file, or standard error as fallback),
//! and writes a stack trace when the process hits a fatal condition.
//!
//! ## Emit rules
//!
//! For a record at level `L` with the session threshold `T`:
//!
//! - `L` less severe than `T`: dropped.
//! - `FATAL`: the buffer is flushed and the record written directly, followed
//!   by a stack trace; the logger is stopped and the process exits with
//!   [`FATAL_EXIT_CODE`]. With fatal exit disabled only the record is written.
//! - `ERROR`, or a record that would fill the buffer: the buffer is flushed
//!   and the record written directly.
//! - Anything else is appended to the buffer, which a background thread
//!   flushes every [`DEFAULT_FLUSH_INTERVAL`] (configurable) and `stop` flushes
//!   one last time.
//!
//! On Unix a `SIGSEGV` handler (enabled by default) flushes the buffer, writes
//! a crash report and exits with `SIGNAL_FAULT_EXIT_CODE`.
//!
//! ```no_run
//! use rust_buffered_logger::prelude::*;
//! use rust_buffered_logger::{error, info};
//!
//! let logger = Logger::new();
//! logger.start(LoggerConfig::new("/var/log/app.log", LogLevel::Info))?;
//!
//! info!(logger, "listening on port {}", 8080);
//! error!(logger, "upstream unreachable");
//!
//! logger.stop();
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        current_thread_id, Appender, LogLevel, Logger, LoggerConfig, LoggerError, LoggerMetrics,
        Result, StackTrace, FATAL_EXIT_CODE,
    };
}

pub use appenders::{ConsoleAppender, FileAppender};
#[cfg(unix)]
pub use core::SIGNAL_FAULT_EXIT_CODE;
pub use core::{
    current_thread_id, Appender, LogBuffer, LogLevel, LogRecord, Logger, LoggerConfig,
    LoggerError, LoggerMetrics, Result, StackTrace, DEFAULT_BUFFER_CAPACITY,
    DEFAULT_FLUSH_INTERVAL, FATAL_EXIT_CODE, STACK_TRACE_LIMIT,
};
