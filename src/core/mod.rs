//! Core logger types

pub mod appender;
pub mod buffer;
pub mod config;
#[cfg(unix)]
pub mod crash;
pub mod error;
mod flusher;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
mod session;
pub mod stack_trace;
pub mod timestamp;

pub use appender::Appender;
pub use buffer::{LogBuffer, DEFAULT_BUFFER_CAPACITY};
pub use config::{LoggerConfig, DEFAULT_FLUSH_INTERVAL};
#[cfg(unix)]
pub use crash::SIGNAL_FAULT_EXIT_CODE;
pub use error::{LoggerError, Result};
pub use log_entry::{current_thread_id, LogRecord};
pub use log_level::LogLevel;
pub use logger::{Logger, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use stack_trace::{StackTrace, STACK_TRACE_LIMIT};
