//! Logging macros for ergonomic log message formatting.
//!
//! Each macro fills in the calling thread's id, `file!()` and `line!()`, and
//! takes `format!`-style arguments.
//!
//! # Examples
//!
//! ```
//! use rust_buffered_logger::prelude::*;
//! use rust_buffered_logger::{info, log_if, warning};
//!
//! let logger = Logger::new();
//!
//! // Not started yet: silently dropped
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! warning!(logger, "Port {} already in use, retrying", port);
//! log_if!(logger, LogLevel::Info, port > 1024, "unprivileged port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_buffered_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $crate::current_thread_id(),
            file!(),
            line!(),
            format_args!($($arg)+),
        )
    };
}

/// Log a message only when the guard is true.
///
/// The format arguments are not evaluated when the guard is false.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_buffered_logger::log_if;
/// let retries = 3;
/// log_if!(logger, LogLevel::Warning, retries > 2, "retried {} times", retries);
/// ```
#[macro_export]
macro_rules! log_if {
    ($logger:expr, $level:expr, $cond:expr, $($arg:tt)+) => {
        if $cond {
            $crate::log!($logger, $level, $($arg)+)
        }
    };
}

/// Log a fatal-level message.
///
/// With the default configuration this terminates the process after the
/// record and a stack trace are written.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_buffered_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_buffered_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_buffered_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}
