//! Logger configuration
//!
//! Everything `Logger::start` needs, buildable in code or loaded from JSON.

use super::buffer::DEFAULT_BUFFER_CAPACITY;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default interval between background flushes (5 minutes)
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(300);

/// Configuration for one logging session
///
/// # Example
///
/// ```
/// use rust_buffered_logger::{LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::new("/var/log/app.log", LogLevel::Debug)
///     .crash_handler(false)
///     .buffer_capacity(8192);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Absolute path of the log file; anything else selects standard error
    pub path: PathBuf,
    /// Least severe level that is still emitted
    pub min_level: LogLevel,
    /// Install the fault-signal crash reporter
    pub crash_handler: bool,
    /// Terminate the process after a FATAL record
    pub fatal_exit: bool,
    /// Buffer size in bytes
    pub buffer_capacity: usize,
    /// Interval between background flushes
    #[serde(rename = "flush_interval_ms", with = "duration_millis")]
    pub flush_interval: Duration,
}

impl LoggerConfig {
    pub fn new(path: impl Into<PathBuf>, min_level: LogLevel) -> Self {
        Self {
            path: path.into(),
            min_level,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    ///
    /// ```
    /// use rust_buffered_logger::{LogLevel, LoggerConfig};
    ///
    /// let config = LoggerConfig::from_json(r#"{"path": "/tmp/app.log", "min_level": "Debug"}"#)
    ///     .unwrap();
    /// assert_eq!(config.min_level, LogLevel::Debug);
    /// assert!(config.fatal_exit);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(LoggerError::config(
                "LoggerConfig",
                "buffer_capacity must be non-zero",
            ));
        }
        if self.flush_interval.is_zero() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "flush_interval must be non-zero",
            ));
        }
        Ok(())
    }

    /// Whether `path` names a usable log file (non-empty and absolute)
    pub fn has_file_destination(&self) -> bool {
        is_valid_log_path(&self.path)
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn crash_handler(mut self, enabled: bool) -> Self {
        self.crash_handler = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fatal_exit(mut self, enabled: bool) -> Self {
        self.fatal_exit = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.buffer_capacity = bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            min_level: LogLevel::Info,
            crash_handler: true,
            fatal_exit: true,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }
}

pub(crate) fn is_valid_log_path(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
