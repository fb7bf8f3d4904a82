//! Log level definitions
//!
//! Levels are ordered most severe first: `Fatal < Error < Warning < Info < Debug`.
//! A record passes the threshold when its level compares `<=` the threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width the level label is padded to in a formatted record
pub const LEVEL_LABEL_WIDTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Info = 3,
    Debug = 4,
}

impl LogLevel {
    /// All levels, most severe first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Whether a record at this level is emitted under `threshold`
    #[inline]
    pub fn is_enabled_for(self, threshold: LogLevel) -> bool {
        self <= threshold
    }

    /// Records at this level bypass the buffer and go straight to the destination
    #[inline]
    pub fn is_synchronous(self) -> bool {
        matches!(self, LogLevel::Fatal | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FATAL" => Ok(LogLevel::Fatal),
            "ERROR" => Ok(LogLevel::Error),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_is_most_severe() {
        assert!(LogLevel::Fatal < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::Fatal.ordinal(), 0);
        assert_eq!(LogLevel::Debug.ordinal(), 4);
    }

    #[test]
    fn test_threshold() {
        assert!(LogLevel::Fatal.is_enabled_for(LogLevel::Fatal));
        assert!(!LogLevel::Error.is_enabled_for(LogLevel::Fatal));
        assert!(LogLevel::Warning.is_enabled_for(LogLevel::Info));
        assert!(!LogLevel::Debug.is_enabled_for(LogLevel::Info));
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" Debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:>7}", LogLevel::Info), "   INFO");
        assert_eq!(format!("{:>7}", LogLevel::Warning), "WARNING");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }
}
