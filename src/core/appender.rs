//! Appender trait for the log destination

use super::error::Result;

/// A single log destination receiving already formatted bytes
pub trait Appender: Send {
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Standard error is shared with the rest of the process and never closed
    fn is_stderr(&self) -> bool {
        false
    }
}
