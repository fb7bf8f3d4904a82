//! In-memory record buffer
//!
//! Holds formatted lines until they are flushed to the destination. The fill
//! level always stays strictly below the capacity: a line that would reach it is
//! refused and the caller writes it synchronously instead.

use super::appender::Appender;
use super::error::{LoggerError, Result};

/// Default buffer capacity in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

#[derive(Debug)]
pub struct LogBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl LogBuffer {
    /// Reserve a buffer of `capacity` bytes up front
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config("LogBuffer", "capacity must be non-zero"));
        }
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| LoggerError::BufferAllocation { capacity })?;
        Ok(Self { data, capacity })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether `len` more bytes can be buffered without reaching capacity
    #[inline]
    pub fn fits(&self, len: usize) -> bool {
        self.data.len() + len < self.capacity
    }

    /// Append a formatted line; returns `false` (buffer untouched) if it does not fit
    pub fn try_append(&mut self, line: &[u8]) -> bool {
        if !self.fits(line.len()) {
            return false;
        }
        self.data.extend_from_slice(line);
        true
    }

    /// Whether `needle` occurs in the buffered, not yet flushed, content
    pub fn contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        self.data.windows(needle.len()).any(|window| window == needle)
    }

    /// Write all buffered bytes to `appender` and reset the fill level
    ///
    /// Returns the number of bytes written. The buffer is emptied even when
    /// the write fails so a broken destination cannot wedge the logger.
    pub fn flush_to(&mut self, appender: &mut dyn Appender) -> Result<usize> {
        if self.data.is_empty() {
            return Ok(0);
        }
        let written = self.data.len();
        let result = appender.write(&self.data);
        self.data.clear();
        result.map(|()| written)
    }

    /// Drop buffered content without writing it
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
