//! Shared state of one started logging session
//!
//! The buffer, the destination and the termination flag live behind a single
//! mutex. Every read-modify-write of any of them, and every byte written to
//! the destination, happens while holding it, so records from concurrent
//! threads never interleave.

use super::appender::Appender;
use super::buffer::LogBuffer;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::metrics::LoggerMetrics;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::JoinHandle;

pub(crate) struct SessionState {
    pub(crate) buffer: LogBuffer,
    /// `None` once the session has been torn down
    pub(crate) appender: Option<Box<dyn Appender>>,
    /// Tells the background flusher to exit
    pub(crate) shutdown: bool,
}

impl SessionState {
    pub(crate) fn new(buffer: LogBuffer, appender: Box<dyn Appender>) -> Self {
        Self {
            buffer,
            appender: Some(appender),
            shutdown: false,
        }
    }

    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.appender.is_none()
    }

    /// Forced flush: write out everything buffered and reset the fill level
    pub(crate) fn flush_buffer(&mut self, metrics: &LoggerMetrics) -> Result<()> {
        let Some(appender) = self.appender.as_mut() else {
            self.buffer.clear();
            return Ok(());
        };
        let written = self.buffer.flush_to(&mut **appender)?;
        if written > 0 {
            metrics.record_flush();
            appender.flush()?;
        }
        Ok(())
    }

    /// Synchronous write: flush the buffer, then write `bytes` past it
    pub(crate) fn write_direct(&mut self, bytes: &[u8], metrics: &LoggerMetrics) -> Result<()> {
        self.flush_buffer(metrics)?;
        if let Some(appender) = self.appender.as_mut() {
            appender.write(bytes)?;
            appender.flush()?;
        }
        Ok(())
    }

    /// Final flush, then release the destination and the buffered bytes
    ///
    /// Dropping a file appender closes the file; standard error stays open.
    pub(crate) fn close(&mut self, metrics: &LoggerMetrics) -> Result<()> {
        let result = self.flush_buffer(metrics);
        self.shutdown = true;
        self.buffer.clear();
        self.appender = None;
        result
    }
}

pub(crate) struct Session {
    pub(crate) state: Mutex<SessionState>,
    /// Wakes the background flusher early at shutdown
    pub(crate) wake: Condvar,
    pub(crate) min_level: LogLevel,
    pub(crate) fatal_exit: bool,
    pub(crate) metrics: Arc<LoggerMetrics>,
    pub(crate) flusher: Mutex<Option<JoinHandle<()>>>,
    #[cfg(unix)]
    pub(crate) crash_guard: Mutex<Option<super::crash::CrashGuard>>,
}

impl Session {
    pub(crate) fn new(
        state: SessionState,
        min_level: LogLevel,
        fatal_exit: bool,
        metrics: Arc<LoggerMetrics>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            wake: Condvar::new(),
            min_level,
            fatal_exit,
            metrics,
            flusher: Mutex::new(None),
            #[cfg(unix)]
            crash_guard: Mutex::new(None),
        }
    }

    /// Ask the background flusher to exit and wake it immediately
    pub(crate) fn request_shutdown(&self) {
        let mut state = self.state.lock();
        state.shutdown = true;
        self.wake.notify_all();
    }

    /// Wait for the background flusher to exit
    pub(crate) fn join_flusher(&self) {
        let handle = self.flusher.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Background flush thread panicked: {:?}", e);
            }
        }
    }

    pub(crate) fn report_failure(&self, operation: &str, err: &LoggerError) {
        self.metrics.record_write_failure();
        eprintln!("[LOGGER ERROR] Failed while {}: {}", operation, err);
    }
}
