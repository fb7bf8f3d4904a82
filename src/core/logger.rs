//! Main logger implementation
//!
//! A [`Logger`] is a handle owned by the application. Between `start` and
//! `stop` it owns one session: a bounded buffer, a single destination, a
//! background flush thread and (optionally) the crash handler. Only one
//! session may be active per process at a time.

use super::{
    appender::Appender,
    buffer::LogBuffer,
    config::LoggerConfig,
    error::{LoggerError, Result},
    flusher,
    log_entry::LogRecord,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    session::{Session, SessionState},
    stack_trace::{StackTrace, FATAL_TRACE_HEADER},
};
use crate::appenders::{ConsoleAppender, FileAppender};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process exit status after a FATAL record
pub const FATAL_EXIT_CODE: i32 = 2;

/// Set while any logger in the process has an active session
static LOGGING_ACTIVE: AtomicBool = AtomicBool::new(false);

pub struct Logger {
    session: RwLock<Option<Arc<Session>>>,
    /// Metrics for observability; outlive individual sessions
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a stopped logger; log calls are dropped until [`start`](Self::start)
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: RwLock::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Start a session writing to the destination `config.path` selects
    ///
    /// An empty or relative path selects standard error (with a warning). A
    /// file that cannot be opened is a hard error: the logger stays stopped.
    /// Starting an already started logger, or while another logger in the
    /// process is active, is reported on stderr and otherwise ignored.
    pub fn start(&self, config: LoggerConfig) -> Result<()> {
        self.begin(config, |config| {
            if config.has_file_destination() {
                Ok(Box::new(FileAppender::new(&config.path)?) as Box<dyn Appender>)
            } else {
                eprintln!("[LOGGER WARNING] No valid log path specified. Redirecting to stderr");
                Ok(Box::new(ConsoleAppender::new()) as Box<dyn Appender>)
            }
        })
    }

    /// Start a session with a caller-supplied destination
    ///
    /// `config.path` is ignored.
    pub fn start_with_appender(&self, config: LoggerConfig, appender: Box<dyn Appender>) -> Result<()> {
        self.begin(config, move |_| Ok(appender))
    }

    fn begin<F>(&self, config: LoggerConfig, open: F) -> Result<()>
    where
        F: FnOnce(&LoggerConfig) -> Result<Box<dyn Appender>>,
    {
        let mut slot = self.session.write();
        if slot.is_some() {
            self.usage_error("You called start() twice!");
            return Ok(());
        }
        if LOGGING_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.usage_error("Another logger is already active in this process; start() ignored");
            return Ok(());
        }

        match Self::open_session(&config, open, &self.metrics) {
            Ok(session) => {
                *slot = Some(session);
                Ok(())
            }
            Err(e) => {
                LOGGING_ACTIVE.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    fn open_session<F>(
        config: &LoggerConfig,
        open: F,
        metrics: &Arc<LoggerMetrics>,
    ) -> Result<Arc<Session>>
    where
        F: FnOnce(&LoggerConfig) -> Result<Box<dyn Appender>>,
    {
        config.validate()?;
        let buffer = LogBuffer::with_capacity(config.buffer_capacity)?;
        let appender = open(config)?;

        let session = Arc::new(Session::new(
            SessionState::new(buffer, appender),
            config.min_level,
            config.fatal_exit,
            Arc::clone(metrics),
        ));

        #[cfg(unix)]
        if config.crash_handler {
            let guard = super::crash::install(&session)?;
            *session.crash_guard.lock() = Some(guard);
        }
        #[cfg(not(unix))]
        if config.crash_handler {
            eprintln!("[LOGGER WARNING] Crash handling is not supported on this platform");
        }

        let handle = match flusher::spawn(Arc::clone(&session), config.flush_interval) {
            Ok(handle) => handle,
            Err(e) => {
                Self::teardown(&session);
                return Err(LoggerError::io_operation(
                    "starting logger",
                    "failed to spawn background flush thread",
                    e,
                ));
            }
        };
        *session.flusher.lock() = Some(handle);

        Ok(session)
    }

    /// Stop the session: wake and join the flusher, flush, release the destination
    ///
    /// Calling `stop` on a stopped logger is reported on stderr and ignored.
    pub fn stop(&self) {
        if !self.end_session() {
            self.usage_error("You should call start() before stop()!");
        }
    }

    fn end_session(&self) -> bool {
        let Some(session) = self.session.write().take() else {
            return false;
        };
        Self::teardown(&session);
        LOGGING_ACTIVE.store(false, Ordering::SeqCst);
        true
    }

    fn teardown(session: &Session) {
        session.request_shutdown();
        session.join_flusher();

        if let Err(e) = session.state.lock().close(&session.metrics) {
            session.report_failure("flushing log buffer at shutdown", &e);
        }

        #[cfg(unix)]
        drop(session.crash_guard.lock().take());
    }

    fn usage_error(&self, message: &str) {
        self.metrics.record_usage_error();
        eprintln!("[LOGGER WARNING] {}", message);
    }

    pub fn is_started(&self) -> bool {
        self.session.read().is_some()
    }

    /// Threshold of the active session
    pub fn min_level(&self) -> Option<LogLevel> {
        self.session.read().as_ref().map(|s| s.min_level)
    }

    /// Emit one record; see the crate docs for the flush-or-buffer rules
    ///
    /// Before `start` (or after `stop`) this silently does nothing, so library
    /// code may log without knowing whether the host initialised logging.
    pub fn log(
        &self,
        level: LogLevel,
        thread_id: u64,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) {
        let Some(session) = self.session.read().clone() else {
            return;
        };

        if !level.is_enabled_for(session.min_level) {
            self.metrics.record_filtered();
            return;
        }

        // Formatting happens before taking the session lock
        let formatted = LogRecord::new(level, thread_id, file, line, args).format_line();

        if level == LogLevel::Fatal {
            self.emit_fatal(&session, &formatted);
            return;
        }

        let mut state = session.state.lock();
        if state.is_closed() {
            return;
        }

        if !level.is_synchronous() && state.buffer.try_append(formatted.as_bytes()) {
            self.metrics.record_buffered();
            return;
        }

        // ERROR, or a record that would fill the buffer
        if let Err(e) = state.write_direct(formatted.as_bytes(), &self.metrics) {
            session.report_failure("writing log record", &e);
        }
        self.metrics.record_synchronous();
    }

    fn emit_fatal(&self, session: &Arc<Session>, formatted: &str) {
        let trace = session.fatal_exit.then(StackTrace::capture);

        {
            let mut state = session.state.lock();
            if state.is_closed() {
                return;
            }
            let mut result = state.write_direct(formatted.as_bytes(), &self.metrics);
            if result.is_ok() {
                if let (Some(trace), Some(appender)) = (trace.as_ref(), state.appender.as_mut()) {
                    result = appender
                        .write(trace.render(FATAL_TRACE_HEADER).as_bytes())
                        .and_then(|()| appender.flush());
                }
            }
            if let Err(e) = result {
                session.report_failure("writing fatal record", &e);
            }
            self.metrics.record_synchronous();
        }

        if session.fatal_exit {
            self.end_session();
            std::process::exit(FATAL_EXIT_CODE);
        }
    }

    /// Emit only when `condition` holds
    #[inline]
    pub fn log_if(
        &self,
        condition: bool,
        level: LogLevel,
        thread_id: u64,
        file: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) {
        if condition {
            self.log(level, thread_id, file, line, args);
        }
    }

    /// Terminates the process after writing, unless fatal exit is disabled
    #[inline]
    pub fn fatal(&self, thread_id: u64, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Fatal, thread_id, file, line, args);
    }

    #[inline]
    pub fn error(&self, thread_id: u64, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, thread_id, file, line, args);
    }

    #[inline]
    pub fn warning(&self, thread_id: u64, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, thread_id, file, line, args);
    }

    #[inline]
    pub fn info(&self, thread_id: u64, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, thread_id, file, line, args);
    }

    #[inline]
    pub fn debug(&self, thread_id: u64, file: &str, line: u32, args: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, thread_id, file, line, args);
    }

    /// Force the buffered records out to the destination now
    pub fn flush(&self) -> Result<()> {
        let Some(session) = self.session.read().clone() else {
            return Ok(());
        };
        let mut state = session.state.lock();
        state.flush_buffer(&self.metrics)
    }

    /// Whether nothing is waiting in the buffer (always true when stopped)
    pub fn is_buffer_empty(&self) -> bool {
        match self.session.read().as_ref() {
            Some(session) => session.state.lock().buffer.is_empty(),
            None => true,
        }
    }

    /// Whether `needle` is in the buffered, not yet flushed, content
    pub fn buffer_contains(&self, needle: &str) -> bool {
        match self.session.read().as_ref() {
            Some(session) => session.state.lock().buffer.contains(needle),
            None => false,
        }
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Release the destination and the process-wide slot
        self.end_session();
    }
}
