//! Log record structure and line formatting

use super::log_level::{LogLevel, LEVEL_LABEL_WIDTH};
use super::timestamp;
use chrono::{DateTime, Local};
use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local cache so each thread keeps the id it was first given
thread_local! {
    static THREAD_ID_CACHE: Cell<u64> = const { Cell::new(0) };
}

/// Small numeric id for the calling thread, stable for the thread's lifetime
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        let id = cache.get();
        if id != 0 {
            return id;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        cache.set(id);
        id
    })
}

/// One record, built per call and consumed by formatting
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub thread_id: u64,
    pub file: &'a str,
    pub line: u32,
    pub message: String,
}

impl<'a> LogRecord<'a> {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one record always occupies exactly one output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        level: LogLevel,
        thread_id: u64,
        file: &'a str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) -> Self {
        let message = match args.as_str() {
            Some(s) => Self::sanitize_message(s),
            None => Self::sanitize_message(&args.to_string()),
        };
        Self {
            level,
            timestamp: Local::now(),
            thread_id,
            file,
            line,
            message,
        }
    }

    /// Render the record as a newline-terminated line
    ///
    /// `DD-MM-YYYY HH:MM:SS, <LEVEL:>7> Thread <id:>5>, <file>:<line> => <message>`
    pub fn format_line(&self) -> String {
        format!(
            "{}, {:>width$} Thread {:>5}, {}:{} => {}\n",
            timestamp::format_timestamp(&self.timestamp),
            self.level,
            self.thread_id,
            self.file,
            self.line,
            self.message,
            width = LEVEL_LABEL_WIDTH,
        )
    }
}
