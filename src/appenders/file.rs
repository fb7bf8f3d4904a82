//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

/// Appends to a log file, flushing at every newline
pub struct FileAppender {
    writer: LineWriter<File>,
    path: PathBuf,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::destination_open(path.display().to_string(), e))?;

        Ok(Self {
            writer: LineWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|e| {
            LoggerError::io_operation("writing log file", self.path.display().to_string(), e)
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure a trailing partial line reaches the file before it closes
        let _ = self.flush();
    }
}
