//! Console appender implementation
//!
//! Writes to standard error, the fallback destination when no usable log
//! path is configured.

use crate::core::{Appender, Result};
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        // One locked write keeps concurrent records from interleaving with
        // other stderr users inside this process
        let mut stderr = io::stderr().lock();
        stderr.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn is_stderr(&self) -> bool {
        true
    }
}
