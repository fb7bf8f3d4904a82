//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The log file could not be opened for appending
    #[error("Unable to create log file '{path}': {source}")]
    DestinationOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The record buffer could not be reserved
    #[error("Unable to create log buffer of {capacity} bytes")]
    BufferAllocation { capacity: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Installing or restoring a signal disposition failed
    #[error("Failed to install handler for signal {signal}: {source}")]
    SignalHandler {
        signal: i32,
        #[source]
        source: std::io::Error,
    },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn destination_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::DestinationOpen {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}
