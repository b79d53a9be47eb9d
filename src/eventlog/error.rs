//! Error types for the event log.
//!
//! [`EventLogError`] covers the failure modes of reading, writing and
//! configuring an event log file. [`DecodeError`] describes why a single
//! line could not be parsed; it never escapes [`decode`](super::codec::decode)
//! on its own and is only observable through [`Decoded`](super::codec::Decoded).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing an event log file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventLogError {
    /// The log file does not exist.
    #[error("event log not found: {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// An I/O error occurred while reading or writing the log file.
    #[error("{}", io_message(message, path.as_ref()))]
    Io {
        /// The underlying I/O error message.
        message: String,
        /// The file path involved, if known.
        path: Option<PathBuf>,
    },

    /// Every attempt of a retried operation failed.
    #[error(
        "event log operation on {} failed after {attempts} attempts: {message}",
        path.display()
    )]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error message of the last attempt.
        message: String,
        /// The file path involved.
        path: PathBuf,
    },

    /// A configuration could not be loaded.
    #[error("invalid event log configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

fn io_message(message: &str, path: Option<&PathBuf>) -> String {
    match path {
        Some(p) => format!("event log I/O error at {}: {message}", p.display()),
        None => format!("event log I/O error: {message}"),
    }
}

impl EventLogError {
    /// Build an [`EventLogError::Io`] tagged with the path it occurred on.
    #[cold]
    pub(crate) fn io_at(err: &std::io::Error, path: impl Into<PathBuf>) -> Self {
        EventLogError::Io {
            message: err.to_string(),
            path: Some(path.into()),
        }
    }
}

impl From<std::io::Error> for EventLogError {
    #[cold]
    fn from(err: std::io::Error) -> Self {
        EventLogError::Io {
            message: err.to_string(),
            path: None,
        }
    }
}

/// Reasons a fixed-width line could not be decoded into an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The line ends before the last fixed column.
    #[error("line too short: {len} characters, expected at least {expected}")]
    TooShort {
        /// Length of the line in characters.
        len: usize,
        /// Minimum number of characters required.
        expected: usize,
    },

    /// The time column is not a recognisable timestamp.
    #[error("invalid timestamp {value:?}")]
    InvalidTimestamp {
        /// The trimmed time column.
        value: String,
    },

    /// A progress column is neither blank nor an integer.
    #[error("invalid {field} progress {value:?}")]
    InvalidProgress {
        /// Which progress column failed (`"stage"` or `"total"`).
        field: &'static str,
        /// The trimmed column text.
        value: String,
    },
}
