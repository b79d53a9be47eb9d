//! Writer and reader configuration.
//!
//! Both configurations are plain data with documented defaults. They can be
//! built in code with the `with_*` builders or loaded from JSON, where any
//! missing field keeps its default:
//!
//! ```rust
//! use eventlog_rs::eventlog::WriterConfig;
//!
//! let config = WriterConfig::from_json_str(r#"{ "max_lines": 500, "latency": 5 }"#)
//!     .expect("valid config");
//! assert_eq!(config.max_lines, 500);
//! assert_eq!(config.latency, 5);
//! assert_eq!(config.write_retry.max_attempts, 10);
//! ```

use super::error::EventLogError;
use super::retry::{DEFAULT_BACKOFF_MS, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Default number of lines kept in a log file.
pub const DEFAULT_MAX_LINES: usize = 200;

/// Default number of appends between automatic flushes.
pub const DEFAULT_LATENCY: u32 = 1;

/// Default number of attempts for writing or bootstrapping a log file.
pub const DEFAULT_WRITE_ATTEMPTS: u32 = 10;

/// Default number of attempts for reading a log file.
pub const DEFAULT_READ_ATTEMPTS: u32 = 2;

/// Configuration of an [`EventWriter`](super::writer::EventWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Maximum number of lines kept in the file. Zero selects
    /// [`DEFAULT_MAX_LINES`].
    pub max_lines: usize,

    /// Number of appends between automatic flushes. Zero selects
    /// [`DEFAULT_LATENCY`]. Up to `latency` events can be lost on a crash.
    pub latency: u32,

    /// Retry policy for rewriting the file.
    pub write_retry: RetryPolicy,

    /// Retry policy for creating or loading the file at construction.
    pub bootstrap_retry: RetryPolicy,
}

impl WriterConfig {
    /// Set the maximum number of lines.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the flush latency.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_latency(mut self, latency: u32) -> Self {
        self.latency = latency;
        self
    }

    /// Set the retry policy for file rewrites.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_write_retry(mut self, policy: RetryPolicy) -> Self {
        self.write_retry = policy;
        self
    }

    /// Set the retry policy for construction.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_bootstrap_retry(mut self, policy: RetryPolicy) -> Self {
        self.bootstrap_retry = policy;
        self
    }

    /// Return a copy with zero `max_lines` and `latency` replaced by their
    /// defaults.
    #[must_use]
    pub fn validated(self) -> Self {
        Self {
            max_lines: if self.max_lines == 0 {
                DEFAULT_MAX_LINES
            } else {
                self.max_lines
            },
            latency: if self.latency == 0 {
                DEFAULT_LATENCY
            } else {
                self.latency
            },
            ..self
        }
    }

    /// Load a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::InvalidConfig`] if the text is not a valid
    /// configuration object.
    pub fn from_json_str(json: &str) -> Result<Self, EventLogError> {
        serde_json::from_str(json).map_err(|e| EventLogError::InvalidConfig {
            message: e.to_string(),
        })
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        let retry = RetryPolicy {
            max_attempts: DEFAULT_WRITE_ATTEMPTS,
            backoff_ms: DEFAULT_BACKOFF_MS,
        };
        Self {
            max_lines: DEFAULT_MAX_LINES,
            latency: DEFAULT_LATENCY,
            write_retry: retry,
            bootstrap_retry: retry,
        }
    }
}

/// Configuration of an [`EventReader`](super::reader::EventReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Retry policy for [`read_events`](super::reader::EventReader::read_events).
    pub read_retry: RetryPolicy,
}

impl ReaderConfig {
    /// Set the read retry policy.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_read_retry(mut self, policy: RetryPolicy) -> Self {
        self.read_retry = policy;
        self
    }

    /// Load a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::InvalidConfig`] if the text is not a valid
    /// configuration object.
    pub fn from_json_str(json: &str) -> Result<Self, EventLogError> {
        serde_json::from_str(json).map_err(|e| EventLogError::InvalidConfig {
            message: e.to_string(),
        })
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            read_retry: RetryPolicy {
                max_attempts: DEFAULT_READ_ATTEMPTS,
                backoff_ms: DEFAULT_BACKOFF_MS,
            },
        }
    }
}
