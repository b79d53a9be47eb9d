//! Bounded, fixed-backoff retry for blocking file operations.

use serde::{Deserialize, Serialize};
use std::io;
use std::thread;
use std::time::Duration;
use tracing::{error, warn};

/// Default pause between attempts, in milliseconds.
pub const DEFAULT_BACKOFF_MS: u64 = 100;

/// How often, and how patiently, a failed operation is retried.
///
/// Every failure is treated the same way: there is no distinction between
/// transient errors (a file briefly locked by another process) and permanent
/// ones (a missing directory). The operation is simply attempted
/// `max_attempts` times with a fixed sleep in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Zero is treated
    /// as one.
    pub max_attempts: u32,

    /// Pause between consecutive attempts, in milliseconds.
    pub backoff_ms: u64,
}

impl RetryPolicy {
    /// Create a policy with the given attempt count and backoff.
    #[must_use]
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff_ms: saturating_millis(backoff),
        }
    }

    /// A policy that makes exactly one attempt.
    #[must_use]
    pub const fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: 0,
        }
    }

    /// Set the number of attempts.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the pause between attempts.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff_ms = saturating_millis(backoff);
        self
    }

    /// The pause between attempts.
    #[inline]
    #[must_use]
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// The effective number of attempts (never zero).
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Run `op` until it succeeds or the attempts are used up.
    ///
    /// `what` names the operation in log output. On exhaustion the error
    /// of the last attempt is returned together with the attempt count.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, Exhausted>
    where
        F: FnMut() -> io::Result<T>,
    {
        let max_attempts = self.attempts();
        let mut last_error = None;

        for attempt in 0..max_attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max = max_attempts,
                        operation = what,
                        error = %e,
                        "event log operation failed, retrying"
                    );
                    last_error = Some(e);
                }
            }

            if attempt + 1 < max_attempts && self.backoff_ms > 0 {
                thread::sleep(self.backoff());
            }
        }

        error!(operation = what, attempts = max_attempts, "event log operation failed after all retries");
        Err(Exhausted {
            attempts: max_attempts,
            error: last_error.unwrap_or_else(|| io::Error::other("no attempt was made")),
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
const fn saturating_millis(duration: Duration) -> u64 {
    let millis = duration.as_millis();
    if millis > u64::MAX as u128 {
        u64::MAX
    } else {
        millis as u64
    }
}

/// The outcome of a [`RetryPolicy::run`] whose attempts all failed.
#[derive(Debug)]
pub struct Exhausted {
    /// Number of attempts made.
    pub attempts: u32,
    /// The error returned by the last attempt.
    pub error: io::Error,
}
