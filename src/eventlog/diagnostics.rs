//! Side channel for failures the event log swallows.
//!
//! Reading and writing an event log never propagates I/O failures to the
//! code doing the logging. Instead, every swallowed failure is handed to a
//! [`DiagnosticSink`] as a `(source, message)` pair. Any
//! `Fn(&str, &str) + Send + Sync` closure is a sink, which keeps test
//! doubles short.

use super::timestamp;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

/// Receiver of diagnostics for failures that were not propagated.
pub trait DiagnosticSink: Send + Sync {
    /// Record a failure. `source` names the operation that failed.
    ///
    /// Implementations must not panic.
    fn report(&self, source: &str, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn report(&self, source: &str, message: &str) {
        self(source, message);
    }
}

/// Shared handle to a diagnostic sink.
pub type SharedSink = Arc<dyn DiagnosticSink>;

/// Forwards diagnostics to `tracing` at error level. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, source: &str, message: &str) {
        error!(source, message, "event log failure");
    }
}

/// Appends diagnostics to a plain text file.
///
/// Each diagnostic becomes one line:
///
/// ```text
/// 20240131 03:04:05 PM: Write Event         : <message>
/// ```
///
/// Line breaks inside the message are replaced with spaces. Failures to
/// write the diagnostic file itself are ignored.
#[derive(Debug, Clone)]
pub struct FileDiagnostics {
    path: PathBuf,
}

/// Width the source name is padded to in [`FileDiagnostics`] output.
const SOURCE_WIDTH: usize = 20;

impl FileDiagnostics {
    /// Create a sink appending to `path`. The file is created on first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The diagnostic file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(source: &str, message: &str) -> String {
        let stamp = timestamp::now().format("%Y%m%d %I:%M:%S %p");
        let message = message.replace("\r\n", " ").replace(['\r', '\n'], " ");
        format!("{stamp}: {source:<width$}: {message}", width = SOURCE_WIDTH)
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl DiagnosticSink for FileDiagnostics {
    fn report(&self, source: &str, message: &str) {
        let _ = self.append(&Self::format_line(source, message));
    }
}
