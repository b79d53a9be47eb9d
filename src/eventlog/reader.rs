//! Reading event log files back.
//!
//! Every read opens, reads and closes the file within the call. Lines are
//! returned in file order, which for files produced by
//! [`EventWriter`](super::writer::EventWriter) is newest first. Empty lines
//! are skipped; invalid UTF-8 is replaced rather than rejected.

use super::codec::{self, Decoded};
use super::config::ReaderConfig;
use super::diagnostics::{SharedSink, TracingDiagnostics};
use super::error::EventLogError;
use super::event::Event;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const SOURCE_READ_LINES: &str = "Read Lines";
const SOURCE_READ_EVENTS: &str = "Read Events";
const SOURCE_READ_COMPANY: &str = "Read Company Events";

/// Reads and decodes event log files.
#[derive(Clone)]
pub struct EventReader {
    config: ReaderConfig,
    sink: SharedSink,
}

impl EventReader {
    /// Create a reader with the default configuration, reporting failures
    /// through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
            sink: Arc::new(TracingDiagnostics),
        }
    }

    /// Replace the configuration.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the diagnostic sink.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = sink;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read the non-empty lines of `path` without decoding them.
    ///
    /// Makes a single attempt.
    ///
    /// # Errors
    ///
    /// [`EventLogError::NotFound`] if the file does not exist,
    /// [`EventLogError::Io`] for any other I/O failure.
    pub fn read_lines<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>, EventLogError> {
        let path = path.as_ref();
        let content = self.read_once(path, SOURCE_READ_LINES)?;
        Ok(non_empty_lines(&content).map(str::to_owned).collect())
    }

    /// Read and decode every non-empty line of `path`.
    ///
    /// Each line yields exactly one event; lines that cannot be parsed yield
    /// sentinel events. Transient failures are retried according to the
    /// configured read policy.
    ///
    /// # Errors
    ///
    /// [`EventLogError::NotFound`] if the file does not exist (not retried),
    /// [`EventLogError::RetriesExhausted`] if every attempt failed.
    pub fn read_events<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Event>, EventLogError> {
        let decoded = self.read_decoded(path)?;
        Ok(decoded.into_iter().map(Decoded::into_event).collect())
    }

    /// Like [`read_events`](Self::read_events), but keeps track of which
    /// lines were substituted with a sentinel.
    ///
    /// # Errors
    ///
    /// Same as [`read_events`](Self::read_events).
    pub fn read_decoded<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Decoded>, EventLogError> {
        let path = path.as_ref();
        let content = self.read_with_retry(path)?;
        let decoded: Vec<Decoded> = non_empty_lines(&content)
            .map(codec::decode_checked)
            .collect();

        let substituted = decoded.iter().filter(|d| d.is_substituted()).count();
        debug!(
            path = %path.display(),
            events = decoded.len(),
            substituted,
            "event log read"
        );
        Ok(decoded)
    }

    /// Read the events of `path` whose company equals `company`, ignoring
    /// case.
    ///
    /// Makes a single attempt. An empty result is a valid outcome.
    ///
    /// # Errors
    ///
    /// [`EventLogError::NotFound`] if the file does not exist,
    /// [`EventLogError::Io`] for any other I/O failure.
    pub fn read_events_by_company<P: AsRef<Path>>(
        &self,
        path: P,
        company: &str,
    ) -> Result<Vec<Event>, EventLogError> {
        let path = path.as_ref();
        let content = self.read_once(path, SOURCE_READ_COMPANY)?;
        let wanted = company.to_lowercase();
        Ok(non_empty_lines(&content)
            .map(codec::decode)
            .filter(|event| event.company.to_lowercase() == wanted)
            .collect())
    }

    fn read_once(&self, path: &Path, source: &str) -> Result<String, EventLogError> {
        let result = match load(path) {
            Ok(Some(content)) => Ok(content),
            Ok(None) => Err(EventLogError::NotFound {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(EventLogError::io_at(&e, path)),
        };
        result.inspect_err(|e| self.sink.report(source, &e.to_string()))
    }

    fn read_with_retry(&self, path: &Path) -> Result<String, EventLogError> {
        let result = match self.config.read_retry.run("read event log", || load(path)) {
            Ok(Some(content)) => Ok(content),
            Ok(None) => Err(EventLogError::NotFound {
                path: path.to_path_buf(),
            }),
            Err(exhausted) => Err(EventLogError::RetriesExhausted {
                attempts: exhausted.attempts,
                message: exhausted.error.to_string(),
                path: path.to_path_buf(),
            }),
        };
        result.inspect_err(|e| self.sink.report(SOURCE_READ_EVENTS, &e.to_string()))
    }
}

impl Default for EventReader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventReader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read the whole file, mapping a missing file to `None`.
fn load(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn non_empty_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().filter(|line| !line.is_empty())
}
