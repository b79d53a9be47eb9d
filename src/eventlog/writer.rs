//! Rotating, latency-batched event log writer.
//!
//! [`EventWriter`] keeps the newest `max_lines` encoded events of one file
//! in memory, newest first, and rewrites the whole file every `latency`
//! appends. The file therefore behaves as a capped ring of the most recent
//! events without ever needing random access.
//!
//! # Failure policy
//!
//! The writer never returns an error and never panics over I/O. Every
//! rewrite runs under a bounded [`RetryPolicy`](super::retry::RetryPolicy);
//! when it is exhausted the failure goes to the configured
//! [`DiagnosticSink`](super::diagnostics::DiagnosticSink) and the in-memory
//! window remains the only copy of the unflushed events until the next
//! successful flush.
//!
//! If the file cannot be created or loaded at construction the writer is
//! left *unavailable*: every later [`append`](EventWriter::append) or
//! [`flush`](EventWriter::flush) is a reported no-op returning
//! [`WriteOutcome::Unavailable`].
//!
//! # Example
//!
//! ```rust,no_run
//! use eventlog_rs::eventlog::{Event, EventWriter, WriterConfig};
//!
//! let mut writer = EventWriter::open(
//!     "/var/log/acme/progress.log",
//!     WriterConfig::default().with_max_lines(500).with_latency(10),
//! );
//! writer.append(Event::now("Acme", "Build", "Widget", "compiling", 40, 10));
//! writer.close();
//! ```

use super::codec;
use super::config::WriterConfig;
use super::diagnostics::{SharedSink, TracingDiagnostics};
use super::enrich::EventEnricher;
use super::error::EventLogError;
use super::event::Event;
use super::window::Window;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

const SOURCE_CREATE: &str = "Create Event Log";
const SOURCE_WRITE: &str = "Write Event";
const SOURCE_FLUSH: &str = "Flush";
const SOURCE_CLOSE: &str = "Close";

/// What happened to an append or flush request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The event is held in memory; the flush cadence was not reached.
    Buffered,

    /// The window was written to disk.
    Flushed,

    /// The window could not be written after all retries. The in-memory
    /// state is intact and will be written by the next successful flush.
    FlushFailed,

    /// The writer could not be initialized; nothing was done.
    Unavailable,
}

/// Counters describing the lifetime activity of an [`EventWriter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Events accepted by [`EventWriter::append_with`].
    pub appends: u64,
    /// Appends that replaced the newest line instead of inserting.
    pub overwrites: u64,
    /// Lines dropped because the window was full.
    pub evictions: u64,
    /// Successful file rewrites.
    pub flushes: u64,
    /// Rewrites that failed after all retries.
    pub failed_flushes: u64,
}

/// A bounded, most-recent-first event log file writer.
///
/// A writer owns its file for its whole lifetime; concurrent writers to
/// the same path are not coordinated. All operations block the calling
/// thread, including the sleeps between retries.
///
/// Dropping a writer with unflushed appends makes one last flush attempt,
/// which blocks for up to `write_retry` attempts times its backoff (about
/// one second with the defaults) when the file cannot be written. Call
/// [`close`](Self::close) explicitly on latency-sensitive paths.
pub struct EventWriter {
    path: PathBuf,
    config: WriterConfig,
    /// `None` when construction failed.
    window: Option<Window>,
    /// Appends since the last successful flush.
    write_counter: u64,
    stats: WriterStats,
    enricher: Option<Box<dyn EventEnricher>>,
    sink: SharedSink,
    closed: bool,
}

impl EventWriter {
    /// Open a writer with the default configuration.
    #[must_use]
    pub fn open_default<P: Into<PathBuf>>(path: P) -> Self {
        Self::open(path, WriterConfig::default())
    }

    /// Open a writer, reporting failures through `tracing`.
    ///
    /// Creates missing parent directories and an empty file, or loads the
    /// newest `max_lines` lines of an existing file.
    #[must_use]
    pub fn open<P: Into<PathBuf>>(path: P, config: WriterConfig) -> Self {
        Self::open_with_sink(path, config, Arc::new(TracingDiagnostics))
    }

    /// Open a writer, reporting failures to `sink`.
    #[must_use]
    pub fn open_with_sink<P: Into<PathBuf>>(path: P, config: WriterConfig, sink: SharedSink) -> Self {
        let path = path.into();
        let config = config.validated();

        let window = match bootstrap(&path, &config) {
            Ok(window) => Some(window),
            Err(e) => {
                sink.report(SOURCE_CREATE, &e.to_string());
                None
            }
        };

        Self {
            path,
            config,
            window,
            write_counter: 0,
            stats: WriterStats::default(),
            enricher: None,
            sink,
            closed: false,
        }
    }

    /// Install an enricher applied to every event before encoding.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_enricher<E: EventEnricher + 'static>(mut self, enricher: E) -> Self {
        self.enricher = Some(Box::new(enricher));
        self
    }

    /// Insert `event` as the newest line.
    pub fn append(&mut self, event: Event) -> WriteOutcome {
        self.append_with(event, false)
    }

    /// Replace the newest line with `event` if both share the same action
    /// verb (ignoring case), otherwise insert it.
    ///
    /// Useful for progress updates that should not flood the log.
    pub fn append_overwrite(&mut self, event: Event) -> WriteOutcome {
        self.append_with(event, true)
    }

    /// Log an event stamped with the current time and no progress.
    pub fn log(
        &mut self,
        company: &str,
        action_verb: &str,
        action_target: &str,
        details: &str,
    ) -> WriteOutcome {
        self.append(Event::message(company, action_verb, action_target, details))
    }

    /// Apply `event` to the window and flush if the latency cadence is
    /// reached.
    pub fn append_with(&mut self, event: Event, overwrite: bool) -> WriteOutcome {
        let Some(window) = self.window.as_mut() else {
            self.report_unavailable(SOURCE_WRITE);
            return WriteOutcome::Unavailable;
        };

        let event = match &self.enricher {
            Some(enricher) => enricher.enrich(event),
            None => event,
        };
        let line = codec::encode(&event);
        self.write_counter = self.write_counter.wrapping_add(1);
        self.stats.appends = self.stats.appends.saturating_add(1);

        let replace = overwrite
            && window
                .front()
                .is_some_and(|front| verbs_match(front, &event.action_verb));

        if replace {
            window.replace_front(line);
            self.stats.overwrites = self.stats.overwrites.saturating_add(1);
        } else if window.push_front(line).is_some() {
            self.stats.evictions = self.stats.evictions.saturating_add(1);
        }
        trace!(
            path = %self.path.display(),
            lines = window.len(),
            replaced = replace,
            pending = self.write_counter,
            "event appended"
        );

        if self.write_counter % u64::from(self.config.latency) == 0 {
            self.persist(SOURCE_WRITE)
        } else {
            WriteOutcome::Buffered
        }
    }

    /// Rewrite the file with the current window, regardless of latency.
    pub fn flush(&mut self) -> WriteOutcome {
        self.persist(SOURCE_FLUSH)
    }

    /// Flush and release the writer.
    pub fn close(mut self) -> WriteOutcome {
        self.closed = true;
        self.persist(SOURCE_CLOSE)
    }

    /// The log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The effective configuration, with defaults substituted.
    #[must_use]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Returns `false` if the file could not be created or loaded.
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.window.is_some()
    }

    /// Number of lines in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.as_ref().map_or(0, Window::len)
    }

    /// Returns `true` if the window holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encoded lines in the window, newest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.window.iter().flat_map(Window::iter)
    }

    /// Appends since the last successful flush.
    #[inline]
    #[must_use]
    pub fn pending_writes(&self) -> u64 {
        self.write_counter
    }

    /// Lifetime counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    fn persist(&mut self, source: &str) -> WriteOutcome {
        let Some(window) = self.window.as_ref() else {
            self.report_unavailable(source);
            return WriteOutcome::Unavailable;
        };

        let path = self.path.as_path();
        match self
            .config
            .write_retry
            .run("rewrite event log", || write_window(path, window))
        {
            Ok(()) => {
                debug!(path = %path.display(), lines = window.len(), "event log flushed");
                self.write_counter = 0;
                self.stats.flushes = self.stats.flushes.saturating_add(1);
                WriteOutcome::Flushed
            }
            Err(exhausted) => {
                let err = EventLogError::RetriesExhausted {
                    attempts: exhausted.attempts,
                    message: exhausted.error.to_string(),
                    path: self.path.clone(),
                };
                self.sink.report(source, &err.to_string());
                self.stats.failed_flushes = self.stats.failed_flushes.saturating_add(1);
                WriteOutcome::FlushFailed
            }
        }
    }

    fn report_unavailable(&self, source: &str) {
        self.sink.report(
            source,
            &format!("event log {} is unavailable", self.path.display()),
        );
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if !self.closed && self.window.is_some() && self.write_counter > 0 {
            let _ = self.persist(SOURCE_CLOSE);
        }
    }
}

impl std::fmt::Debug for EventWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventWriter")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("lines", &self.len())
            .field("available", &self.is_available())
            .field("pending_writes", &self.write_counter)
            .field("stats", &self.stats)
            .finish()
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Create the file (and its directory) or load its lines, with retries.
fn bootstrap(path: &Path, config: &WriterConfig) -> Result<Window, EventLogError> {
    config
        .bootstrap_retry
        .run("open event log", || load_or_create(path, config.max_lines))
        .map_err(|exhausted| EventLogError::RetriesExhausted {
            attempts: exhausted.attempts,
            message: exhausted.error.to_string(),
            path: path.to_path_buf(),
        })
}

fn load_or_create(path: &Path, capacity: usize) -> io::Result<Window> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    match fs::read(path) {
        Ok(bytes) => {
            let window = Window::from_lines(capacity, String::from_utf8_lossy(&bytes).lines());
            debug!(path = %path.display(), lines = window.len(), "event log loaded");
            Ok(window)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            File::create(path)?;
            info!(path = %path.display(), "event log created");
            Ok(Window::new(capacity))
        }
        Err(e) => Err(e),
    }
}

/// Rewrite the whole file, newest line first.
fn write_window(path: &Path, window: &Window) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for line in window.iter() {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Compare the verb of an encoded line with the verb of a new event, as
/// both read back from the verb column.
fn verbs_match(encoded: &str, action_verb: &str) -> bool {
    let current = codec::decode(encoded).action_verb;
    current.to_lowercase() == codec::column_verb(action_verb).to_lowercase()
}
