//! # Fixed-Width Rotating Event Log
//!
//! A small library for recording structured progress and audit events in
//! plain text files that stay readable with `less`, `grep` and `cut`.
//!
//! Each event is one line of fixed-width columns: a timestamp, the company
//! (or any owning component), an action verb, an action target, stage and
//! total progress percentages and a free-text detail. Because every column
//! has a fixed offset, a damaged detail column never breaks the columns in
//! front of it, and the file can be sliced with ordinary text tools.
//!
//! ## Key Features
//!
//! - **Fixed-Width Codec**: [`encode`] always produces exactly [`LINE_WIDTH`]
//!   characters, padding short values and cutting long ones with a visible
//!   `".. "` or `"..."` marker.
//!
//! - **Fail-Soft Decoding**: [`decode`] never fails. Lines that cannot be
//!   parsed become a sentinel [`Event`] with fixed placeholder text, and
//!   [`decode_checked`] tells parsed lines and placeholders apart.
//!
//! - **Rotating Writer**: [`EventWriter`] keeps only the newest `max_lines`
//!   events, newest first, and rewrites the file every `latency` appends.
//!   Progress updates can replace the newest line instead of piling up.
//!
//! - **Never Crashes the Caller**: write failures are retried with a fixed
//!   backoff and then handed to a [`DiagnosticSink`] instead of being
//!   returned. Reads return a typed [`EventLogError`].
//!
//! - **Configurable**: [`WriterConfig`] and [`ReaderConfig`] are plain
//!   `serde` structs with sensible defaults, loadable from JSON.
//!
//! ## File Format
//!
//! ```text
//! 20240131 03:04:05.67 PM Acme                                Build           Widget          50  100 compiled
//! ```
//!
//! | Column   | Width | Notes                                          |
//! |----------|-------|------------------------------------------------|
//! | Time     | 23+1  | `yyyyMMdd hh:mm:ss.ff tt`, local time          |
//! | Company  | 36    | cut with `".. "` if it would fill the column   |
//! | Verb     | 16    | cut with `".. "` if longer than 15 characters  |
//! | Target   | 16    | same as verb                                   |
//! | Stage    | 3+1   | blank when not applicable                      |
//! | Total    | 3+1   | `999` when not applicable                      |
//! | Details  | 255   | line breaks removed, cut with `"..."`          |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eventlog_rs::prelude::*;
//!
//! let mut writer = EventWriter::open("logs/deploy.log", WriterConfig::default())
//!     .with_enricher(ProcessIdEnricher::new());
//!
//! writer.append(Event::now("Acme", "Deploy", "api", "uploading", 10, 5));
//! writer.append_overwrite(Event::now("Acme", "Deploy", "api", "uploading", 60, 30));
//! writer.log("Acme", "Restart", "api", "service restarted");
//! writer.close();
//!
//! let events = EventReader::new().read_events("logs/deploy.log");
//! if let Ok(events) = events {
//!     for event in events {
//!         println!("{} {} {}", event.action_verb, event.action_target, event.details);
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: bootstrap at `info`, flushes and
//! reads at `debug`, window mutations at `trace`, every failed retry
//! attempt at `warn` and exhausted retries at `error`. Install any
//! subscriber to see them.

pub mod eventlog;

pub mod prelude;

pub use eventlog::{
    Decoded, DecodeError, DiagnosticSink, Event, EventEnricher, EventLogError, EventReader,
    EventWriter, FileDiagnostics, LINE_WIDTH, ProcessIdEnricher, ReaderConfig, RetryPolicy,
    STAGE_NOT_APPLICABLE, SharedSink, TOTAL_NOT_APPLICABLE, TracingDiagnostics, WriteOutcome,
    WriterConfig, WriterStats, decode, decode_checked, encode,
};
