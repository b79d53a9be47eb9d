//! Fixed-width event log: record codec, rotating writer and reader.
//!
//! # Modules
//!
//! - [`event`]: the [`Event`] record and its chronological comparison.
//! - [`codec`]: fixed-width line encoding and fail-soft decoding.
//! - [`writer`]: [`EventWriter`], a bounded, newest-first, latency-batched
//!   log file writer.
//! - [`reader`]: [`EventReader`], line and event readers with retry.
//! - [`config`]: serde-loadable [`WriterConfig`] and [`ReaderConfig`].
//! - [`diagnostics`]: the [`DiagnosticSink`] side channel for swallowed
//!   failures.
//! - [`window`]: the bounded [`Window`] of encoded lines.
//! - [`enrich`]: [`EventEnricher`] decorators such as
//!   [`ProcessIdEnricher`].

pub mod codec;
pub mod config;
pub mod diagnostics;
pub mod enrich;
mod error;
pub mod event;
pub mod reader;
pub mod retry;
pub mod timestamp;
pub mod window;
pub mod writer;

pub use codec::{Decoded, LINE_WIDTH, decode, decode_checked, encode};
pub use config::{ReaderConfig, WriterConfig};
pub use diagnostics::{DiagnosticSink, FileDiagnostics, SharedSink, TracingDiagnostics};
pub use enrich::{EventEnricher, ProcessIdEnricher};
pub use error::{DecodeError, EventLogError};
pub use event::{Event, STAGE_NOT_APPLICABLE, TOTAL_NOT_APPLICABLE};
pub use reader::EventReader;
pub use retry::RetryPolicy;
pub use window::Window;
pub use writer::{EventWriter, WriteOutcome, WriterStats};
