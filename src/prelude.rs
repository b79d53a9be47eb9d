/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use eventlog_rs::prelude::*;
//! ```

// Records and codec
pub use crate::eventlog::codec::{Decoded, decode, decode_checked, encode};
pub use crate::eventlog::event::{Event, STAGE_NOT_APPLICABLE, TOTAL_NOT_APPLICABLE};

// Reading and writing
pub use crate::eventlog::reader::EventReader;
pub use crate::eventlog::writer::{EventWriter, WriteOutcome, WriterStats};

// Configuration
pub use crate::eventlog::config::{ReaderConfig, WriterConfig};
pub use crate::eventlog::retry::RetryPolicy;

// Collaborators
pub use crate::eventlog::diagnostics::{
    DiagnosticSink, FileDiagnostics, SharedSink, TracingDiagnostics,
};
pub use crate::eventlog::enrich::{EventEnricher, ProcessIdEnricher};

// Errors
pub use crate::eventlog::{DecodeError, EventLogError};
