// demos/src/bin/decode_report.rs
//
// This example decodes an event log file and reports lines that could not
// be parsed, ordering the parsed ones chronologically.
//
// Functions demonstrated:
// - `EventReader::read_decoded()` to tell parsed lines from sentinels
// - `Event::chronological_cmp()`
// - `FileDiagnostics` as a side channel for read failures
//
// Run this example with:
//   cargo run --bin decode_report -- /path/to/events.log
//   (from the demos directory)

use demos::setup_logger;
use eventlog_rs::prelude::*;
use std::cmp::Ordering;
use std::env;
use std::sync::Arc;
use tracing::{error, info};

fn main() {
    setup_logger();

    let Some(path) = env::args().nth(1) else {
        error!("usage: decode_report <event log path>");
        return;
    };

    let diagnostics = FileDiagnostics::new(env::temp_dir().join("eventlog-demo-errors.txt"));
    info!(errors = %diagnostics.path().display(), "diagnostics file");
    let reader = EventReader::new().with_sink(Arc::new(diagnostics));

    let decoded = match reader.read_decoded(&path) {
        Ok(decoded) => decoded,
        Err(e) => {
            error!(error = %e, "could not read event log");
            return;
        }
    };

    let (parsed, substituted): (Vec<_>, Vec<_>) =
        decoded.into_iter().partition(|d| !d.is_substituted());

    for (index, entry) in substituted.iter().enumerate() {
        if let Some(reason) = entry.error() {
            println!("unparsed entry {index}: {reason}");
        }
    }

    let mut events: Vec<Event> = parsed.into_iter().map(Decoded::into_event).collect();
    // `sort_by` needs a total order; insertion sort tolerates the tie rule.
    for i in 1..events.len() {
        let mut j = i;
        while j > 0 && events[j].chronological_cmp(&events[j - 1]) == Ordering::Less {
            events.swap(j, j - 1);
            j -= 1;
        }
    }

    println!("{} parsed, {} unparsed", events.len(), substituted.len());
    for event in &events {
        let time = event
            .time
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!(
            "{time}  {:<20} {:<12} {:<12} {}",
            event.company, event.action_verb, event.action_target, event.details
        );
    }
}
