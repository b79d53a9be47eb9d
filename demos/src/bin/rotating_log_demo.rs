// demos/src/bin/rotating_log_demo.rs
//
// This example writes a small rotating event log and reads it back.
//
// Functions demonstrated:
// - `EventWriter::open()` with a bounded window and batched flushes
// - `append()` / `append_overwrite()` for progress updates
// - `EventReader::read_events()` and `read_events_by_company()`
//
// Run this example with:
//   LOGLEVEL=debug cargo run --bin rotating_log_demo
//   (from the demos directory)

use demos::setup_logger;
use eventlog_rs::prelude::*;
use std::env;
use tracing::{info, warn};

fn main() {
    setup_logger();
    info!("Rotating Event Log Example");

    let path = env::temp_dir().join("eventlog-demo").join("deploy.log");
    let config = WriterConfig::default().with_max_lines(5).with_latency(2);

    let mut writer = EventWriter::open(&path, config).with_enricher(ProcessIdEnricher::new());
    if !writer.is_available() {
        warn!(path = %path.display(), "event log unavailable, giving up");
        return;
    }

    writer.log("Acme", "Deploy", "api", "deployment started");
    for percent in [0, 25, 50, 75, 100] {
        let outcome = writer.append_overwrite(Event::now(
            "Acme",
            "Upload",
            "api",
            format!("{percent}% uploaded"),
            percent,
            percent / 2,
        ));
        info!(percent, ?outcome, "progress recorded");
    }
    for service in ["api", "worker", "scheduler"] {
        writer.append(Event::message("Globex", "Restart", service, "restarted"));
    }

    let stats = writer.stats();
    info!(
        appends = stats.appends,
        overwrites = stats.overwrites,
        evictions = stats.evictions,
        flushes = stats.flushes,
        "writer statistics"
    );
    let outcome = writer.close();
    info!(?outcome, path = %path.display(), "event log closed");

    let reader = EventReader::new();
    match reader.read_lines(&path) {
        Ok(lines) => {
            println!("\nRaw file ({} lines, newest first):", lines.len());
            for line in lines {
                println!("  {}", line.trim_end());
            }
        }
        Err(e) => warn!(error = %e, "could not read lines"),
    }

    match reader.read_events_by_company(&path, "acme") {
        Ok(events) => {
            println!("\nAcme events:");
            for event in events {
                let stage = event
                    .stage_percent()
                    .map_or_else(|| "-".to_string(), |p| format!("{p}%"));
                println!(
                    "  {:<10} {:<10} {:>5}  {}",
                    event.action_verb, event.action_target, stage, event.details
                );
            }
        }
        Err(e) => warn!(error = %e, "could not read events"),
    }
}
