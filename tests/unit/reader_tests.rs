//! Integration tests for the reader.

use eventlog_rs::eventlog::codec::UNPARSED_VERB;
use eventlog_rs::prelude::*;
use std::fs;
use std::sync::{Arc, Mutex};

#[test]
fn reads_what_the_writer_wrote() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let mut writer = EventWriter::open_default(&path);
    writer.append(Event::now("Acme", "Build", "Widget", "ok", 50, 100));
    writer.append(Event::now("Globex", "Ship", "Crate", "sent", 100, 100));
    assert_eq!(writer.close(), WriteOutcome::Flushed);

    let reader = EventReader::new();
    let events = reader.read_events(&path).unwrap_or_default();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].company, "Globex");
    assert_eq!(events[1].stage_progress, 50);

    let acme = reader.read_events_by_company(&path, "ACME").unwrap_or_default();
    assert_eq!(acme.len(), 1);
    assert_eq!(acme[0].action_target, "Widget");
}

#[test]
fn corrupted_lines_yield_one_sentinel_each() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let good = encode(&Event::message("Acme", "Build", "Widget", "ok"));
    let content = format!("{good}\nbroken\n\n{}\n", &good[..40]);
    assert!(fs::write(&path, content).is_ok());

    let decoded = EventReader::new().read_decoded(&path).unwrap_or_default();
    assert_eq!(decoded.len(), 3);
    assert!(!decoded[0].is_substituted());
    assert!(decoded[1].is_substituted());
    assert!(decoded[2].is_substituted());
    assert_eq!(decoded[2].event().action_verb, UNPARSED_VERB);
}

#[test]
fn failures_go_to_the_sink() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));

    let sources = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&sources);
    let sink: SharedSink = Arc::new(move |source: &str, _message: &str| {
        if let Ok(mut guard) = captured.lock() {
            guard.push(source.to_string());
        }
    });
    let reader = EventReader::new()
        .with_config(ReaderConfig::default().with_read_retry(RetryPolicy::once()))
        .with_sink(sink);

    let missing = dir.path().join("missing.log");
    assert!(matches!(
        reader.read_events(&missing),
        Err(EventLogError::NotFound { .. })
    ));
    assert!(matches!(
        reader.read_lines(dir.path()),
        Err(EventLogError::Io { .. })
    ));

    let sources = sources.lock().unwrap_or_else(|e| e.into_inner());
    assert_eq!(sources.as_slice(), ["Read Events", "Read Lines"]);
}

#[test]
fn file_diagnostics_record_writer_failures() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let blocker = dir.path().join("blocker");
    assert!(fs::write(&blocker, "file").is_ok());

    let diagnostics = FileDiagnostics::new(dir.path().join("errors.txt"));
    let config = WriterConfig::default().with_bootstrap_retry(RetryPolicy::once());
    let mut writer =
        EventWriter::open_with_sink(blocker.join("events.log"), config, Arc::new(diagnostics.clone()));
    assert_eq!(writer.log("Acme", "Build", "Widget", "lost"), WriteOutcome::Unavailable);

    let content = fs::read_to_string(diagnostics.path()).unwrap_or_default();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(": Create Event Log    : "));
    assert!(lines[1].contains(": Write Event         : "));
}
