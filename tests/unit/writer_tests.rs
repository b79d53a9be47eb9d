//! Integration tests for the rotating writer.

use eventlog_rs::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn config(max_lines: usize, latency: u32) -> WriterConfig {
    let retry = RetryPolicy::new(2, Duration::from_millis(1));
    WriterConfig::default()
        .with_max_lines(max_lines)
        .with_latency(latency)
        .with_write_retry(retry)
        .with_bootstrap_retry(retry)
}

fn event(verb: &str, details: &str) -> Event {
    Event::message("Acme", verb, "Widget", details)
}

fn details_on_disk(path: &Path) -> Vec<String> {
    EventReader::new()
        .read_events(path)
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.details)
        .collect()
}

fn modified(path: &Path) -> Option<std::time::SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

// ---------------------------------------------------------------------------
// Window bounds
// ---------------------------------------------------------------------------

#[test]
fn two_line_window_keeps_newest_first() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("fresh").join("events.log");

    let mut writer = EventWriter::open(&path, config(2, 1));
    for details in ["A", "B", "C"] {
        assert_eq!(writer.append(event("Build", details)), WriteOutcome::Flushed);
    }

    assert_eq!(details_on_disk(&path), ["C", "B"]);
    assert_eq!(writer.stats().evictions, 1);
}

#[test]
fn window_never_exceeds_max_lines() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");
    let max_lines = 10;

    let mut writer = EventWriter::open(&path, config(max_lines, 1));
    for i in 0..max_lines + 5 {
        writer.append(event("Build", &format!("event {i}")));
    }

    let on_disk = details_on_disk(&path);
    assert_eq!(on_disk.len(), max_lines);
    assert_eq!(on_disk.first().map(String::as_str), Some("event 14"));
    assert_eq!(on_disk.last().map(String::as_str), Some("event 5"));
    assert_eq!(writer.len(), max_lines);
}

// ---------------------------------------------------------------------------
// Overwrite mode
// ---------------------------------------------------------------------------

#[test]
fn overwrite_keeps_length_on_matching_verb() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let mut writer = EventWriter::open(&path, config(5, 1));
    writer.append(event("Install", "begin"));
    writer.append(event("Download", "0%"));

    for step in ["25%", "50%", "100%"] {
        writer.append_overwrite(event("download", step));
        assert_eq!(writer.len(), 2);
    }
    assert_eq!(details_on_disk(&path), ["100%", "begin"]);

    writer.append_overwrite(event("Verify", "checksum"));
    assert_eq!(writer.len(), 3);
    assert_eq!(writer.stats().overwrites, 3);
}

#[test]
fn overwrite_growth_is_still_bounded() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let mut writer = EventWriter::open(&path, config(2, 1));
    writer.append(event("A", "1"));
    writer.append(event("B", "2"));
    writer.append_overwrite(event("C", "3"));
    assert_eq!(writer.len(), 2);
    assert_eq!(details_on_disk(&path), ["3", "2"]);
}

// ---------------------------------------------------------------------------
// Latency
// ---------------------------------------------------------------------------

#[test]
fn latency_three_writes_on_third_append() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let mut writer = EventWriter::open(&path, config(10, 3));
    let created = modified(&path);

    assert_eq!(writer.append(event("Build", "1")), WriteOutcome::Buffered);
    assert_eq!(writer.append(event("Build", "2")), WriteOutcome::Buffered);
    assert_eq!(fs::read_to_string(&path).unwrap_or_default(), "");
    assert_eq!(modified(&path), created);
    assert_eq!(writer.pending_writes(), 2);
    assert_eq!(writer.stats().flushes, 0);

    assert_eq!(writer.append(event("Build", "3")), WriteOutcome::Flushed);
    assert_eq!(writer.stats().flushes, 1);
    assert_eq!(writer.pending_writes(), 0);
    assert_eq!(details_on_disk(&path), ["3", "2", "1"]);
}

#[test]
fn explicit_flush_and_close_write_pending_events() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let mut writer = EventWriter::open(&path, config(10, 100));
    writer.append(event("Build", "1"));
    assert_eq!(writer.flush(), WriteOutcome::Flushed);
    assert_eq!(details_on_disk(&path), ["1"]);

    writer.append(event("Build", "2"));
    assert_eq!(writer.close(), WriteOutcome::Flushed);
    assert_eq!(details_on_disk(&path), ["2", "1"]);
}

// ---------------------------------------------------------------------------
// Persistence across writers
// ---------------------------------------------------------------------------

#[test]
fn reopened_writer_continues_existing_file() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let writer = EventWriter::open(&path, config(3, 1));
    drop(writer);
    {
        let mut writer = EventWriter::open(&path, config(3, 1));
        writer.append(event("Build", "first"));
        writer.append(event("Build", "second"));
    }

    let mut writer = EventWriter::open(&path, config(3, 1));
    assert_eq!(writer.len(), 2);
    writer.append(event("Build", "third"));
    writer.append(event("Build", "fourth"));
    assert_eq!(details_on_disk(&path), ["fourth", "third", "second"]);
}

#[test]
fn every_written_line_has_fixed_width() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    let dir = dir.unwrap_or_else(|_| panic!("tempdir"));
    let path = dir.path().join("events.log");

    let mut writer = EventWriter::open(&path, config(10, 1))
        .with_enricher(ProcessIdEnricher::new());
    writer.append(Event::now("Acme", "Build", "Widget", "x".repeat(500), 10, 20));
    writer.log("Acme", "Done", "Widget", "");

    let lines = EventReader::new().read_lines(&path).unwrap_or_default();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert_eq!(line.chars().count(), eventlog_rs::LINE_WIDTH);
    }
}
