//! Integration tests for the fixed-width codec.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eventlog_rs::eventlog::codec::{
    UNPARSED_COMPANY, UNPARSED_DETAILS, UNPARSED_TARGET, UNPARSED_VERB,
};
use eventlog_rs::prelude::*;
use eventlog_rs::LINE_WIDTH;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn at(hour: u32, min: u32, sec: u32, milli: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 31)
        .and_then(|d| d.and_hms_milli_opt(hour, min, sec, milli))
        .unwrap_or_default()
}

fn assert_sentinel(event: &Event) {
    assert_eq!(event.company, UNPARSED_COMPANY);
    assert_eq!(event.action_verb, UNPARSED_VERB);
    assert_eq!(event.action_target, UNPARSED_TARGET);
    assert_eq!(event.details, UNPARSED_DETAILS);
    assert_eq!(event.stage_progress, STAGE_NOT_APPLICABLE);
    assert_eq!(event.total_progress, TOTAL_NOT_APPLICABLE);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn acme_build_widget_round_trip() {
    let event = Event::now("Acme", "Build", "Widget", "ok", 50, 100);
    let decoded = decode(&encode(&event));

    assert_eq!(decoded.company, "Acme");
    assert_eq!(decoded.action_verb, "Build");
    assert_eq!(decoded.action_target, "Widget");
    assert_eq!(decoded.details, "ok");
    assert_eq!(decoded.stage_progress, 50);
    assert_eq!(decoded.total_progress, 100);
    assert!(decoded.time_specified());
}

#[test]
fn explicit_time_survives_to_hundredths() {
    let time = at(15, 4, 5, 678);
    let event = Event::without_progress(time, "Acme", "Build", "Widget", "ok");
    let decoded = decode(&encode(&event));
    assert_eq!(decoded.time, Some(at(15, 4, 5, 670)));
}

#[test]
fn every_column_truncates_within_width() {
    let event = Event::now(
        "A".repeat(80),
        "V".repeat(40),
        "T".repeat(40),
        "D".repeat(400),
        101,
        -5,
    );
    let line = encode(&event);
    assert_eq!(line.chars().count(), LINE_WIDTH);

    let decoded = decode(&line);
    assert!(decoded.company.ends_with(".."));
    assert_eq!(decoded.action_verb, format!("{}..", "V".repeat(13)));
    assert_eq!(decoded.action_target, format!("{}..", "T".repeat(13)));
    assert_eq!(decoded.details, format!("{}...", "D".repeat(252)));
    assert_eq!(decoded.stage_progress, STAGE_NOT_APPLICABLE);
    assert_eq!(decoded.total_progress, TOTAL_NOT_APPLICABLE);
}

#[test]
fn out_of_range_years_keep_line_width() {
    let time = NaiveDate::from_ymd_opt(12345, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let line = encode(&Event::new(time, "Acme", "Build", "Widget", "ok", 1, 1));
    assert_eq!(line.chars().count(), LINE_WIDTH);

    let decoded = decode_checked(&line);
    assert!(!decoded.is_substituted());
    assert_eq!(decoded.event().company, "Acme");
    assert_eq!(
        decoded.event().time.map(|t| t.format("%Y").to_string()),
        Some("9999".to_string())
    );
}

#[test]
fn malformed_lines_decode_to_sentinels() {
    for line in ["", "   ", "not a log line", "20240131 03:04:05.67 PM Acme"] {
        let decoded = decode_checked(line);
        assert!(decoded.is_substituted(), "line {line:?} should not parse");
        assert_sentinel(decoded.event());
    }
}

#[test]
fn sentinel_keeps_parsed_time() {
    let decoded = decode_checked("20240131 03:04:05.67 PM Acme");
    assert_eq!(decoded.event().time, Some(at(15, 4, 5, 670)));
    assert!(matches!(decoded.error(), Some(DecodeError::TooShort { .. })));
}

#[test]
fn corrupt_progress_is_reported() {
    let event = Event::new(at(9, 0, 0, 0), "Acme", "Build", "Widget", "ok", 5, 10);
    let line = encode(&event).replacen("5   10 ", "x   10 ", 1);

    let decoded = decode_checked(&line);
    assert!(matches!(
        decoded.error(),
        Some(DecodeError::InvalidProgress { field: "stage", .. })
    ));
    assert_sentinel(decoded.event());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn label(max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("([A-Za-z0-9]([A-Za-z0-9 _.-]{{0,{}}}[A-Za-z0-9])?)?", max - 2))
        .unwrap_or_else(|_| panic!("valid regex"))
}

fn progress() -> impl Strategy<Value = i32> {
    prop_oneof![0..=100i32, Just(STAGE_NOT_APPLICABLE)]
}

fn time() -> impl Strategy<Value = NaiveDateTime> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60, 0u32..100).prop_map(
        |(y, mo, d, h, mi, s, hundredths)| {
            NaiveDate::from_ymd_opt(y, mo, d)
                .and_then(|date| date.and_hms_milli_opt(h, mi, s, hundredths * 10))
                .unwrap_or_default()
        },
    )
}

fn any_time() -> impl Strategy<Value = NaiveDateTime> {
    (-262_000i32..262_000, 1u32..=366, 0u32..86_400, 0u32..1_000_000_000).prop_map(
        |(year, ordinal, secs, nanos)| {
            NaiveDate::from_yo_opt(year, ordinal)
                .or_else(|| NaiveDate::from_yo_opt(year, 365))
                .zip(NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos))
                .map(|(date, time)| date.and_time(time))
                .unwrap_or_default()
        },
    )
}

proptest! {
    #[test]
    fn encode_is_always_line_width(
        time in proptest::option::of(any_time()),
        company in ".{0,60}",
        verb in ".{0,30}",
        target in ".{0,30}",
        details in ".{0,300}",
        stage in any::<i32>(),
        total in any::<i32>(),
    ) {
        let mut event = Event::now(company, verb, target, details, stage, total);
        event.time = time;
        let line = encode(&event);
        prop_assert_eq!(line.chars().count(), LINE_WIDTH);
        prop_assert!(!decode_checked(&line).is_substituted());
    }

    #[test]
    fn decode_inverts_encode_for_ascii(
        time in time(),
        company in label(35),
        verb in label(15),
        target in label(15),
        details in label(254),
        stage in progress(),
        total in 0..=100i32,
    ) {
        let event = Event::new(time, company, verb, target, details, stage, total);
        let decoded = decode_checked(&encode(&event));
        prop_assert!(!decoded.is_substituted());
        prop_assert_eq!(decoded.into_event(), event);
    }

    #[test]
    fn decode_never_panics(line in ".{0,400}") {
        let _ = decode(&line);
    }
}
