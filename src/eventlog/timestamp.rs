//! Rendering and parsing of the event time column.
//!
//! Times are stored as local wall-clock values in the form
//! `yyyyMMdd hh:mm:ss.ff tt`: a 12-hour clock with an `AM`/`PM` marker and
//! hundredths of a second, for example `20240131 03:04:05.67 PM`. The
//! rendering is always the invariant (English) one; parsing additionally
//! accepts a handful of localized meridiem markers so logs written by
//! localized producers stay readable.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// Number of characters in a rendered timestamp.
pub const TIME_WIDTH: usize = 23;

const CLOCK_FORMAT: &str = "%Y%m%d %I:%M:%S";
const PARSE_FORMAT: &str = "%Y%m%d %I:%M:%S%.f %p";

/// Localized meridiem markers (lowercase) and their invariant equivalent.
const LOCALIZED_MARKERS: &[(&str, &str)] = &[
    ("a. m.", "AM"),
    ("p. m.", "PM"),
    ("a.m.", "AM"),
    ("p.m.", "PM"),
    ("vorm.", "AM"),
    ("nachm.", "PM"),
    ("π.μ.", "AM"),
    ("μ.μ.", "PM"),
    ("午前", "AM"),
    ("午後", "PM"),
    ("上午", "AM"),
    ("下午", "PM"),
    ("오전", "AM"),
    ("오후", "PM"),
];

/// Current local wall-clock time.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render `time` as `yyyyMMdd hh:mm:ss.ff tt`.
///
/// The result is always [`TIME_WIDTH`] characters long. Sub-hundredth
/// precision is truncated, not rounded. Times outside the four-digit years
/// `0000..=9999` are clamped to the nearest representable instant.
#[must_use]
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    let time = clamp_to_four_digit_years(*time);
    // Leap seconds report nanoseconds above one billion.
    let hundredths = (time.nanosecond() / 10_000_000).min(99);
    format!(
        "{}.{hundredths:02} {}",
        time.format(CLOCK_FORMAT),
        time.format("%p")
    )
}

fn clamp_to_four_digit_years(time: NaiveDateTime) -> NaiveDateTime {
    let earliest = NaiveDate::from_ymd_opt(0, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let latest =
        NaiveDate::from_ymd_opt(9999, 12, 31).and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999));
    match (earliest, latest) {
        (Some(earliest), Some(latest)) => time.clamp(earliest, latest),
        _ => time,
    }
}

/// Parse a time column produced by [`format_timestamp`].
///
/// Surrounding whitespace is ignored. The invariant `AM`/`PM` form is tried
/// first, then localized markers such as `p.m.` or `午後`. Returns `None`
/// when neither matches.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, PARSE_FORMAT)
        .ok()
        .or_else(|| parse_localized(text))
}

fn parse_localized(text: &str) -> Option<NaiveDateTime> {
    let lower = text.to_lowercase();
    LOCALIZED_MARKERS.iter().find_map(|(marker, invariant)| {
        let clock = lower.strip_suffix(marker)?;
        let candidate = format!("{} {invariant}", clock.trim_end());
        NaiveDateTime::parse_from_str(&candidate, PARSE_FORMAT).ok()
    })
}
