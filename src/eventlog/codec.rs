//! Fixed-width line codec for [`Event`] records.
//!
//! Every event occupies exactly one line of [`LINE_WIDTH`] characters:
//!
//! ```text
//! [24: time + sep][36: company][16: verb][16: target]
//! [4: stage + sep][4: total + sep][255: details]
//! ```
//!
//! - time — `yyyyMMdd hh:mm:ss.ff tt` followed by one space.
//! - company, verb, target — left-justified and space-padded. A value that
//!   does not leave at least one trailing blank is cut and ends in `".. "`.
//! - stage — plain decimal left-justified in three columns, blank when
//!   outside `0..=100`.
//! - total — plain decimal left-justified in three columns, `999` when
//!   outside `0..=100`.
//! - details — line breaks removed, cut to 252 characters plus `"..."`
//!   when longer than 254, otherwise space-padded.
//!
//! Widths are counted in characters, not bytes.
//!
//! Decoding never fails. A line that cannot be parsed yields a sentinel
//! event with fixed placeholder text; [`decode_checked`] reports whether
//! that happened.

use super::error::DecodeError;
use super::event::{Event, STAGE_NOT_APPLICABLE, TOTAL_NOT_APPLICABLE};
use super::timestamp::{self, TIME_WIDTH};
use chrono::NaiveDateTime;
use std::iter;

/// Width of the time column including its trailing separator.
pub const TIME_COLUMN_WIDTH: usize = TIME_WIDTH + 1;

/// Width of the company column.
pub const COMPANY_WIDTH: usize = 36;

/// Width of the action verb column.
pub const VERB_WIDTH: usize = 16;

/// Width of the action target column.
pub const TARGET_WIDTH: usize = 16;

/// Width of a rendered progress value, excluding its separator.
pub const PROGRESS_WIDTH: usize = 3;

/// Width of a progress column including its trailing separator.
pub const PROGRESS_COLUMN_WIDTH: usize = PROGRESS_WIDTH + 1;

/// Width of the details column.
pub const DETAILS_WIDTH: usize = 255;

/// Total width of an encoded line, excluding the line terminator.
pub const LINE_WIDTH: usize = TIME_COLUMN_WIDTH
    + COMPANY_WIDTH
    + VERB_WIDTH
    + TARGET_WIDTH
    + 2 * PROGRESS_COLUMN_WIDTH
    + DETAILS_WIDTH;

/// Characters that must be present before the details column starts.
const FIXED_COLUMNS_WIDTH: usize = LINE_WIDTH - DETAILS_WIDTH;

const LABEL_MARKER: &str = ".. ";
const DETAILS_MARKER: &str = "...";
const BLANK_STAGE: &str = "   ";
const BLANK_TOTAL: &str = "999";

/// Company of a sentinel event.
pub const UNPARSED_COMPANY: &str = "UNPARSEABLE";

/// Action verb of a sentinel event.
pub const UNPARSED_VERB: &str = "Parse Error";

/// Action target of a sentinel event.
pub const UNPARSED_TARGET: &str = "Unknown";

/// Details of a sentinel event.
pub const UNPARSED_DETAILS: &str = "Log entry could not be parsed.";

/// The result of decoding a line, keeping track of substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The line was parsed successfully.
    Parsed(Event),

    /// The line could not be parsed and a sentinel event stands in for it.
    Substituted {
        /// The sentinel event.
        event: Event,
        /// Why parsing failed.
        error: DecodeError,
    },
}

impl Decoded {
    /// The decoded or substituted event.
    #[must_use]
    pub fn event(&self) -> &Event {
        match self {
            Decoded::Parsed(event) | Decoded::Substituted { event, .. } => event,
        }
    }

    /// Consume the result, returning the event either way.
    #[must_use]
    pub fn into_event(self) -> Event {
        match self {
            Decoded::Parsed(event) | Decoded::Substituted { event, .. } => event,
        }
    }

    /// Returns `true` if a sentinel event was substituted.
    #[inline]
    #[must_use]
    pub fn is_substituted(&self) -> bool {
        matches!(self, Decoded::Substituted { .. })
    }

    /// The parse failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&DecodeError> {
        match self {
            Decoded::Parsed(_) => None,
            Decoded::Substituted { error, .. } => Some(error),
        }
    }
}

/// Encode an event into a fixed-width line without a line terminator.
///
/// An event without an explicit time is stamped with the current local
/// time. The result is always [`LINE_WIDTH`] characters long.
#[must_use]
pub fn encode(event: &Event) -> String {
    let time = event.time.unwrap_or_else(timestamp::now);
    let mut line = String::with_capacity(LINE_WIDTH);

    line.push_str(&timestamp::format_timestamp(&time));
    line.push(' ');

    push_label(&mut line, &event.company, COMPANY_WIDTH);
    push_label(&mut line, &event.action_verb, VERB_WIDTH);
    push_label(&mut line, &event.action_target, TARGET_WIDTH);

    push_progress(&mut line, event.stage_progress, BLANK_STAGE);
    push_progress(&mut line, event.total_progress, BLANK_TOTAL);

    push_details(&mut line, &event.details);
    line
}

/// Decode a line into an event, substituting a sentinel on failure.
#[must_use]
pub fn decode(line: &str) -> Event {
    decode_checked(line).into_event()
}

/// Decode a line, reporting whether a sentinel had to be substituted.
///
/// The sentinel keeps the parsed timestamp when the time column was valid
/// and uses the current time otherwise.
#[must_use]
pub fn decode_checked(line: &str) -> Decoded {
    let mut parsed_time = None;
    match parse_line(line, &mut parsed_time) {
        Ok(event) => Decoded::Parsed(event),
        Err(error) => Decoded::Substituted {
            event: sentinel(parsed_time.unwrap_or_else(timestamp::now)),
            error,
        },
    }
}

/// Render `verb` the way it reads back after a round trip through the
/// verb column.
pub(crate) fn column_verb(verb: &str) -> String {
    let mut column = String::with_capacity(VERB_WIDTH);
    push_label(&mut column, verb, VERB_WIDTH);
    column.trim().to_string()
}

/// The placeholder event returned for unparseable lines.
#[must_use]
pub fn sentinel(time: NaiveDateTime) -> Event {
    Event::without_progress(
        time,
        UNPARSED_COMPANY,
        UNPARSED_VERB,
        UNPARSED_TARGET,
        UNPARSED_DETAILS,
    )
}

// ─── Encoding ───────────────────────────────────────────────────────────────

fn printable(text: &str) -> impl Iterator<Item = char> + Clone + '_ {
    text.chars().filter(|c| *c != '\r' && *c != '\n')
}

fn push_label(out: &mut String, text: &str, width: usize) {
    let chars = printable(text);
    if chars.clone().count() >= width {
        out.extend(chars.take(width - LABEL_MARKER.len()));
        out.push_str(LABEL_MARKER);
    } else {
        push_padded(out, chars, width);
    }
}

fn push_details(out: &mut String, text: &str) {
    let chars = printable(text);
    if chars.clone().count() >= DETAILS_WIDTH {
        out.extend(chars.take(DETAILS_WIDTH - DETAILS_MARKER.len()));
        out.push_str(DETAILS_MARKER);
    } else {
        push_padded(out, chars, DETAILS_WIDTH);
    }
}

fn push_padded(out: &mut String, chars: impl Iterator<Item = char>, width: usize) {
    let mut written = 0usize;
    for c in chars {
        out.push(c);
        written += 1;
    }
    out.extend(iter::repeat_n(' ', width.saturating_sub(written)));
}

fn push_progress(out: &mut String, value: i32, not_applicable: &str) {
    if (0..=100).contains(&value) {
        out.push_str(&format!("{value:<width$}", width = PROGRESS_WIDTH));
    } else {
        out.push_str(not_applicable);
    }
    out.push(' ');
}

// ─── Decoding ───────────────────────────────────────────────────────────────

/// Walks a line column by column, counting characters.
struct Columns<'a> {
    rest: &'a str,
    line_len: usize,
}

impl<'a> Columns<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            line_len: line.chars().count(),
        }
    }

    /// Take the next `width` characters, or fewer if the line ends first.
    fn take_up_to(&mut self, width: usize) -> &'a str {
        let split = self
            .rest
            .char_indices()
            .nth(width)
            .map_or(self.rest.len(), |(idx, _)| idx);
        let (column, rest) = self.rest.split_at(split);
        self.rest = rest;
        column
    }

    /// Take exactly `width` characters.
    fn take(&mut self, width: usize) -> Result<&'a str, DecodeError> {
        let column = self.take_up_to(width);
        if column.chars().count() < width {
            return Err(DecodeError::TooShort {
                len: self.line_len,
                expected: FIXED_COLUMNS_WIDTH,
            });
        }
        Ok(column)
    }

    fn remainder(self) -> &'a str {
        self.rest
    }
}

fn parse_line(line: &str, parsed_time: &mut Option<NaiveDateTime>) -> Result<Event, DecodeError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut columns = Columns::new(line);

    let time_text = columns.take_up_to(TIME_COLUMN_WIDTH).trim();
    let time = timestamp::parse_timestamp(time_text).ok_or_else(|| {
        DecodeError::InvalidTimestamp {
            value: time_text.to_string(),
        }
    })?;
    *parsed_time = Some(time);

    let company = columns.take(COMPANY_WIDTH)?.trim();
    let action_verb = columns.take(VERB_WIDTH)?.trim();
    let action_target = columns.take(TARGET_WIDTH)?.trim();
    let stage_progress = parse_progress(
        columns.take(PROGRESS_COLUMN_WIDTH)?,
        "stage",
        STAGE_NOT_APPLICABLE,
    )?;
    let total_progress = parse_progress(
        columns.take(PROGRESS_COLUMN_WIDTH)?,
        "total",
        TOTAL_NOT_APPLICABLE,
    )?;
    let details = columns.remainder().trim();

    Ok(Event {
        time: Some(time),
        company: company.to_string(),
        action_verb: action_verb.to_string(),
        action_target: action_target.to_string(),
        details: details.to_string(),
        stage_progress,
        total_progress,
    })
}

fn parse_progress(column: &str, field: &'static str, blank: i32) -> Result<i32, DecodeError> {
    let value = column.trim();
    if value.is_empty() {
        return Ok(blank);
    }
    value
        .parse::<i32>()
        .map_err(|_| DecodeError::InvalidProgress {
            field,
            value: value.to_string(),
        })
}
