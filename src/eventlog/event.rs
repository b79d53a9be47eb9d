//! The [`Event`] record written to and read from an event log.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Stage progress value meaning "not applicable"; rendered as blanks.
pub const STAGE_NOT_APPLICABLE: i32 = -1;

/// Total progress value meaning "not applicable"; rendered as `999`.
pub const TOTAL_NOT_APPLICABLE: i32 = 999;

/// One structured progress or audit entry.
///
/// An event is built once per logged action and then encoded straight away
/// (see [`encode`](super::codec::encode)); only the encoded line is ever
/// persisted.
///
/// A `time` of `None` means "unspecified": the wall-clock time at the
/// moment of encoding is written instead. Decoded events always carry
/// `Some(time)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Explicit event time, or `None` to use the time of encoding.
    pub time: Option<NaiveDateTime>,

    /// Owner or source of the event.
    pub company: String,

    /// What happened, e.g. `"Build"` or `"Upload"`.
    pub action_verb: String,

    /// What it happened to.
    pub action_target: String,

    /// Free text detail. Line breaks are not allowed.
    pub details: String,

    /// Progress of the current stage in `0..=100`, or
    /// [`STAGE_NOT_APPLICABLE`].
    pub stage_progress: i32,

    /// Overall progress in `0..=100`, or [`TOTAL_NOT_APPLICABLE`].
    pub total_progress: i32,
}

impl Event {
    /// Create an event with an explicit time and progress values.
    #[must_use]
    pub fn new(
        time: NaiveDateTime,
        company: impl Into<String>,
        action_verb: impl Into<String>,
        action_target: impl Into<String>,
        details: impl Into<String>,
        stage_progress: i32,
        total_progress: i32,
    ) -> Self {
        Self {
            time: Some(time),
            ..Self::now(
                company,
                action_verb,
                action_target,
                details,
                stage_progress,
                total_progress,
            )
        }
    }

    /// Create an event whose time is taken when it is encoded.
    #[must_use]
    pub fn now(
        company: impl Into<String>,
        action_verb: impl Into<String>,
        action_target: impl Into<String>,
        details: impl Into<String>,
        stage_progress: i32,
        total_progress: i32,
    ) -> Self {
        Self {
            time: None,
            company: company.into(),
            action_verb: action_verb.into(),
            action_target: action_target.into(),
            details: strip_newlines(details.into()),
            stage_progress,
            total_progress,
        }
    }

    /// Create an event with an explicit time and no progress information.
    #[must_use]
    pub fn without_progress(
        time: NaiveDateTime,
        company: impl Into<String>,
        action_verb: impl Into<String>,
        action_target: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::new(
            time,
            company,
            action_verb,
            action_target,
            details,
            STAGE_NOT_APPLICABLE,
            TOTAL_NOT_APPLICABLE,
        )
    }

    /// Create an event with an unspecified time and no progress information.
    #[must_use]
    pub fn message(
        company: impl Into<String>,
        action_verb: impl Into<String>,
        action_target: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::now(
            company,
            action_verb,
            action_target,
            details,
            STAGE_NOT_APPLICABLE,
            TOTAL_NOT_APPLICABLE,
        )
    }

    /// Replace the event time.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_time(mut self, time: NaiveDateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Replace both progress values.
    #[must_use = "builders do nothing unless consumed"]
    pub fn with_progress(mut self, stage_progress: i32, total_progress: i32) -> Self {
        self.stage_progress = stage_progress;
        self.total_progress = total_progress;
        self
    }

    /// Returns `true` if the event carries an explicit time.
    #[inline]
    #[must_use]
    pub fn time_specified(&self) -> bool {
        self.time.is_some()
    }

    /// Stage progress as a percentage, or `None` when not applicable.
    #[must_use]
    pub fn stage_percent(&self) -> Option<u8> {
        percent(self.stage_progress)
    }

    /// Total progress as a percentage, or `None` when not applicable.
    #[must_use]
    pub fn total_percent(&self) -> Option<u8> {
        percent(self.total_progress)
    }

    /// Compare two events by time.
    ///
    /// An event with an unspecified time is always ordered before the other
    /// event, and so is the left operand when both times are equal. This is
    /// not a total order: `a.chronological_cmp(&b)` and
    /// `b.chronological_cmp(&a)` both return [`Ordering::Less`] on a tie.
    /// Do not pass it to `sort_by`, which requires a total order.
    #[must_use]
    pub fn chronological_cmp(&self, other: &Event) -> Ordering {
        match (self.time, other.time) {
            (Some(mine), Some(theirs)) if mine != theirs => mine.cmp(&theirs),
            _ => Ordering::Less,
        }
    }
}

fn percent(value: i32) -> Option<u8> {
    u8::try_from(value).ok().filter(|p| *p <= 100)
}

fn strip_newlines(mut text: String) -> String {
    text.retain(|c| c != '\n');
    text
}
