//! Bounded, most-recent-first window of encoded lines.

use std::collections::VecDeque;

/// Lines allocated up front; larger windows grow on demand.
const PREALLOCATED_LINES: usize = 256;

/// A fixed-capacity list of encoded lines, newest first.
///
/// Pushing onto a full window evicts the oldest line in O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Window {
    /// Create an empty window. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(PREALLOCATED_LINES)),
            capacity,
        }
    }

    /// Create a window from lines ordered newest first, as they appear in a
    /// log file. Empty lines are skipped and lines beyond `capacity` are
    /// dropped.
    #[must_use]
    pub fn from_lines<I, S>(capacity: usize, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut window = Self::new(capacity);
        window.lines.extend(
            lines
                .into_iter()
                .map(Into::into)
                .filter(|line: &String| !line.is_empty())
                .take(window.capacity),
        );
        window
    }

    /// Insert a line as the newest entry.
    ///
    /// Returns the evicted oldest line if the window was full.
    pub fn push_front(&mut self, line: String) -> Option<String> {
        let evicted = if self.lines.len() >= self.capacity {
            self.lines.pop_back()
        } else {
            None
        };
        self.lines.push_front(line);
        evicted
    }

    /// Replace the newest entry in place.
    ///
    /// Returns the replaced line, or `None` (leaving the window unchanged)
    /// if the window is empty.
    pub fn replace_front(&mut self, line: String) -> Option<String> {
        self.lines
            .front_mut()
            .map(|front| std::mem::replace(front, line))
    }

    /// The newest line.
    #[must_use]
    pub fn front(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    /// Lines from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of lines held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the window holds no lines.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of lines held.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
