//! Event decorators applied by the writer before encoding.

use super::event::Event;

/// Transforms an event just before it is encoded.
pub trait EventEnricher: Send + Sync {
    /// Return the enriched event.
    fn enrich(&self, event: Event) -> Event;
}

impl<F> EventEnricher for F
where
    F: Fn(Event) -> Event + Send + Sync,
{
    fn enrich(&self, event: Event) -> Event {
        self(event)
    }
}

/// Prefixes the details of every event with the current process ID.
///
/// The prefix has the form `"[  1234] "`: the ID right-aligned in six
/// columns, so lines written by several processes stay aligned.
#[derive(Debug, Clone, Copy)]
pub struct ProcessIdEnricher {
    pid: u32,
}

impl ProcessIdEnricher {
    /// Create an enricher for the current process.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pid(std::process::id())
    }

    /// Create an enricher tagging events with a fixed process ID.
    #[must_use]
    pub fn with_pid(pid: u32) -> Self {
        Self { pid }
    }

    /// The tag prepended to event details.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("[{:>6}] ", self.pid)
    }
}

impl Default for ProcessIdEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventEnricher for ProcessIdEnricher {
    fn enrich(&self, mut event: Event) -> Event {
        event.details.insert_str(0, &self.tag());
        event
    }
}
