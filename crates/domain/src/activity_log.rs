use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One activity-log row as returned by the log window endpoint.
///
/// `time` is kept as the server-formatted timestamp; the backend already
/// renders it for display and the client never re-parses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    time: String,
    activity: String,
    resource: String,
    actor: String,
}

impl LogEntry {
    /// Creates a log entry from its four display fields.
    #[must_use]
    pub fn new(
        time: impl Into<String>,
        activity: impl Into<String>,
        resource: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            activity: activity.into(),
            resource: resource.into(),
            actor: actor.into(),
        }
    }

    /// Returns the server-formatted event time.
    #[must_use]
    pub fn time(&self) -> &str {
        self.time.as_str()
    }

    /// Returns the human-readable activity description.
    #[must_use]
    pub fn activity(&self) -> &str {
        self.activity.as_str()
    }

    /// Returns the affected resource.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.resource.as_str()
    }

    /// Returns the acting user.
    #[must_use]
    pub fn actor(&self) -> &str {
        self.actor.as_str()
    }
}

/// Full, immutable result of one log window fetch.
///
/// Cloning shares the underlying rows. `generation` identifies which fetch
/// produced the set so page navigation can be checked against the installed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogResultSet {
    generation: u64,
    entries: Arc<[LogEntry]>,
}

impl LogResultSet {
    /// Wraps fetched rows, preserving server order.
    #[must_use]
    pub fn new(generation: u64, entries: Vec<LogEntry>) -> Self {
        Self {
            generation,
            entries: entries.into(),
        }
    }

    /// Returns the fetch generation that produced this set.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns every row in server order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns the row count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the fetch produced no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a read-only view of the rows in `range`, clamped to the set.
    #[must_use]
    pub fn view(&self, range: Range<usize>) -> &[LogEntry] {
        let end = range.end.min(self.entries.len());
        let start = range.start.min(end);
        &self.entries[start..end]
    }
}
