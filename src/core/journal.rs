//! Transition journal: the ordered record of completed transitions.
//!
//! The journal is updated persistently: recording returns a new journal
//! and leaves the original untouched. Only completed transitions are
//! recorded - halted triggers and reconstitution leave no trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
///
/// The initial entry made when an instance is constructed fresh has no
/// predecessor and no triggering event, so both fields are optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State the machine left, `None` for the initial entry
    pub from: Option<String>,
    /// State the machine entered
    pub to: String,
    /// Event that caused the transition, `None` for the initial entry
    pub event: Option<String>,
    /// When the transition completed
    pub at: DateTime<Utc>,
}

/// Ordered journal of completed transitions.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{Journal, TransitionRecord};
/// use chrono::Utc;
///
/// let journal = Journal::new();
///
/// let journal = journal.record(TransitionRecord {
///     from: None,
///     to: "draft".to_string(),
///     event: None,
///     at: Utc::now(),
/// });
///
/// let journal = journal.record(TransitionRecord {
///     from: Some("draft".to_string()),
///     to: "review".to_string(),
///     event: Some("submit".to_string()),
///     at: Utc::now(),
/// });
///
/// assert_eq!(journal.path(), vec!["draft", "review"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<TransitionRecord>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new()
    }
}

impl Journal {
    /// Create a new empty journal.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new journal.
    ///
    /// The existing journal is not mutated.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// The sequence of state names visited, in order.
    ///
    /// Starts with the first record's predecessor when it has one - an
    /// instance reconstituted mid-machine journals its first transition
    /// with a predecessor, while a fresh instance's initial entry does
    /// not.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            if let Some(from) = &first.from {
                path.push(from.as_str());
            }
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Elapsed time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty journal.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.at.signed_duration_since(first.at);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
