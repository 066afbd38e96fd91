//! Calculation history
//!
//! Entries are appended in evaluation order and never edited; the only way
//! out is [`History::clear`].

use serde::{Deserialize, Serialize};

use crate::core::format_number;

/// A single evaluated expression and its result.
///
/// Serialized as `{"query": ..., "result": ...}`, the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    query: String,
    result: f64,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(query: impl Into<String>, result: f64) -> Self {
        Self {
            query: query.into(),
            result,
        }
    }

    /// The expression text as it was on the display
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Returns a formatted display string
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.query, format_number(self.result))
    }
}

/// Ordered list of past calculations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `entry` appended
    #[must_use]
    pub fn with_entry(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self { entries }
    }

    /// Adds a calculation result to the history
    pub fn record(&mut self, query: &str, result: f64) {
        self.entries.push(HistoryEntry::new(query, result));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Returns the entry at the given index (0 = oldest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
