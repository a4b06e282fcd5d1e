use serde::{Deserialize, Serialize};

pub const ERROR_TOKEN: &str = "Error";
/// Number of entries shown by the history panels.
pub const DISPLAY_ENTRIES: usize = 10;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CalcHistoryEntry {
    pub expr: String,
    pub result: String,
}

impl CalcHistoryEntry {
    pub fn is_error(&self) -> bool {
        self.result == ERROR_TOKEN
    }
}

/// Append-only record of evaluations for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalcHistory {
    entries: Vec<CalcHistoryEntry>,
}

impl CalcHistory {
    pub fn push(&mut self, entry: CalcHistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[CalcHistoryEntry] {
        &self.entries
    }

    /// Newest `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&CalcHistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }
}
