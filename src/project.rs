//! Project snapshot: the bundle the persistence layer stores and restores.
//!
//! The engine itself never touches the filesystem or local storage; it only
//! produces and consumes this serializable value. Restoring goes through
//! `History::replace_all`, so a malformed save file is rejected without
//! disturbing in-memory state.

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::history::{History, HistoryEntry};
use crate::plan::PagePlan;

/// Everything needed to resume an editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// The current serialized document.
    pub document: String,
    /// The full history entry list, oldest first.
    pub entries: Vec<HistoryEntry<String>>,
    /// Index of the current entry within `entries`.
    pub current_index: usize,
    /// The page plan, when the project uses the block-list editing mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<PagePlan>,
}

impl ProjectSnapshot {
    /// Capture the state of a document history. Returns `None` for an empty
    /// history, which has nothing to save yet.
    #[must_use]
    pub fn capture(history: &History<String>) -> Option<Self> {
        let current_index = history.current_index()?;
        let document = history.current()?.clone();
        Some(Self {
            document,
            entries: history.entries().to_vec(),
            current_index,
            plan: None,
        })
    }

    /// Attach a page plan to the snapshot.
    #[must_use]
    pub fn with_plan(mut self, plan: PagePlan) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rebuild a history from this snapshot.
    ///
    /// The entry list and index are validated as untrusted input; a bad
    /// snapshot yields an error and no history.
    pub fn restore(&self, max_entries: usize) -> Result<History<String>, HistoryError> {
        let mut history = History::new(max_entries);
        history.replace_all(self.entries.clone(), self.current_index)?;
        Ok(history)
    }
}
