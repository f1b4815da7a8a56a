//! Bounded undo/redo history of document snapshots.
//!
//! Entries form a simple linear list with a single current index. Pushing a
//! new snapshot discards the redo branch (never merges it), appends, and then
//! evicts from the front once the configured maximum is exceeded, shifting
//! the current index so `can_undo`/`can_redo` stay consistent. Each document
//! gets its own `History` value; there is no ambient or shared state, so
//! independent documents (e.g. multiple tabs) simply own independent
//! histories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HistoryError;

/// One snapshot in the history, with display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry<T> {
    pub id: Uuid,
    pub snapshot: T,
    pub timestamp: DateTime<Utc>,
    /// Human-readable description of the action that produced this snapshot.
    pub label: String,
    /// The directive that produced this snapshot, when one did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive_id: Option<Uuid>,
}

impl<T> HistoryEntry<T> {
    /// Build an entry stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(snapshot: T, label: String, directive_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            snapshot,
            timestamp: Utc::now(),
            label,
            directive_id,
        }
    }
}

/// An undo/redo ring of snapshots, bounded in length.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<HistoryEntry<T>>,
    current: Option<usize>,
    max_entries: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// Create an empty history retaining at most `max_entries` snapshots.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            max_entries: max_entries.max(1),
        }
    }

    /// Commit a new snapshot as the current state.
    ///
    /// Any redo branch past the current index is discarded first; eviction
    /// from the front then keeps the list within bounds, adjusting the
    /// current index by the number of evicted entries.
    pub fn push(&mut self, snapshot: T, label: impl Into<String>, directive_id: Option<Uuid>) {
        match self.current {
            Some(current) => self.entries.truncate(current + 1),
            None => self.entries.clear(),
        }
        let label = label.into();
        tracing::debug!(%label, entries = self.entries.len() + 1, "pushing history entry");
        self.entries.push(HistoryEntry::new(snapshot, label, directive_id));

        let mut current = self.entries.len() - 1;
        let excess = self.entries.len().saturating_sub(self.max_entries);
        if excess > 0 {
            self.entries.drain(..excess);
            current -= excess;
        }
        self.current = Some(current);
    }

    /// Step back one snapshot. A no-op at the oldest entry.
    pub fn undo(&mut self) -> bool {
        match self.current {
            Some(current) if current > 0 => {
                self.current = Some(current - 1);
                tracing::debug!(current = current - 1, "undo");
                true
            }
            _ => false,
        }
    }

    /// Step forward one snapshot. A no-op at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.current {
            Some(current) if current + 1 < self.entries.len() => {
                self.current = Some(current + 1);
                tracing::debug!(current = current + 1, "redo");
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        matches!(self.current, Some(current) if current > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        matches!(self.current, Some(current) if current + 1 < self.entries.len())
    }

    /// The current snapshot, if any entry exists.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.current_entry().map(|entry| &entry.snapshot)
    }

    /// The current entry with its metadata.
    #[must_use]
    pub fn current_entry(&self) -> Option<&HistoryEntry<T>> {
        self.current.and_then(|current| self.entries.get(current))
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry<T>] {
        &self.entries
    }

    /// Bulk-load externally supplied history, e.g. from an imported save
    /// file.
    ///
    /// Rejected outright (in-memory state untouched) when the list is
    /// empty or the index is out of bounds; untrusted save data is never
    /// silently clamped. Oversized lists are accepted as supplied; the bound
    /// applies again on the next push.
    pub fn replace_all(
        &mut self,
        entries: Vec<HistoryEntry<T>>,
        index: usize,
    ) -> Result<(), HistoryError> {
        if entries.is_empty() {
            return Err(HistoryError::Empty);
        }
        if index >= entries.len() {
            return Err(HistoryError::IndexOutOfBounds {
                index,
                len: entries.len(),
            });
        }
        tracing::debug!(entries = entries.len(), index, "replacing history");
        self.entries = entries;
        self.current = Some(index);
        Ok(())
    }

    /// Refresh the current entry's snapshot in place, for live-typing edits
    /// that should not create a new undo step.
    ///
    /// Deep-equal snapshots are suppressed entirely, with no timestamp or label
    /// churn. Returns whether the entry changed.
    pub fn update_current(&mut self, snapshot: T) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let entry = &mut self.entries[current];
        if entry.snapshot == snapshot {
            return false;
        }
        entry.snapshot = snapshot;
        entry.timestamp = Utc::now();
        true
    }
}
