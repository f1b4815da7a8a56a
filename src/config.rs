//! Editor configuration with validated defaults.

use serde::{Deserialize, Serialize};

/// Default undo/redo depth for the HTML-document history.
pub const DEFAULT_DOCUMENT_HISTORY_LIMIT: usize = 20;

/// Default undo/redo depth for the page-plan history.
pub const DEFAULT_PLAN_HISTORY_LIMIT: usize = 50;

/// Maximum accepted document size in bytes.
///
/// Documents and fragments above this ceiling are rejected at parse time to
/// protect against memory exhaustion from untrusted input.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024; // 10 MB

/// Configuration for the edit-application engine and its histories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum retained history entries for the HTML-document variant.
    #[serde(default = "default_document_history_limit")]
    pub document_history_limit: usize,

    /// Maximum retained history entries for the page-plan variant.
    #[serde(default = "default_plan_history_limit")]
    pub plan_history_limit: usize,

    /// Byte ceiling applied to every document and fragment parse.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

fn default_document_history_limit() -> usize {
    DEFAULT_DOCUMENT_HISTORY_LIMIT
}

fn default_plan_history_limit() -> usize {
    DEFAULT_PLAN_HISTORY_LIMIT
}

fn default_max_document_bytes() -> usize {
    MAX_DOCUMENT_BYTES
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            document_history_limit: DEFAULT_DOCUMENT_HISTORY_LIMIT,
            plan_history_limit: DEFAULT_PLAN_HISTORY_LIMIT,
            max_document_bytes: MAX_DOCUMENT_BYTES,
        }
    }
}

impl EditorConfig {
    /// Override the HTML-document history depth.
    #[must_use]
    pub fn with_document_history_limit(mut self, limit: usize) -> Self {
        self.document_history_limit = limit.max(1);
        self
    }

    /// Override the page-plan history depth.
    #[must_use]
    pub fn with_plan_history_limit(mut self, limit: usize) -> Self {
        self.plan_history_limit = limit.max(1);
        self
    }

    /// Override the parse-time byte ceiling.
    #[must_use]
    pub fn with_max_document_bytes(mut self, bytes: usize) -> Self {
        self.max_document_bytes = bytes;
        self
    }
}
