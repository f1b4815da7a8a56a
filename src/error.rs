//! Error types for edit application and history management.
//!
//! Every fallible operation in the crate returns a tagged result from this
//! taxonomy; nothing panics across the public boundary and nothing is retried
//! internally. Failures always leave the caller's document unchanged.

use thiserror::Error;

/// Result type alias for edit-application operations.
pub type ApplyResult<T> = Result<T, ApplyError>;

/// The document representation an applier operates on.
///
/// Used in error reporting so "this operation isn't supported here" names the
/// variant it was attempted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentForm {
    /// Raw HTML edited through DOM mutation.
    Html,
    /// Position-indexed block array ("page plan").
    BlockList,
}

impl std::fmt::Display for DocumentForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentForm::Html => write!(f, "html"),
            DocumentForm::BlockList => write!(f, "block-list"),
        }
    }
}

/// Error types for applying an edit directive to a document.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Input text fundamentally unusable as markup (in practice: over the
    /// configured size ceiling; the underlying parser itself is lenient and
    /// recovers from arbitrary malformed markup).
    #[error("document is not parseable as markup: {0}")]
    Parse(String),

    /// Selector supplied but nothing matched, or no block index could be
    /// derived. Carries the attempted selector for debuggability.
    #[error("no element matches selector '{selector}'")]
    TargetNotFound { selector: String },

    /// Action label not supported by the active document form.
    #[error("action '{action}' is not supported for {form} documents")]
    UnsupportedAction { action: String, form: DocumentForm },

    /// Fragment did not contain exactly one root element. Covers empty,
    /// text-only, and multi-root fragments.
    #[error("fragment must contain exactly one root element, found {found}")]
    FragmentRoots { found: usize },

    /// Plumbing failure that should be unreachable in practice
    /// (e.g. serializer I/O into an in-memory buffer).
    #[error("internal failure: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Soft warnings attached to a successful edit application.
///
/// Warnings never abort the edit; they are surfaced so a UI can tell the user
/// the result is a degraded rendition of what the directive asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyWarning {
    /// Block-list form only: the fragment matched no known block type and was
    /// stored as a plain-text paragraph instead.
    #[error("fragment did not match a known block type; stored as plain text")]
    FragmentDegraded,
}

/// Errors from bulk-loading externally supplied history data.
///
/// Loads are rejected outright, never clamped: this path consumes untrusted
/// save files and the in-memory history must survive a bad one unchanged.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The supplied entry list was empty.
    #[error("history payload contains no entries")]
    Empty,

    /// The supplied current index does not address an entry.
    #[error("history index {index} out of bounds for {len} entries")]
    IndexOutOfBounds { index: usize, len: usize },
}
