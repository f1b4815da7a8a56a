//! pagewright: the suggestion-application engine behind an AI-assisted HTML
//! page editor.
//!
//! The engine takes a semi-structured edit directive (a CSS-selector target,
//! an action verb, and an HTML fragment) and applies it deterministically to
//! a document, returning a new document state or a typed failure. Two
//! document forms are supported behind one capability trait:
//!
//! - **Tree form**: raw HTML edited through DOM mutation
//!   ([`applier::apply_to_document`]).
//! - **Block-list form**: a position-indexed array of typed blocks, the
//!   "page plan" ([`applier::apply_to_plan`]).
//!
//! Every mutation is atomic (failures leave the input untouched), every
//! fragment passes through a sanitizing parse path (fragments originate from
//! an untrusted generative service), and committed states live in a bounded
//! undo/redo [`History`] with branch-discard semantics.
//!
//! ```
//! use pagewright::{
//!     apply_to_document, EditAction, EditDirective, EditorConfig, History,
//! };
//!
//! let config = EditorConfig::default();
//! let mut history = History::new(config.document_history_limit);
//! let document = "<body><h1>Title</h1></body>".to_string();
//! history.push(document.clone(), "Initial", None);
//!
//! let directive = EditDirective::new(Some("h1"), EditAction::InsertAfter, "<p>New</p>");
//! let applied = apply_to_document(&document, &directive, &config).unwrap();
//! assert!(applied.document.contains("<h1>Title</h1><p>New</p>"));
//!
//! history.push(applied.document, applied.label, Some(directive.id));
//! assert!(history.can_undo());
//! ```

pub mod applier;
pub mod config;
pub mod directive;
pub mod document;
pub mod error;
pub mod history;
pub mod plan;
pub mod project;

pub use applier::{
    Applied, HtmlApplier, PlanApplier, SuggestionApplier, apply_to_document, apply_to_plan,
};
pub use config::{
    DEFAULT_DOCUMENT_HISTORY_LIMIT, DEFAULT_PLAN_HISTORY_LIMIT, EditorConfig, MAX_DOCUMENT_BYTES,
};
pub use directive::{EditAction, EditDirective, Priority, SuggestionBatch, SuggestionKind};
pub use document::{BODY_START_SELECTOR, HtmlDocument, parse_fragment, scrub_markup};
pub use error::{ApplyError, ApplyResult, ApplyWarning, DocumentForm, HistoryError};
pub use history::{History, HistoryEntry};
pub use plan::{
    BlockKind, ConvertedBlock, PageBlock, PagePlan, block_from_fragment, render_plan,
    render_plan_page,
};
pub use project::ProjectSnapshot;
