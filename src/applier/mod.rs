//! Edit application: the state-transition engine.
//!
//! An applier is a pure function from (document, directive) to a new document
//! or a typed failure. It never retains document references across calls and
//! never mutates its input; the caller decides whether to commit the result
//! into history. The two document forms implement a common capability trait
//! so callers select a variant per editing mode instead of branching on type
//! throughout.

pub mod html;
pub mod plan;

pub use html::apply_to_document;
pub use plan::apply_to_plan;

use crate::config::EditorConfig;
use crate::directive::{EditAction, EditDirective};
use crate::error::{ApplyResult, ApplyWarning, DocumentForm};
use crate::plan::PagePlan;

/// A successfully applied edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    /// The new document state.
    pub document: T,
    /// Human-readable description of what was done, suitable as a history
    /// entry label.
    pub label: String,
    /// Soft warning when the edit applied in a degraded form.
    pub warning: Option<ApplyWarning>,
}

/// Capability interface over a document representation.
pub trait SuggestionApplier {
    /// The document type this applier transforms.
    type Document: Clone;

    /// Which representation this applier operates on.
    fn form(&self) -> DocumentForm;

    /// Apply one directive, producing a new document or a typed failure.
    /// The input document is never modified.
    fn apply(
        &self,
        document: &Self::Document,
        directive: &EditDirective,
    ) -> ApplyResult<Applied<Self::Document>>;
}

/// Tree-form applier over serialized HTML documents.
#[derive(Debug, Clone, Default)]
pub struct HtmlApplier {
    config: EditorConfig,
}

impl HtmlApplier {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }
}

impl SuggestionApplier for HtmlApplier {
    type Document = String;

    fn form(&self) -> DocumentForm {
        DocumentForm::Html
    }

    fn apply(&self, document: &String, directive: &EditDirective) -> ApplyResult<Applied<String>> {
        apply_to_document(document, directive, &self.config)
    }
}

/// Block-list applier over page plans.
#[derive(Debug, Clone, Default)]
pub struct PlanApplier {
    config: EditorConfig,
}

impl PlanApplier {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }
}

impl SuggestionApplier for PlanApplier {
    type Document = PagePlan;

    fn form(&self) -> DocumentForm {
        DocumentForm::BlockList
    }

    fn apply(
        &self,
        document: &PagePlan,
        directive: &EditDirective,
    ) -> ApplyResult<Applied<PagePlan>> {
        apply_to_plan(document, directive, &self.config)
    }
}

pub(crate) fn edit_label(directive: &EditDirective) -> String {
    match (directive.action, directive.target.as_deref()) {
        (EditAction::Replace, Some(t)) => format!("Replace {t}"),
        (EditAction::Replace, None) => "Replace suggested target".to_string(),
        (EditAction::InsertBefore, Some(t)) => format!("Insert before {t}"),
        (EditAction::InsertAfter, Some(t)) => format!("Insert after {t}"),
        (EditAction::InsertBefore | EditAction::InsertAfter, None) => "Insert content".to_string(),
        (EditAction::Wrap, Some(t)) => format!("Wrap {t}"),
        (EditAction::Wrap, None) => "Wrap suggested target".to_string(),
        (EditAction::Append, Some(t)) => format!("Append to {t}"),
        (EditAction::Append, None) => "Add content".to_string(),
    }
}
