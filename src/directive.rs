//! The edit-directive data contract.
//!
//! Directives are produced outside the engine, typically deserialized from a
//! generative model's JSON response, and consumed here as-is. The engine
//! validates structural well-formedness (known action label, single-root
//! fragment), never semantic quality.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of structural edit verbs.
///
/// Unknown labels are rejected at the deserialization boundary; in-process
/// callers cannot construct an unrecognized variant, and each applier matches
/// this enum exhaustively. Variants that a particular document form cannot
/// express (`wrap` on the block-list form) fail there with
/// `UnsupportedAction`, never silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAction {
    /// Substitute the target in place, discarding its children.
    Replace,
    /// Splice the fragment in as the target's immediate previous sibling.
    InsertBefore,
    /// Splice the fragment in as the target's immediate next sibling.
    InsertAfter,
    /// Insert the fragment at the target's position and move the target
    /// (with all descendants) inside it.
    Wrap,
    /// Append the fragment as the target's last child; for the block-list
    /// form this is the targetless push-to-end verb.
    #[serde(alias = "add_block")]
    Append,
}

impl EditAction {
    /// The wire label for this action.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EditAction::Replace => "replace",
            EditAction::InsertBefore => "insert_before",
            EditAction::InsertAfter => "insert_after",
            EditAction::Wrap => "wrap",
            EditAction::Append => "append",
        }
    }

    /// Parse a loose action label as received from a UI layer.
    ///
    /// Returns `None` for unrecognized labels so callers can surface a
    /// hard "unsupported action" failure rather than guessing.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "replace" => Some(EditAction::Replace),
            "insert_before" => Some(EditAction::InsertBefore),
            "insert_after" => Some(EditAction::InsertAfter),
            "wrap" => Some(EditAction::Wrap),
            "append" | "add_block" => Some(EditAction::Append),
            _ => None,
        }
    }
}

impl std::fmt::Display for EditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What a suggestion is about, as classified by the generative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Copy or structure changes.
    Content,
    /// Image placement.
    Image,
    /// Search-engine optimization.
    Seo,
    /// Conversion-rate optimization.
    Cro,
}

/// Suggestion priority, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// One proposed structural edit: a target, an action, and an HTML fragment,
/// plus display metadata carried through from the suggestion source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditDirective {
    /// Stable identity, generated when the source supplies none.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// CSS selector anchoring the edit. When absent, the tree-form applier
    /// falls back to heuristic resolution; the block-list form does not.
    #[serde(default, alias = "selector")]
    pub target: Option<String>,

    /// The edit verb.
    pub action: EditAction,

    /// The markup to apply. Treated as untrusted: every parse of this string
    /// goes through the sanitizing parse path.
    pub fragment: String,

    /// What the suggestion is about.
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SuggestionKind>,

    #[serde(default)]
    pub priority: Priority,

    /// Human-readable explanation from the suggestion source. Doubles as the
    /// description fed to heuristic target resolution when no selector is
    /// given.
    #[serde(default, alias = "message", skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl EditDirective {
    /// Build a directive with just the structural fields.
    #[must_use]
    pub fn new(target: Option<&str>, action: EditAction, fragment: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            target: target.map(str::to_owned),
            action,
            fragment: fragment.to_owned(),
            kind: None,
            priority: Priority::default(),
            rationale: None,
        }
    }

    /// Attach a rationale message.
    #[must_use]
    pub fn with_rationale(mut self, rationale: &str) -> Self {
        self.rationale = Some(rationale.to_owned());
        self
    }

    /// The rationale text, or empty when none was supplied.
    #[must_use]
    pub fn rationale_text(&self) -> &str {
        self.rationale.as_deref().unwrap_or_default()
    }

    /// Check structural well-formedness without applying anything: the
    /// fragment must sanitize and parse to a single root element.
    ///
    /// The action label is already guaranteed by the closed enum. Block-list
    /// consumers are more lenient than this check (unrecognized fragments
    /// degrade to plain text there), so a batch UI should treat a failure
    /// here as "needs review", not "discard".
    pub fn validate(&self, max_bytes: usize) -> crate::error::ApplyResult<()> {
        crate::document::parse_fragment(&self.fragment, max_bytes).map(|_| ())
    }
}

/// A batch of directives as returned by the generative suggestion source for
/// one full-document analysis request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionBatch {
    #[serde(default)]
    pub suggestions: Vec<EditDirective>,
}

impl SuggestionBatch {
    /// Deserialize a batch from the suggestion service's JSON response.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Suggestions ordered highest priority first, preserving the source
    /// order within each priority.
    #[must_use]
    pub fn by_priority(&self) -> Vec<&EditDirective> {
        let mut ordered: Vec<&EditDirective> = self.suggestions.iter().collect();
        ordered.sort_by_key(|d| d.priority);
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_labels_round_trip() {
        for action in [
            EditAction::Replace,
            EditAction::InsertBefore,
            EditAction::InsertAfter,
            EditAction::Wrap,
            EditAction::Append,
        ] {
            assert_eq!(EditAction::parse(action.label()), Some(action));
        }
    }

    #[test]
    fn add_block_is_an_append_alias() {
        assert_eq!(EditAction::parse("add_block"), Some(EditAction::Append));
        let directive: EditDirective = serde_json::from_str(
            r#"{"action": "add_block", "fragment": "<p>x</p>"}"#,
        )
        .expect("alias deserializes");
        assert_eq!(directive.action, EditAction::Append);
    }

    #[test]
    fn unknown_action_label_is_rejected() {
        assert_eq!(EditAction::parse("merge"), None);
        let result: Result<EditDirective, _> =
            serde_json::from_str(r#"{"action": "merge", "fragment": "<p>x</p>"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn batch_deserializes_service_response() {
        let json = r#"{
            "suggestions": [
                {
                    "type": "seo",
                    "priority": "high",
                    "message": "Add a meta description",
                    "selector": "head",
                    "action": "append",
                    "fragment": "<meta name=\"description\" content=\"x\">"
                },
                {
                    "kind": "content",
                    "action": "replace",
                    "target": "h1",
                    "fragment": "<h1>Better title</h1>"
                }
            ]
        }"#;
        let batch = SuggestionBatch::from_json(json).expect("batch parses");
        assert_eq!(batch.suggestions.len(), 2);
        assert_eq!(batch.suggestions[0].target.as_deref(), Some("head"));
        assert_eq!(
            batch.suggestions[0].rationale.as_deref(),
            Some("Add a meta description")
        );
        assert_eq!(batch.suggestions[1].priority, Priority::Medium);
    }

    #[test]
    fn validate_accepts_single_root_and_rejects_multi_root() {
        let good = EditDirective::new(Some("h1"), EditAction::Replace, "<p>fine</p>");
        assert!(good.validate(1024).is_ok());

        let bad = EditDirective::new(Some("h1"), EditAction::Replace, "<p>a</p><p>b</p>");
        assert!(bad.validate(1024).is_err());
    }

    #[test]
    fn by_priority_orders_high_first() {
        let mut batch = SuggestionBatch::default();
        let mut low = EditDirective::new(None, EditAction::Append, "<p>a</p>");
        low.priority = Priority::Low;
        let mut high = EditDirective::new(None, EditAction::Append, "<p>b</p>");
        high.priority = Priority::High;
        batch.suggestions = vec![low, high];

        let ordered = batch.by_priority();
        assert_eq!(ordered[0].priority, Priority::High);
        assert_eq!(ordered[1].priority, Priority::Low);
    }
}
