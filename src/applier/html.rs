//! Tree-form edit application over raw HTML.
//!
//! Resolution rules: a present selector must match (heuristics never recover
//! a bad selector); an absent selector falls back to heuristic resolution.
//! The one exception is `insert_before` targeting the body-start sentinel,
//! which always resolves to the real first child of body, or to body itself
//! when body is empty.
//!
//! Application is atomic: the engine parses its own copy of the input, so a
//! failure at any step leaves the caller's document byte-identical.

use kuchiki::NodeRef;

use crate::config::EditorConfig;
use crate::directive::{EditAction, EditDirective};
use crate::document::{BODY_START_SELECTOR, HtmlDocument, parse_fragment};
use crate::error::ApplyResult;

use super::{Applied, edit_label};

/// How the target node was resolved, and what the resolution means for the
/// insert position.
enum Anchor {
    /// A concrete node in the tree.
    Node(NodeRef),
    /// The body-start sentinel resolved against an empty body: there is no
    /// first child to insert before, so the fragment becomes body's first
    /// child instead.
    EmptyBody(NodeRef),
}

/// Apply one directive to a serialized HTML document.
pub fn apply_to_document(
    html: &str,
    directive: &EditDirective,
    config: &EditorConfig,
) -> ApplyResult<Applied<String>> {
    tracing::debug!(
        action = %directive.action,
        selector = directive.target.as_deref().unwrap_or("<heuristic>"),
        directive_id = %directive.id,
        "applying edit to html document"
    );

    let doc = HtmlDocument::parse_with_limit(html, config.max_document_bytes)?;
    let anchor = resolve_anchor(&doc, directive)?;
    let fragment = parse_fragment(&directive.fragment, config.max_document_bytes)?;

    match (&anchor, directive.action) {
        (Anchor::Node(target), EditAction::Replace) => {
            target.insert_before(fragment);
            target.detach();
        }
        (Anchor::Node(target), EditAction::InsertBefore) => {
            target.insert_before(fragment);
        }
        (Anchor::EmptyBody(body), EditAction::InsertBefore) => {
            body.append(fragment);
        }
        (Anchor::Node(target), EditAction::InsertAfter) => {
            target.insert_after(fragment);
        }
        (Anchor::Node(target), EditAction::Wrap) => {
            // The wrapper takes the target's place, then adopts the target
            // with all of its descendants intact.
            target.insert_before(fragment.clone());
            fragment.append(target.clone());
        }
        (Anchor::Node(target), EditAction::Append) => {
            target.append(fragment);
        }
        // EmptyBody only arises for insert_before on the sentinel.
        (Anchor::EmptyBody(body), _) => {
            body.append(fragment);
        }
    }

    Ok(Applied {
        document: doc.serialize()?,
        label: edit_label(directive),
        warning: None,
    })
}

fn resolve_anchor(doc: &HtmlDocument, directive: &EditDirective) -> ApplyResult<Anchor> {
    match directive.target.as_deref() {
        Some(BODY_START_SELECTOR) if directive.action == EditAction::InsertBefore => {
            let body = doc.body();
            let first = body.children().find(|child| child.as_element().is_some());
            Ok(match first {
                Some(node) => Anchor::Node(node),
                None => Anchor::EmptyBody(body),
            })
        }
        Some(selector) => Ok(Anchor::Node(doc.select_first(selector)?)),
        None => Ok(Anchor::Node(doc.resolve_heuristic(directive.rationale_text()))),
    }
}
