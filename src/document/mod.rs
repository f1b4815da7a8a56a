//! Document model adapter for the tree (raw HTML) form.
//!
//! Wraps a parsed HTML tree with the four operations the edit engine needs:
//! lenient parse, full-document serialization, first-match selector
//! resolution, and heuristic fallback resolution. Parsing is as forgiving as
//! real-world HTML demands: malformed markup is repaired, never rejected;
//! the only hard parse failure is input above the configured byte ceiling.

pub mod heuristic;
pub mod sanitize;

use anyhow::Context;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use crate::config::MAX_DOCUMENT_BYTES;
use crate::error::{ApplyError, ApplyResult};

pub use sanitize::scrub_markup;

/// Synthetic selector for "the first child of body".
///
/// An `insert_before` directive targeting this selector always resolves to
/// the real first element child of body, or to body itself when body is
/// empty, in which case the insert degrades to placing the node as body's
/// first child. This is the one case where a present-but-unmatched selector
/// does not fail.
pub const BODY_START_SELECTOR: &str = "body > :first-child";

/// A mutable HTML document.
///
/// Holds the full parsed tree including doctype and head, so titles, meta
/// tags, and style blocks survive a parse/serialize round trip. The tree is
/// reference-counted and single-threaded by design; each edit application
/// parses its own copy and never shares nodes across calls.
pub struct HtmlDocument {
    root: NodeRef,
}

impl HtmlDocument {
    /// Parse a document leniently, with the default size ceiling.
    pub fn parse(text: &str) -> ApplyResult<Self> {
        Self::parse_with_limit(text, MAX_DOCUMENT_BYTES)
    }

    /// Parse a document leniently, rejecting input above `max_bytes`.
    ///
    /// Input passes through the sanitizing parse path: executable content is
    /// stripped both before parsing (string stage) and after (DOM stage).
    pub fn parse_with_limit(text: &str, max_bytes: usize) -> ApplyResult<Self> {
        if text.len() > max_bytes {
            return Err(ApplyError::Parse(format!(
                "input is {} bytes, ceiling is {} bytes",
                text.len(),
                max_bytes
            )));
        }
        let root = kuchiki::parse_html().one(sanitize::scrub_markup(text));
        sanitize::strip_disallowed_nodes(&root);
        Ok(Self { root })
    }

    /// The document root node.
    #[must_use]
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// The body element, or the document root if the tree somehow has none
    /// (the parser inserts a body for any input, so the fallback is
    /// defensive only for synthetic trees).
    #[must_use]
    pub fn body(&self) -> NodeRef {
        self.root
            .select_first("body")
            .map(|body| body.as_node().clone())
            .unwrap_or_else(|()| self.root.clone())
    }

    /// Serialize the full document, doctype and head included.
    pub fn serialize(&self) -> ApplyResult<String> {
        let mut out = Vec::new();
        self.root
            .serialize(&mut out)
            .context("serializing document tree")?;
        let html = String::from_utf8(out).context("document serialized to invalid UTF-8")?;
        Ok(html)
    }

    /// Resolve a CSS selector to the first matching node in document order.
    ///
    /// An invalid selector and a selector that matches nothing both resolve
    /// to `TargetNotFound` carrying the attempted selector.
    pub fn select_first(&self, selector: &str) -> ApplyResult<NodeRef> {
        self.root
            .select_first(selector)
            .map(|found| found.as_node().clone())
            .map_err(|()| ApplyError::TargetNotFound {
                selector: selector.to_owned(),
            })
    }

    /// Best-effort target resolution from a textual description.
    ///
    /// Always produces a usable insertion point; see [`heuristic`].
    #[must_use]
    pub fn resolve_heuristic(&self, description: &str) -> NodeRef {
        heuristic::resolve(self, description)
    }
}

/// Parse an untrusted fragment into its single root element.
///
/// The fragment goes through the same sanitizing parse path as full
/// documents. Exactly one element root is required: empty, text-only, and
/// multi-root fragments fail with `FragmentRoots` carrying the number of
/// root constructs found. The returned node is detached and ready to be
/// inserted into any document tree.
pub fn parse_fragment(fragment: &str, max_bytes: usize) -> ApplyResult<NodeRef> {
    if fragment.len() > max_bytes {
        return Err(ApplyError::Parse(format!(
            "fragment is {} bytes, ceiling is {} bytes",
            fragment.len(),
            max_bytes
        )));
    }
    let parsed = kuchiki::parse_html().one(sanitize::scrub_markup(fragment));
    sanitize::strip_disallowed_nodes(&parsed);

    let container = parsed
        .select_first("body")
        .map(|body| body.as_node().clone())
        .unwrap_or(parsed);

    let mut element_roots = Vec::new();
    let mut text_roots = 0usize;
    for child in container.children() {
        if child.as_element().is_some() {
            element_roots.push(child);
        } else if let Some(text) = child.as_text() {
            if !text.borrow().trim().is_empty() {
                text_roots += 1;
            }
        }
    }

    if element_roots.len() == 1 && text_roots == 0 {
        let node = element_roots.remove(0);
        node.detach();
        Ok(node)
    } else {
        Err(ApplyError::FragmentRoots {
            found: element_roots.len() + text_roots,
        })
    }
}
