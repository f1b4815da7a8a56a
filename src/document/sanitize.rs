//! Markup sanitation for untrusted input.
//!
//! Fragments arrive from an external generative service, so every parse path
//! (full documents and fragments alike) runs through the same two stages:
//! a string-level regex pass that removes script bodies and inline event
//! handlers, then a DOM-level pass that detaches disallowed elements and
//! strips unsafe attributes the regexes could not reliably reach.
//!
//! Head-level metadata (title, meta tags, style blocks) is deliberately left
//! alone: only executable capability is removed, not presentation.

use std::borrow::Cow;
use std::sync::LazyLock;

use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use regex::Regex;

// Compiled once at first use; these are hardcoded patterns that will never
// fail to compile.

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>")
        .expect("SCRIPT_RE: hardcoded regex is valid")
});

static EVENT_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\son[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("EVENT_ATTR_RE: hardcoded regex is valid")
});

static JS_URL_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s(href|src)\s*=\s*("\s*javascript:[^"]*"|'\s*javascript:[^']*')"#)
        .expect("JS_URL_ATTR_RE: hardcoded regex is valid")
});

/// Elements removed wholesale on every parse. Executable or embedding
/// capability only; styling and forms are legitimate page content here.
const DISALLOWED_SELECTORS: &[&str] = &["script", "iframe", "object", "embed", "base"];

/// String-level stage: remove script bodies, inline event handlers, and
/// `javascript:` URLs before the markup ever reaches a parser.
#[must_use]
pub fn scrub_markup(html: &str) -> String {
    let result = Cow::Borrowed(html);
    let result = SCRIPT_RE.replace_all(&result, "");
    let result = EVENT_ATTR_RE.replace_all(&result, "");
    let result = JS_URL_ATTR_RE.replace_all(&result, "");
    result.into_owned()
}

/// DOM-level stage: detach disallowed elements and strip unsafe attributes
/// from an already-parsed tree.
///
/// Runs after `scrub_markup` on the parsed result, catching markup the
/// string stage could not match (unquoted attributes, malformed nesting
/// repaired by the parser, entity-obfuscated tags).
pub(crate) fn strip_disallowed_nodes(root: &NodeRef) {
    for selector in DISALLOWED_SELECTORS {
        // Collect before detaching; detach during iteration would invalidate
        // the traversal.
        let matches: Vec<_> = match root.select(selector) {
            Ok(iter) => iter.collect(),
            Err(()) => {
                log::warn!("failed to compile sanitizer selector '{selector}'");
                continue;
            }
        };
        for element in matches {
            log::debug!("sanitizer removed <{}> element", element.name.local);
            element.as_node().detach();
        }
    }
    strip_unsafe_attributes(root);
}

/// Run both sanitation stages over a markup snippet and return its body
/// inner HTML.
///
/// Used where a sanitized *string* is needed rather than a parsed tree, e.g.
/// the inner markup stored inside a paragraph block.
#[must_use]
pub fn sanitize_snippet(html: &str) -> String {
    let document = kuchiki::parse_html().one(scrub_markup(html));
    strip_disallowed_nodes(&document);

    let container = match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        Err(()) => document,
    };

    let mut out = Vec::new();
    for child in container.children() {
        if child.serialize(&mut out).is_err() {
            log::warn!("failed to serialize sanitized snippet node; dropping it");
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Whether a tag name is removed wholesale by the sanitizer.
#[must_use]
pub fn is_disallowed_tag(tag: &str) -> bool {
    DISALLOWED_SELECTORS.contains(&tag)
}

/// Remove `on*` event attributes and `javascript:` href/src values from every
/// element in the tree.
fn strip_unsafe_attributes(root: &NodeRef) {
    let elements: Vec<_> = match root.select("*") {
        Ok(iter) => iter.collect(),
        Err(()) => return,
    };

    for element in elements {
        let mut attrs = element.attributes.borrow_mut();
        let unsafe_names: Vec<_> = attrs
            .map
            .iter()
            .filter(|(name, attr)| {
                let local: &str = &name.local;
                if local.len() > 2 && local.to_ascii_lowercase().starts_with("on") {
                    return true;
                }
                matches!(local, "href" | "src")
                    && attr
                        .value
                        .trim_start()
                        .to_ascii_lowercase()
                        .starts_with("javascript:")
            })
            .map(|(name, _)| name.clone())
            .collect();

        for name in unsafe_names {
            log::debug!("sanitizer stripped attribute '{}'", name.local);
            attrs.map.remove(&name);
        }
    }
}
