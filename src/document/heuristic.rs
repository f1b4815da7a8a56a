//! Heuristic target resolution.
//!
//! Used only when a directive carries no selector at all. The rules are
//! checked in priority order and the fallthrough is the document body, so
//! resolution always produces a usable insertion point; "not found" is not
//! an outcome here.

use kuchiki::NodeRef;

use super::HtmlDocument;

/// Resolve a textual description to a node.
///
/// Priority order:
/// 1. mentions a title or heading: first `h1`, when one exists
/// 2. mentions the first image: first `img`, when one exists
/// 3. mentions "last": last element child of body, or body when empty
/// 4. anything else: body
pub(crate) fn resolve(doc: &HtmlDocument, description: &str) -> NodeRef {
    let desc = description.to_lowercase();

    if desc.contains("title") || desc.contains("heading") || desc.contains("h1") {
        if let Ok(h1) = doc.select_first("h1") {
            log::debug!("heuristic resolved description to first h1");
            return h1;
        }
    }

    if desc.contains("first") && desc.contains("image") {
        if let Ok(img) = doc.select_first("img") {
            log::debug!("heuristic resolved description to first img");
            return img;
        }
    }

    let body = doc.body();

    if desc.contains("last") {
        if let Some(last) = last_element_child(&body) {
            log::debug!("heuristic resolved description to last element in body");
            return last;
        }
    }

    log::debug!("heuristic fell through to document body");
    body
}

fn last_element_child(node: &NodeRef) -> Option<NodeRef> {
    node.children()
        .filter(|child| child.as_element().is_some())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> HtmlDocument {
        HtmlDocument::parse(html).expect("test document parses")
    }

    fn tag_of(node: &NodeRef) -> String {
        node.as_element()
            .map(|el| el.name.local.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn title_description_finds_first_h1() {
        let d = doc("<p>intro</p><h1>One</h1><h1>Two</h1>");
        let node = resolve(&d, "Improve the page title");
        assert_eq!(tag_of(&node), "h1");
        assert_eq!(node.text_contents(), "One");
    }

    #[test]
    fn first_image_description_finds_img() {
        let d = doc("<p>text</p><img src=\"a.png\"><img src=\"b.png\">");
        let node = resolve(&d, "replace the first image");
        assert_eq!(tag_of(&node), "img");
        assert_eq!(
            node.as_element()
                .expect("img element")
                .attributes
                .borrow()
                .get("src"),
            Some("a.png")
        );
    }

    #[test]
    fn last_description_finds_last_body_element() {
        let d = doc("<h1>t</h1><p>one</p><p>two</p>");
        let node = resolve(&d, "append after the last section");
        assert_eq!(node.text_contents(), "two");
    }

    #[test]
    fn last_on_empty_body_falls_back_to_body() {
        let d = doc("");
        let node = resolve(&d, "the last element");
        assert_eq!(tag_of(&node), "body");
    }

    #[test]
    fn unrecognized_description_falls_back_to_body() {
        let d = doc("<p>x</p>");
        let node = resolve(&d, "make it pop");
        assert_eq!(tag_of(&node), "body");
    }

    #[test]
    fn title_rule_without_h1_cascades_to_body() {
        let d = doc("<p>no headings here</p>");
        let node = resolve(&d, "the title");
        assert_eq!(tag_of(&node), "body");
    }
}
