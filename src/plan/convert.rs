//! Fragment-to-block conversion.
//!
//! The block-list form cannot hold arbitrary markup, so an incoming fragment
//! is classified by its root tag into one of the known block types.
//! Unrecognized roots degrade to a plain-text paragraph rather than aborting
//! the edit; only fragments with no usable single root are a hard failure.

use std::sync::LazyLock;

use html_escape::encode_text;
use scraper::{ElementRef, Html, Selector};

use crate::document::sanitize;
use crate::error::{ApplyError, ApplyResult};

use super::BlockKind;

static LI_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("LI_SELECTOR: hardcoded selector is valid"));

/// A fragment mapped to a block, with a flag for the plain-text fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedBlock {
    pub kind: BlockKind,
    /// True when the fragment matched no known block type and was stored as
    /// escaped text.
    pub degraded: bool,
}

/// Convert an untrusted fragment into exactly one typed block.
///
/// Root-tag dispatch: `h1`–`h6` → heading, `p` → paragraph (inner markup
/// kept, sanitized), `img` → image, `ul`/`ol` → list; any other element and
/// bare text degrade to a paragraph holding the escaped text content.
pub fn block_from_fragment(fragment: &str, max_bytes: usize) -> ApplyResult<ConvertedBlock> {
    if fragment.len() > max_bytes {
        return Err(ApplyError::Parse(format!(
            "fragment is {} bytes, ceiling is {} bytes",
            fragment.len(),
            max_bytes
        )));
    }

    let parsed = Html::parse_fragment(&sanitize::scrub_markup(fragment));
    let root = parsed.root_element();

    let mut element_roots: Vec<ElementRef> = Vec::new();
    let mut text_roots: Vec<String> = Vec::new();
    for child in root.children() {
        if let Some(element) = ElementRef::wrap(child) {
            if !sanitize::is_disallowed_tag(element.value().name()) {
                element_roots.push(element);
            }
        } else if let Some(text) = child.value().as_text() {
            if !text.trim().is_empty() {
                text_roots.push(text.to_string());
            }
        }
    }

    match (element_roots.as_slice(), text_roots.as_slice()) {
        ([element], []) => Ok(convert_element(*element)),
        ([], [text]) => {
            log::debug!("fragment has a bare text root; degrading to plain text");
            Ok(ConvertedBlock {
                kind: BlockKind::Paragraph {
                    html: encode_text(text.trim()).into_owned(),
                },
                degraded: true,
            })
        }
        _ => Err(ApplyError::FragmentRoots {
            found: element_roots.len() + text_roots.len(),
        }),
    }
}

fn convert_element(element: ElementRef) -> ConvertedBlock {
    let tag = element.value().name();
    let kind = match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockKind::Heading {
            level: tag.as_bytes()[1] - b'0',
            text: text_content(element),
        },
        "p" => BlockKind::Paragraph {
            html: sanitize::sanitize_snippet(&element.inner_html()),
        },
        "img" => BlockKind::Image {
            src: element.value().attr("src").unwrap_or_default().to_string(),
            alt: element.value().attr("alt").unwrap_or_default().to_string(),
        },
        "ul" | "ol" => BlockKind::List {
            ordered: tag == "ol",
            items: element
                .select(&LI_SELECTOR)
                .map(text_content)
                .collect(),
        },
        other => {
            log::debug!("fragment root <{other}> matches no block type; degrading to plain text");
            return ConvertedBlock {
                kind: BlockKind::Paragraph {
                    html: encode_text(&text_content(element)).into_owned(),
                },
                degraded: true,
            };
        }
    };
    ConvertedBlock {
        kind,
        degraded: false,
    }
}

fn text_content(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
