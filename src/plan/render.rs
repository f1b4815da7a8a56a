//! Deterministic HTML rendering for page plans.
//!
//! Every rendered block carries a `data-block-index` attribute equal to its
//! array offset. The preview frame reports clicks through that marker, and
//! the block-list applier's render-and-reselect target resolution depends on
//! it, so the attribute is part of the contract, not decoration.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{BlockKind, PageBlock};

/// The index-marker attribute emitted on every rendered block.
pub const BLOCK_INDEX_ATTR: &str = "data-block-index";

/// The identity attribute emitted on every rendered block.
pub const BLOCK_ID_ATTR: &str = "data-block-id";

/// Render a plan to a body fragment, one block per line.
#[must_use]
pub fn render_plan(blocks: &[PageBlock]) -> String {
    let mut out = String::new();
    for (index, block) in blocks.iter().enumerate() {
        render_block(&mut out, block, index);
        out.push('\n');
    }
    out
}

/// Render a plan as a complete standalone document.
#[must_use]
pub fn render_plan_page(blocks: &[PageBlock], title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        encode_text(title),
        render_plan(blocks)
    )
}

fn render_block(out: &mut String, block: &PageBlock, index: usize) {
    let marker = format!(
        " {BLOCK_INDEX_ATTR}=\"{index}\" {BLOCK_ID_ATTR}=\"{}\"",
        block.id
    );
    match &block.kind {
        BlockKind::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            out.push_str(&format!(
                "<h{level}{marker}>{}</h{level}>",
                encode_text(text)
            ));
        }
        BlockKind::Paragraph { html } => {
            // Inner markup was sanitized when the block was built.
            out.push_str(&format!("<p{marker}>{html}</p>"));
        }
        BlockKind::Image { src, alt } => {
            out.push_str(&format!(
                "<img{marker} src=\"{}\" alt=\"{}\">",
                encode_double_quoted_attribute(src),
                encode_double_quoted_attribute(alt)
            ));
        }
        BlockKind::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}{marker}>"));
            for item in items {
                out.push_str(&format!("<li>{}</li>", encode_text(item)));
            }
            out.push_str(&format!("</{tag}>"));
        }
    }
}
