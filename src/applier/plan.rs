//! Block-list edit application over page plans.
//!
//! The plan is an array, not a tree, so target resolution works by rendering
//! the plan (every block tagged with its array index), running the selector
//! over the rendered HTML, and mapping the first hit back to a block index
//! through the nearest index marker. Heuristic fallback deliberately does not
//! apply here: guessing a block in an index-addressed array would silently
//! edit the wrong content, so a selector that derives no index fails.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::config::EditorConfig;
use crate::directive::{EditAction, EditDirective};
use crate::error::{ApplyError, ApplyResult, ApplyWarning, DocumentForm};
use crate::plan::render::BLOCK_INDEX_ATTR;
use crate::plan::{PageBlock, PagePlan, block_from_fragment, render_plan};

use super::{Applied, edit_label};

static ANY_MARKED: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[data-block-index]").expect("ANY_MARKED: hardcoded selector is valid")
});

/// Apply one directive to a page plan, returning the new block array.
pub fn apply_to_plan(
    blocks: &PagePlan,
    directive: &EditDirective,
    config: &EditorConfig,
) -> ApplyResult<Applied<PagePlan>> {
    tracing::debug!(
        action = %directive.action,
        selector = directive.target.as_deref().unwrap_or("<none>"),
        directive_id = %directive.id,
        blocks = blocks.len(),
        "applying edit to page plan"
    );

    let convert = || {
        let converted = block_from_fragment(&directive.fragment, config.max_document_bytes)?;
        let warning = converted.degraded.then_some(ApplyWarning::FragmentDegraded);
        Ok::<_, ApplyError>((converted.kind, warning))
    };

    let mut next: PagePlan = blocks.clone();
    let warning = match directive.action {
        // Nesting is not representable in a flat block array; failing beats
        // silently degrading to a replace.
        EditAction::Wrap => {
            return Err(ApplyError::UnsupportedAction {
                action: directive.action.label().to_string(),
                form: DocumentForm::BlockList,
            });
        }
        EditAction::Append => {
            let (kind, warning) = convert()?;
            next.push(PageBlock::new(kind));
            warning
        }
        EditAction::Replace => {
            let index = resolve_block_index(blocks, directive)?;
            let (kind, warning) = convert()?;
            // The block keeps its identity; only its content changes.
            next[index] = PageBlock {
                id: blocks[index].id,
                kind,
            };
            warning
        }
        EditAction::InsertBefore => {
            let index = resolve_block_index(blocks, directive)?;
            let (kind, warning) = convert()?;
            next.insert(index, PageBlock::new(kind));
            warning
        }
        EditAction::InsertAfter => {
            let index = resolve_block_index(blocks, directive)?;
            let (kind, warning) = convert()?;
            next.insert(index + 1, PageBlock::new(kind));
            warning
        }
    };

    Ok(Applied {
        document: next,
        label: edit_label(directive),
        warning,
    })
}

/// Render-and-reselect: map a selector hit back to a block index.
fn resolve_block_index(blocks: &PagePlan, directive: &EditDirective) -> ApplyResult<usize> {
    let selector_str = directive
        .target
        .as_deref()
        .ok_or_else(|| ApplyError::TargetNotFound {
            selector: "<no selector>".to_string(),
        })?;

    let not_found = || ApplyError::TargetNotFound {
        selector: selector_str.to_string(),
    };

    let selector = Selector::parse(selector_str).map_err(|_| not_found())?;
    let rendered = render_plan(blocks);
    let parsed = Html::parse_fragment(&rendered);

    let matched = parsed.select(&selector).next().ok_or_else(not_found)?;
    let index = nearest_block_index(matched).ok_or_else(not_found)?;
    if index >= blocks.len() {
        return Err(not_found());
    }
    Ok(index)
}

/// The index marker on the element itself or its nearest marked ancestor.
fn nearest_block_index(element: ElementRef) -> Option<usize> {
    if let Some(value) = element.value().attr(BLOCK_INDEX_ATTR) {
        return value.parse().ok();
    }
    for ancestor in element.ancestors() {
        if let Some(el) = ElementRef::wrap(ancestor) {
            if let Some(value) = el.value().attr(BLOCK_INDEX_ATTR) {
                return value.parse().ok();
            }
        }
    }
    None
}

/// All block indices visible to a selector, in document order. Exposed for
/// preview surfaces that highlight every match before the user picks one.
#[must_use]
pub fn marked_indices(blocks: &PagePlan) -> Vec<usize> {
    let rendered = render_plan(blocks);
    let parsed = Html::parse_fragment(&rendered);
    parsed
        .select(&ANY_MARKED)
        .filter_map(|el| el.value().attr(BLOCK_INDEX_ATTR))
        .filter_map(|v| v.parse().ok())
        .collect()
}
