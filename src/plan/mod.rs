//! The block-list ("page plan") document representation.
//!
//! A page plan is an ordered array of typed blocks; a block's position in the
//! array is its only address; there is no explicit ordering field, and the
//! rendered form tags every block with its array index so clicks and selector
//! hits can be traced back to a block.

pub mod convert;
pub mod render;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use convert::{ConvertedBlock, block_from_fragment};
pub use render::{render_plan, render_plan_page};

/// The typed content a block carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// A heading; `level` is clamped to 1..=6 at render time.
    Heading { level: u8, text: String },
    /// A paragraph carrying sanitized inner markup.
    Paragraph { html: String },
    /// An image reference.
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
    /// A flat list of plain-text items.
    List {
        #[serde(default)]
        ordered: bool,
        items: Vec<String>,
    },
}

/// One block in a page plan: a stable identity plus its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBlock {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl PageBlock {
    /// Build a block with a fresh identity.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
        }
    }
}

/// An ordered block array; index equals position, no gaps.
pub type PagePlan = Vec<PageBlock>;
