//! Round-trip properties for both document forms.

use proptest::prelude::*;

use pagewright::{
    BlockKind, EditAction, EditDirective, EditorConfig, HtmlDocument, PageBlock,
    apply_to_plan, render_plan,
};

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{1,24}"
}

fn block_strategy() -> impl Strategy<Value = PageBlock> {
    prop_oneof![
        (1u8..=6, text_strategy()).prop_map(|(level, text)| PageBlock::new(BlockKind::Heading {
            level,
            text
        })),
        text_strategy().prop_map(|html| PageBlock::new(BlockKind::Paragraph { html })),
        "[a-z0-9/._-]{1,20}".prop_map(|src| PageBlock::new(BlockKind::Image {
            src,
            alt: String::new()
        })),
        (any::<bool>(), proptest::collection::vec(text_strategy(), 1..4)).prop_map(
            |(ordered, items)| PageBlock::new(BlockKind::List { ordered, items })
        ),
    ]
}

fn plan_strategy() -> impl Strategy<Value = Vec<PageBlock>> {
    proptest::collection::vec(block_strategy(), 1..8)
}

proptest! {
    /// Serialization is stable: one parse/serialize pass normalizes the
    /// markup and further passes are the identity.
    #[test]
    fn document_roundtrip_is_stable(plan in plan_strategy()) {
        let html = render_plan(&plan);
        let once = HtmlDocument::parse(&html)
            .expect("parses")
            .serialize()
            .expect("serializes");
        let twice = HtmlDocument::parse(&once)
            .expect("reparses")
            .serialize()
            .expect("reserializes");
        prop_assert_eq!(once, twice);
    }

    /// Every rendered block is addressable by its index marker, and the
    /// marker always equals the array offset.
    #[test]
    fn rendered_markers_match_offsets(plan in plan_strategy()) {
        let config = EditorConfig::default();
        for index in 0..plan.len() {
            let selector = format!("[data-block-index=\"{index}\"]");
            let directive = EditDirective::new(
                Some(&selector),
                EditAction::Replace,
                "<p>probe</p>",
            );
            let applied = apply_to_plan(&plan, &directive, &config).expect("resolves");
            // Only the addressed block changed.
            prop_assert_eq!(applied.document.len(), plan.len());
            for (i, (before, after)) in plan.iter().zip(applied.document.iter()).enumerate() {
                if i == index {
                    prop_assert_eq!(after.id, before.id);
                    prop_assert_eq!(
                        &after.kind,
                        &BlockKind::Paragraph { html: "probe".to_string() }
                    );
                } else {
                    prop_assert_eq!(before, after);
                }
            }
        }
    }

    /// A failed apply never changes the input plan.
    #[test]
    fn failed_apply_is_atomic(plan in plan_strategy()) {
        let config = EditorConfig::default();
        let before = plan.clone();
        let directive = EditDirective::new(
            Some("video"),
            EditAction::Replace,
            "<p>never lands</p>",
        );
        prop_assert!(apply_to_plan(&plan, &directive, &config).is_err());
        prop_assert_eq!(plan, before);
    }

    /// Plan JSON round-trips losslessly.
    #[test]
    fn plan_json_roundtrip(plan in plan_strategy()) {
        let json = serde_json::to_string(&plan).expect("serializes");
        let back: Vec<PageBlock> = serde_json::from_str(&json).expect("deserializes");
        prop_assert_eq!(back, plan);
    }
}
