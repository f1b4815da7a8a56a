//! The sanitizing parse path as a security boundary: fragments come from an
//! external generator and must never carry executable capability into the
//! document.

use pagewright::{
    ApplyError, BlockKind, EditAction, EditDirective, EditorConfig, PageBlock, apply_to_document,
    apply_to_plan, render_plan,
};

fn config() -> EditorConfig {
    EditorConfig::default()
}

#[test]
fn script_fragment_cannot_enter_the_document() {
    let directive = EditDirective::new(
        Some("h1"),
        EditAction::InsertAfter,
        "<script>document.cookie</script>",
    );
    // Everything executable is stripped, leaving no insertable root.
    let err = apply_to_document("<body><h1>T</h1></body>", &directive, &config())
        .expect_err("nothing left to insert");
    assert!(matches!(err, ApplyError::FragmentRoots { found: 0 }));
}

#[test]
fn event_handlers_are_stripped_from_fragments() {
    let directive = EditDirective::new(
        Some("h1"),
        EditAction::InsertAfter,
        r#"<img src="x.png" onerror="fetch('/steal')">"#,
    );
    let applied =
        apply_to_document("<body><h1>T</h1></body>", &directive, &config()).expect("applies");
    assert!(!applied.document.contains("onerror"));
    assert!(!applied.document.contains("steal"));
    assert!(applied.document.contains(r#"<img src="x.png">"#));
}

#[test]
fn nested_script_inside_fragment_is_removed() {
    let directive = EditDirective::new(
        Some("h1"),
        EditAction::InsertAfter,
        "<div><p>fine</p><script>bad()</script></div>",
    );
    let applied =
        apply_to_document("<body><h1>T</h1></body>", &directive, &config()).expect("applies");
    assert!(!applied.document.contains("bad()"));
    assert!(applied.document.contains("<p>fine</p>"));
}

#[test]
fn javascript_urls_are_neutralized() {
    let directive = EditDirective::new(
        Some("h1"),
        EditAction::InsertAfter,
        r#"<a href="javascript:alert(1)">click</a>"#,
    );
    let applied =
        apply_to_document("<body><h1>T</h1></body>", &directive, &config()).expect("applies");
    assert!(!applied.document.to_lowercase().contains("javascript:"));
    assert!(applied.document.contains("click"));
}

#[test]
fn document_parse_path_sanitizes_too() {
    // Not just fragments: a loaded document runs through the same path.
    let directive = EditDirective::new(Some("h1"), EditAction::Replace, "<h1>New</h1>");
    let applied = apply_to_document(
        "<body onload=\"boom()\"><h1>Old</h1><iframe src=\"evil\"></iframe></body>",
        &directive,
        &config(),
    )
    .expect("applies");
    assert!(!applied.document.contains("onload"));
    assert!(!applied.document.contains("iframe"));
}

#[test]
fn block_conversion_sanitizes_paragraph_markup() {
    let blocks = vec![PageBlock::new(BlockKind::Heading {
        level: 1,
        text: "T".to_string(),
    })];
    let directive = EditDirective::new(
        None,
        EditAction::Append,
        r#"<p>hello<script>bad()</script><em onclick="x()">world</em></p>"#,
    );
    let applied = apply_to_plan(&blocks, &directive, &config()).expect("applies");
    match &applied.document[1].kind {
        BlockKind::Paragraph { html } => {
            assert!(!html.contains("script"));
            assert!(!html.contains("onclick"));
            assert!(html.contains("hello"));
            assert!(html.contains("<em>world</em>"));
        }
        other => panic!("unexpected kind: {other:?}"),
    }

    // And the rendered plan stays clean.
    let rendered = render_plan(&applied.document);
    assert!(!rendered.contains("script"));
    assert!(!rendered.contains("onclick"));
}

#[test]
fn style_and_head_metadata_are_not_collateral_damage() {
    let directive = EditDirective::new(Some("h1"), EditAction::Replace, "<h1>N</h1>");
    let applied = apply_to_document(
        "<html><head><title>Keep</title><style>.x{}</style>\
         <meta name=\"description\" content=\"d\"></head>\
         <body><h1>O</h1></body></html>",
        &directive,
        &config(),
    )
    .expect("applies");
    assert!(applied.document.contains("<title>Keep</title>"));
    assert!(applied.document.contains("<style>.x{}</style>"));
    assert!(applied.document.contains("name=\"description\""));
}
