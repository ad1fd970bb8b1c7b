//! Integration tests for heading classification and outline assembly.

use pdfoutline::{
    FontLevelMap, FontSize, HeadingLevel, MemorySource, OutlineEntry, OutlineResult, Outliner,
    RawSpan,
};

fn outline_of(source: &MemorySource) -> OutlineResult {
    Outliner::new()
        .without_language_detection()
        .extract_source(source, "fallback")
        .unwrap()
}

#[test]
fn test_intro_background_scenario() {
    let source = MemorySource::new()
        .with_page(vec![
            RawSpan::new("Intro", 18.0, "Helvetica-Bold"),
            RawSpan::new("This is body text.", 12.0, "Helvetica"),
        ])
        .with_page(vec![
            RawSpan::new("Intro", 18.0, "Helvetica-Bold"),
            RawSpan::new("Background", 14.0, "Helvetica-Bold"),
        ]);

    let result = outline_of(&source);

    assert_eq!(result.title, "Intro");
    assert_eq!(
        result.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Intro", 1),
            OutlineEntry::new(HeadingLevel::H1, "Intro", 2),
            OutlineEntry::new(HeadingLevel::H2, "Background", 2),
        ]
    );
}

#[test]
fn test_more_than_three_sizes_drops_the_smallest() {
    let source = MemorySource::new().with_page(vec![
        RawSpan::new("Book", 32.0, "Serif"),
        RawSpan::new("Part One", 26.0, "Serif"),
        RawSpan::new("Chapter 1", 20.0, "Serif"),
        RawSpan::new("1.1 Origins", 16.0, "Serif"),
        RawSpan::new("Footnote marker", 8.0, "Serif"),
    ]);

    let result = outline_of(&source);

    let levels: Vec<_> = result.outline.iter().map(|e| (e.level, e.text.as_str())).collect();
    assert_eq!(
        levels,
        vec![
            (HeadingLevel::H1, "Book"),
            (HeadingLevel::H2, "Part One"),
            (HeadingLevel::H3, "Chapter 1"),
        ]
    );
}

#[test]
fn test_no_headings_uses_fallback_title() {
    let source = MemorySource::new().with_page(vec![
        RawSpan::new("Only full sentences here.", 11.0, "Serif"),
        RawSpan::new("   ", 24.0, "Serif"),
        RawSpan::new(&"x".repeat(140), 24.0, "Serif"),
    ]);

    let result = outline_of(&source);

    assert_eq!(result.title, "fallback");
    assert!(result.outline.is_empty());
}

#[test]
fn test_empty_document() {
    let result = outline_of(&MemorySource::new());
    assert_eq!(result, OutlineResult::new("fallback", vec![]));
}

#[test]
fn test_outline_pages_are_non_decreasing() {
    let source = MemorySource::new()
        .with_page(vec![RawSpan::new("A", 14.0, "Sans")])
        .with_page(vec![])
        .with_page(vec![
            RawSpan::new("C", 12.0, "Sans"),
            RawSpan::new("B", 14.0, "Sans"),
        ])
        .with_page(vec![RawSpan::new("D", 10.0, "Sans")]);

    let result = outline_of(&source);
    let pages: Vec<u32> = result.outline.iter().map(|e| e.page).collect();
    let texts: Vec<&str> = result.outline.iter().map(|e| e.text.as_str()).collect();

    assert_eq!(pages, vec![1, 3, 3, 4]);
    assert_eq!(texts, vec!["A", "C", "B", "D"]);
}

#[test]
fn test_same_pair_with_different_fonts_keeps_first() {
    let source = MemorySource::new().with_page(vec![
        RawSpan::new("Summary", 12.0, "Sans"),
        RawSpan::new("Summary", 18.0, "Sans-Bold"),
        RawSpan::new("Details", 18.0, "Sans-Bold"),
    ]);

    let result = outline_of(&source);

    assert_eq!(
        result.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H2, "Summary", 1),
            OutlineEntry::new(HeadingLevel::H1, "Details", 1),
        ]
    );
}

#[test]
fn test_repeated_extraction_is_identical() {
    let source = MemorySource::new()
        .with_page(vec![
            RawSpan::new("Header", 9.0, "Sans"),
            RawSpan::new("Header", 9.0, "Sans"),
            RawSpan::new("Topic", 15.0, "Sans"),
        ])
        .with_page(vec![RawSpan::new("Header", 9.0, "Sans")]);

    let first = outline_of(&source);
    let second = outline_of(&source);

    assert_eq!(first, second);
    let h2 = first
        .outline
        .iter()
        .filter(|e| e.level == HeadingLevel::H2)
        .count();
    assert_eq!(h2, 2);
}

#[test]
fn test_level_map_ignores_span_order() {
    let sizes = [11.0, 18.0, 11.0, 14.0, 22.0, 9.0];
    let forward = FontLevelMap::from_sizes(sizes.iter().copied().map(FontSize));
    let backward = FontLevelMap::from_sizes(sizes.iter().rev().copied().map(FontSize));

    assert_eq!(forward, backward);
    assert!(forward.len() <= 3);
    let ranked: Vec<f32> = forward.iter().map(|(size, _)| size.points()).collect();
    assert_eq!(ranked, vec![22.0, 18.0, 14.0]);
}

#[test]
fn test_non_ascii_headings() {
    let source = MemorySource::new().with_page(vec![
        RawSpan::new("はじめに", 20.0, "MS-Gothic"),
        RawSpan::new("Résumé", 14.0, "Arial"),
    ]);

    let result = outline_of(&source);

    assert_eq!(result.title, "はじめに");
    let json = pdfoutline::render::to_json(&result, pdfoutline::JsonFormat::Pretty).unwrap();
    assert!(json.contains("\"title\": \"はじめに\""));
    assert!(json.contains("Résumé"));
}
