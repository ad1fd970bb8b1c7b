//! Outline assembly.

use std::collections::HashSet;

use super::ranker::FontLevelMap;
use crate::model::{OutlineEntry, OutlineResult, TextFragment};

/// Build the outline of one document.
///
/// `fragments` must already be heading-shaped and in encounter order.
/// Fragments whose size has no level are skipped, and only the first
/// occurrence of each `(text, page)` pair is kept. The title is the first
/// entry's text, or `fallback_title` when nothing was accepted.
pub fn assemble(
    fragments: &[TextFragment],
    levels: &FontLevelMap,
    fallback_title: &str,
) -> OutlineResult {
    let mut seen: HashSet<(&str, u32)> = HashSet::new();
    let mut outline = Vec::new();

    for fragment in fragments {
        let Some(level) = levels.level_for(fragment.font_size) else {
            continue;
        };
        if !seen.insert((fragment.text.as_str(), fragment.page)) {
            continue;
        }
        outline.push(OutlineEntry::new(level, fragment.text.clone(), fragment.page));
    }

    let title = outline
        .first()
        .map(|entry| entry.text.clone())
        .unwrap_or_else(|| fallback_title.to_string());

    OutlineResult { title, outline }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    fn fragment(text: &str, size: f32, page: u32) -> TextFragment {
        TextFragment::new(text, size, "Helvetica", page)
    }

    fn run(fragments: &[TextFragment]) -> OutlineResult {
        assemble(fragments, &FontLevelMap::build(fragments), "fallback")
    }

    #[test]
    fn test_same_text_on_two_pages() {
        let fragments = vec![
            fragment("Intro", 18.0, 1),
            fragment("Intro", 18.0, 2),
            fragment("Background", 14.0, 2),
        ];
        let result = run(&fragments);

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
    fn test_duplicate_on_same_page_collapses() {
        let fragments = vec![
            fragment("Running Header", 10.0, 3),
            fragment("Running Header", 10.0, 3),
        ];
        assert_eq!(run(&fragments).len(), 1);
    }

    #[test]
    fn test_first_occurrence_wins_across_sizes() {
        let fragments = vec![fragment("Scope", 14.0, 1), fragment("Scope", 20.0, 1)];
        let result = run(&fragments);

        assert_eq!(result.outline, vec![OutlineEntry::new(HeadingLevel::H2, "Scope", 1)]);
    }

    #[test]
    fn test_fallback_title_without_headings() {
        let result = assemble(&[], &FontLevelMap::default(), "annual-report");
        assert_eq!(result.title, "annual-report");
        assert!(result.is_empty());
    }

    #[test]
    fn test_unranked_sizes_are_dropped() {
        let fragments = vec![
            fragment("Part", 30.0, 1),
            fragment("Chapter", 24.0, 1),
            fragment("Section", 18.0, 1),
            fragment("Subsection", 14.0, 1),
        ];
        let result = run(&fragments);

        assert_eq!(result.len(), 3);
        assert!(result.outline.iter().all(|e| e.text != "Subsection"));
    }

    #[test]
    fn test_title_is_first_entry_not_largest() {
        let fragments = vec![fragment("Abstract", 12.0, 1), fragment("Big Banner", 28.0, 1)];
        let result = run(&fragments);

        assert_eq!(result.title, "Abstract");
        assert_eq!(result.outline[0].level, HeadingLevel::H2);
    }

    #[test]
    fn test_assembly_is_repeatable() {
        let fragments = vec![
            fragment("One", 16.0, 1),
            fragment("Two", 12.0, 2),
            fragment("One", 16.0, 1),
        ];
        assert_eq!(run(&fragments), run(&fragments));
    }
}
