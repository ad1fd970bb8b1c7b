//! Font size ranking.
//!
//! The distinct font sizes of a document's heading candidates are ranked
//! largest first and the top three become H1, H2 and H3. Sizes below the
//! third rank get no level at all.

use std::collections::BTreeSet;

use crate::model::{FontSize, HeadingLevel, TextFragment};

/// Mapping from font size to heading level for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontLevelMap {
    // Strictly descending by size, at most one entry per level.
    entries: Vec<(FontSize, HeadingLevel)>,
}

impl FontLevelMap {
    /// Rank the distinct sizes of `fragments`.
    pub fn build(fragments: &[TextFragment]) -> Self {
        Self::from_sizes(fragments.iter().map(|f| f.font_size))
    }

    /// Rank a collection of sizes; duplicates and order don't matter.
    pub fn from_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = FontSize>,
    {
        let distinct: BTreeSet<FontSize> = sizes.into_iter().collect();
        let entries = distinct
            .into_iter()
            .rev()
            .zip(HeadingLevel::ALL)
            .collect::<Vec<_>>();

        log::debug!(
            "font levels: {}",
            entries
                .iter()
                .map(|(size, level)| format!("{}={}", level, size))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self { entries }
    }

    /// Heading level for a size, `None` when the size isn't ranked.
    pub fn level_for(&self, size: FontSize) -> Option<HeadingLevel> {
        self.entries
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, level)| *level)
    }

    /// Iterate entries, largest size first.
    pub fn iter(&self) -> impl Iterator<Item = (FontSize, HeadingLevel)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of ranked sizes (0-3).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no size is ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
