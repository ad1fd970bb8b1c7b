//! Heading classification and outline assembly.
//!
//! The pipeline for one document:
//!
//! 1. read spans page by page from a [`FragmentSource`],
//! 2. keep the heading-shaped ones ([`HeadingFilter`]) and tag their language,
//! 3. rank their distinct font sizes ([`FontLevelMap`]),
//! 4. [`assemble`] the deduplicated outline and pick the title.

mod assembler;
mod filter;
mod lang;
mod options;
mod ranker;

pub use assembler::assemble;
pub use filter::{is_heading_shaped, HeadingFilter, DEFAULT_MAX_HEADING_CHARS};
pub use lang::{LanguageTagger, NoopTagger, WhatlangTagger};
pub use options::OutlineOptions;
pub use ranker::FontLevelMap;

use crate::error::Result;
use crate::model::{OutlineResult, TextFragment};
use crate::parser::FragmentSource;

/// Runs the outline pipeline over fragment sources.
pub struct OutlineExtractor {
    filter: HeadingFilter,
    tagger: Box<dyn LanguageTagger>,
}

impl OutlineExtractor {
    /// Create an extractor from options.
    pub fn new(options: &OutlineOptions) -> Self {
        let tagger: Box<dyn LanguageTagger> = if options.detect_language {
            Box::new(WhatlangTagger)
        } else {
            Box::new(NoopTagger)
        };
        Self {
            filter: HeadingFilter::new(options.max_heading_chars),
            tagger,
        }
    }

    /// Replace the heading-shape filter.
    pub fn with_filter(mut self, filter: HeadingFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the language tagger.
    pub fn with_tagger(mut self, tagger: impl LanguageTagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Collect the heading-shaped fragments of a document in encounter order.
    pub fn collect_fragments<S>(&self, source: &S) -> Result<Vec<TextFragment>>
    where
        S: FragmentSource + ?Sized,
    {
        let mut fragments = Vec::new();

        for page in 1..=source.page_count() {
            for span in source.page_spans(page)? {
                let text = span.text.trim();
                if !self.filter.accepts(text) {
                    continue;
                }
                let language = self.tagger.detect(text).unwrap_or_default();
                fragments.push(
                    TextFragment::new(text, span.size, span.font, page).with_language(language),
                );
            }
        }

        Ok(fragments)
    }

    /// Extract the outline of a document.
    ///
    /// `fallback_title` is used when no heading is accepted. A failing page
    /// fails the whole document.
    pub fn extract_from_source<S>(&self, source: &S, fallback_title: &str) -> Result<OutlineResult>
    where
        S: FragmentSource + ?Sized,
    {
        let fragments = self.collect_fragments(source)?;
        let levels = FontLevelMap::build(&fragments);
        let result = assemble(&fragments, &levels, fallback_title);

        log::debug!(
            "{} heading candidates, {} font levels, {} outline entries",
            fragments.len(),
            levels.len(),
            result.len()
        );

        Ok(result)
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new(&OutlineOptions::default())
    }
}
