//! Best-effort language tagging.
//!
//! A tagger returns `None` when it cannot tell; the pipeline records an empty
//! language then. Tags are informational and never change the outline.

/// Guesses the language of a short text.
pub trait LanguageTagger: Send + Sync {
    /// Language code, or `None` when detection failed.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Tagger backed by `whatlang`, reporting ISO 639-3 codes (e.g. `eng`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangTagger;

impl LanguageTagger for WhatlangTagger {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| info.lang().code().to_string())
    }
}

/// Tagger that never detects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTagger;

impl LanguageTagger for NoopTagger {
    fn detect(&self, _text: &str) -> Option<String> {
        None
    }
}
