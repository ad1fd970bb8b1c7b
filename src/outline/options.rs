//! Outline extraction options.

use super::filter::DEFAULT_MAX_HEADING_CHARS;

/// Options for extracting an outline from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Heading candidates must be shorter than this many characters
    pub max_heading_chars: usize,

    /// Whether to tag fragments with a detected language
    pub detect_language: bool,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading length limit.
    pub fn with_max_heading_chars(mut self, max_chars: usize) -> Self {
        self.max_heading_chars = max_chars;
        self
    }

    /// Enable or disable language tagging.
    pub fn with_language_detection(mut self, detect: bool) -> Self {
        self.detect_language = detect;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_heading_chars: DEFAULT_MAX_HEADING_CHARS,
            detect_language: true,
        }
    }
}
