//! Heading-shape filter.

/// Texts this long (in characters) or longer are treated as body prose.
pub const DEFAULT_MAX_HEADING_CHARS: usize = 100;

/// Check whether a trimmed text looks like a heading.
///
/// Empty text, text of 100 characters or more, and text ending in a period
/// are rejected.
pub fn is_heading_shaped(text: &str) -> bool {
    HeadingFilter::default().accepts(text)
}

/// Heading-shape filter with a configurable length limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingFilter {
    /// Exclusive upper bound on the character count
    pub max_chars: usize,
}

impl HeadingFilter {
    /// Create a filter with the given length limit.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Check whether `text` passes the filter.
    pub fn accepts(&self, text: &str) -> bool {
        !text.trim().is_empty() && text.chars().count() < self.max_chars && !text.ends_with('.')
    }
}

impl Default for HeadingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEADING_CHARS)
    }
}
