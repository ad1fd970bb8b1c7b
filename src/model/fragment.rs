//! Text fragments with font metadata.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A rendered font size in points.
///
/// Equality, ordering and hashing use the exact value, so two sizes are the
/// same level only when the PDF reports identical sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSize(pub f32);

impl FontSize {
    /// Get the size in points.
    pub fn points(self) -> f32 {
        self.0
    }
}

impl PartialEq for FontSize {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FontSize {}

impl PartialOrd for FontSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FontSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for FontSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f32> for FontSize {
    fn from(size: f32) -> Self {
        Self(size)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// One heading candidate taken from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Trimmed text content
    pub text: String,
    /// Rendered font size
    pub font_size: FontSize,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font name marks a bold weight
    pub is_bold: bool,
    /// Best-effort language code, empty when unknown
    pub language: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl TextFragment {
    /// Create a fragment with an unknown language.
    pub fn new(
        text: impl Into<String>,
        font_size: impl Into<FontSize>,
        font_name: impl Into<String>,
        page: u32,
    ) -> Self {
        let font_name = font_name.into();
        Self {
            text: text.into(),
            font_size: font_size.into(),
            is_bold: is_bold_font(&font_name),
            font_name,
            language: String::new(),
            page,
        }
    }

    /// Attach a language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Check whether a font name carries a bold weight marker.
///
/// Matches `bold`, `black` and `heavy` in any case, so lowercase subset names
/// and heavier weights count as bold.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    lower.contains("bold") || lower.contains("black") || lower.contains("heavy")
}
