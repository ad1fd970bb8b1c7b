//! Outline result records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title reported for documents that could not be processed.
pub const ERROR_TITLE: &str = "Error";

/// Heading level derived from font size rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels, largest font first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// One accepted heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and heading outline of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Document title
    pub title: String,
    /// Headings in encounter order
    pub outline: Vec<OutlineEntry>,
}

impl OutlineResult {
    /// Create a result from a title and entries.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// The record written for a document that failed to process.
    pub fn error() -> Self {
        Self::new(ERROR_TITLE, Vec::new())
    }

    /// Check if this is the failure record.
    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE && self.outline.is_empty()
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if no heading was accepted.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}
