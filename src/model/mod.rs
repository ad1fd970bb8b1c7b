//! Data model for outline extraction.
//!
//! [`TextFragment`] is what the page reader hands to the heading classifier;
//! [`OutlineResult`] is what gets persisted per document.

mod fragment;
mod outline;

pub use fragment::{is_bold_font, FontSize, TextFragment};
pub use outline::{HeadingLevel, OutlineEntry, OutlineResult, ERROR_TITLE};
