//! # pdfoutline
//!
//! Infer a document outline from PDF typography.
//!
//! PDFs often ship without bookmarks. This library recovers a title and a
//! three-level heading outline from how the text looks: short spans without
//! a terminal period are heading candidates, and the three largest distinct
//! font sizes among them become H1, H2 and H3.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_outline("report.pdf");
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Total entry point**: [`extract_outline`] never fails; unreadable
//!   documents produce the `{"title": "Error", "outline": []}` record
//! - **Pluggable input**: anything implementing [`FragmentSource`]
//! - **Language tags**: best-effort per fragment, never affects the outline
//! - **Batch mode**: [`batch::BatchDriver`] turns a directory of PDFs into
//!   one JSON file each, in parallel with Rayon

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchDriver, BatchOptions, BatchReport, DocumentReport, DocumentStatus};
pub use error::{Error, Result};
pub use model::{FontSize, HeadingLevel, OutlineEntry, OutlineResult, TextFragment};
pub use outline::{
    assemble, is_heading_shaped, FontLevelMap, HeadingFilter, LanguageTagger, NoopTagger,
    OutlineExtractor, OutlineOptions, WhatlangTagger,
};
pub use parser::{FragmentSource, MemorySource, PdfSource, RawSpan};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// Never fails: when the document can't be read, the failure is logged and
/// [`OutlineResult::error`] is returned.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline;
///
/// let result = extract_outline("thesis.pdf");
/// for entry in &result.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> OutlineResult {
    Outliner::new().extract(path)
}

/// Extract the outline of a PDF file, returning read errors.
pub fn try_extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    Outliner::new().try_extract(path)
}

/// Extract the outline of a PDF held in memory.
///
/// `name` plays the role of the file name: its stem is the title when no
/// heading is found.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_from_bytes;
///
/// let data = std::fs::read("manual.pdf")?;
/// let result = extract_outline_from_bytes(&data, "manual.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub fn extract_outline_from_bytes(data: &[u8], name: &str) -> Result<OutlineResult> {
    Outliner::new().try_extract_bytes(data, name)
}

/// Title used when a document has no accepted heading: the file name without
/// its extension.
pub fn fallback_title<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Builder for extracting outlines from PDF files.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::Outliner;
///
/// let result = Outliner::new()
///     .max_heading_chars(80)
///     .without_language_detection()
///     .try_extract("slides.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub struct Outliner {
    extractor: OutlineExtractor,
}

impl Outliner {
    /// Create an outliner with default options.
    pub fn new() -> Self {
        Self {
            extractor: OutlineExtractor::default(),
        }
    }

    /// Create an outliner from options.
    pub fn with_options(options: &OutlineOptions) -> Self {
        Self {
            extractor: OutlineExtractor::new(options),
        }
    }

    /// Set the heading length limit in characters.
    pub fn max_heading_chars(mut self, max_chars: usize) -> Self {
        self.extractor = self.extractor.with_filter(HeadingFilter::new(max_chars));
        self
    }

    /// Skip language tagging.
    pub fn without_language_detection(self) -> Self {
        self.with_tagger(NoopTagger)
    }

    /// Use a custom language tagger.
    pub fn with_tagger(mut self, tagger: impl LanguageTagger + 'static) -> Self {
        self.extractor = self.extractor.with_tagger(tagger);
        self
    }

    /// Extract the outline of a file, substituting the error record on failure.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> OutlineResult {
        let path = path.as_ref();
        match self.try_extract(path) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Failed to process {}: {}", path.display(), e);
                OutlineResult::error()
            }
        }
    }

    /// Extract the outline of a file.
    pub fn try_extract<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        let path = path.as_ref();
        let source = PdfSource::open(path)?;
        self.extractor
            .extract_from_source(&source, &fallback_title(path))
    }

    /// Extract the outline of an in-memory PDF.
    pub fn try_extract_bytes(&self, data: &[u8], name: &str) -> Result<OutlineResult> {
        let source = PdfSource::from_bytes(data)?;
        self.extractor
            .extract_from_source(&source, &fallback_title(name))
    }

    /// Extract the outline of any fragment source.
    pub fn extract_source<S>(&self, source: &S, fallback_title: &str) -> Result<OutlineResult>
    where
        S: FragmentSource + ?Sized,
    {
        self.extractor.extract_from_source(source, fallback_title)
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}
