//! Fragment sources: where a document's typed text spans come from.

use std::path::Path;

use super::backend::{LopdfBackend, PdfBackend};
use super::spans::SpanReader;
use crate::error::{Error, Result};

/// One run of text as rendered on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpan {
    /// Text as decoded, untrimmed
    pub text: String,
    /// Effective font size in points
    pub size: f32,
    /// Font name
    pub font: String,
}

impl RawSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
        }
    }
}

/// A document that yields text spans page by page.
///
/// Pages are 1-indexed. Spans come back in document-structural order; a
/// failing page fails the whole document.
pub trait FragmentSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Spans of one page.
    fn page_spans(&self, page: u32) -> Result<Vec<RawSpan>>;
}

/// [`FragmentSource`] reading PDF content streams.
pub struct PdfSource<B: PdfBackend = LopdfBackend> {
    backend: B,
}

impl PdfSource<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_file(path)?))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(LopdfBackend::load_bytes(data)?))
    }
}

impl<B: PdfBackend> PdfSource<B> {
    /// Wrap an already loaded backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: PdfBackend> FragmentSource for PdfSource<B> {
    fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    fn page_spans(&self, page: u32) -> Result<Vec<RawSpan>> {
        let page_id = self.backend.page_id(page)?;
        let fonts = self.backend.page_fonts(page_id)?;
        let ops = self.backend.page_operations(page_id)?;

        let spans = SpanReader::new(&self.backend, page_id, &fonts).read(&ops);
        log::debug!("page {}: {} ops, {} spans", page, ops.len(), spans.len());
        Ok(spans)
    }
}

/// [`FragmentSource`] over spans that are already materialized.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<RawSpan>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    pub fn with_page(mut self, spans: Vec<RawSpan>) -> Self {
        self.pages.push(spans);
        self
    }
}

impl From<Vec<Vec<RawSpan>>> for MemorySource {
    fn from(pages: Vec<Vec<RawSpan>>) -> Self {
        Self { pages }
    }
}

impl FragmentSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_spans(&self, page: u32) -> Result<Vec<RawSpan>> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}
