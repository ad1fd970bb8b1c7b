//! PDF backend abstraction layer.
//!
//! The span reader only talks to [`PdfBackend`], so the concrete PDF library
//! (lopdf) stays behind this module.

use std::collections::HashMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::detect;
use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Font resource name (e.g. `F1`) to base font name (e.g. `Helvetica-Bold`).
pub type FontTable = HashMap<Vec<u8>, String>;

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `index`.
    pub fn number(&self, index: usize) -> Option<f32> {
        self.operands.get(index).and_then(PdfValue::as_number)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Resolve a 1-indexed page number.
    fn page_id(&self, page: u32) -> Result<PageId>;

    /// Fonts available to a page.
    fn page_fonts(&self, page: PageId) -> Result<FontTable>;

    /// Decoded content stream operations of a page, in stream order.
    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>>;

    /// Decode a string operand with the encoding of `font` on `page`.
    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String;
}

/// Decode string bytes when no font encoding is available.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    pages: Vec<PageId>,
}

impl LopdfBackend {
    /// Load from a file path, rejecting files without a PDF header.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let header = detect::sniff_file(path)?;
        log::debug!("{}: {}", path.display(), header);
        Self::from_document(LopdfDocument::load(path)?)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        detect::sniff_bytes(data)?;
        Self::from_document(LopdfDocument::load_mem(data)?)
    }

    /// Wrap a loaded document.
    ///
    /// Encrypted documents are opened with the empty user password, which
    /// covers files protected by an owner password only.
    pub fn from_document(mut doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                log::debug!("empty user password rejected: {}", e);
                Error::Encrypted
            })?;
        }
        // BTreeMap iteration yields ascending page numbers.
        let pages = doc.get_pages().into_values().collect();
        Ok(Self { doc, pages })
    }

    fn content_bytes(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page)?;

        // A page without /Contents is blank.
        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(s.decompressed_content()?),
                _ => Err(Error::PdfParse(format!(
                    "Contents of page object {} is not a stream",
                    page.0
                ))),
            },
            Object::Array(parts) => {
                let mut content = Vec::new();
                for part in parts {
                    let stream = part
                        .as_reference()
                        .and_then(|r| self.doc.get_object(r))
                        .and_then(Object::as_stream)?;
                    content.extend_from_slice(&stream.decompressed_content()?);
                    content.push(b'\n');
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_id(&self, page: u32) -> Result<PageId> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn page_fonts(&self, page: PageId) -> Result<FontTable> {
        let fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(fonts
            .into_iter()
            .map(|(name, dict)| {
                let base_font = dict
                    .get(b"BaseFont")
                    .and_then(Object::as_name)
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&name).to_string());
                (name, base_font)
            })
            .collect())
    }

    fn page_operations(&self, page: PageId) -> Result<Vec<ContentOp>> {
        let data = self.content_bytes(page)?;
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::TextExtract(format!("page object {}: {}", page.0, e)))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operands: op.operands.iter().map(convert_object).collect(),
                operator: op.operator,
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(dict) = fonts.get(font) {
                if let Ok(encoding) = dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }
}

fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple("Überblick".as_bytes()), "Überblick");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        assert_eq!(decode_text_simple(&[0x52, 0xE9, 0x73, 0x75, 0x6D, 0xE9]), "Résumé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_operand_numbers() {
        let op = ContentOp::new(
            "Tf",
            vec![PdfValue::Name(b"F1".to_vec()), PdfValue::Real(10.5)],
        );
        assert_eq!(op.number(0), None);
        assert_eq!(op.number(1), Some(10.5));
        assert_eq!(PdfValue::Integer(24).as_number(), Some(24.0));
    }

    #[test]
    fn test_unsupported_encryption_is_rejected() {
        let mut doc = LopdfDocument::with_version("1.6");
        let encrypt_id = doc.add_object(dictionary! {
            "Filter" => "Standard",
            "V" => 4,
            "R" => 4,
            "Length" => 128,
            "O" => Object::string_literal(vec![0u8; 32]),
            "P" => -4,
        });
        doc.trailer.set("Encrypt", encrypt_id);

        assert!(matches!(
            LopdfBackend::from_document(doc),
            Err(Error::Encrypted)
        ));
    }

    #[test]
    fn test_load_bytes_rejects_non_pdf() {
        assert!(matches!(
            LopdfBackend::load_bytes(b"plain text, not a document"),
            Err(Error::UnknownFormat)
        ));
    }
}
