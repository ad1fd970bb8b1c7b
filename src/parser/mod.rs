//! PDF reading: turns a document into pages of typed text spans.

mod backend;
mod source;
mod spans;

pub use backend::{
    decode_text_simple, ContentOp, FontTable, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use source::{FragmentSource, MemorySource, PdfSource, RawSpan};
pub use spans::SpanReader;
