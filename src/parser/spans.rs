//! Text span reading from PDF content streams.
//!
//! Walks the text operators of one page and emits a [`RawSpan`] per run of
//! text shown on the same line with the same font and effective size. The
//! effective size is the `Tf` size scaled by the text matrix and the current
//! transformation matrix.

use super::backend::{ContentOp, FontTable, PageId, PdfBackend, PdfValue};
use super::source::RawSpan;

/// Kerning adjustment (in 1/1000 text space units) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Font size assumed before the first `Tf`.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Reads spans from the decoded operations of a single page.
pub struct SpanReader<'a, B: PdfBackend> {
    backend: &'a B,
    page: PageId,
    fonts: &'a FontTable,
}

impl<'a, B: PdfBackend> SpanReader<'a, B> {
    /// Create a reader for `page` with its font table.
    pub fn new(backend: &'a B, page: PageId, fonts: &'a FontTable) -> Self {
        Self {
            backend,
            page,
            fonts,
        }
    }

    /// Collect spans in content-stream order.
    pub fn read(&self, ops: &[ContentOp]) -> Vec<RawSpan> {
        let mut state = TextState::default();
        let mut saved_ctm: Vec<Matrix> = Vec::new();
        let mut runs = RunBuilder::default();

        for op in ops {
            match op.operator.as_str() {
                "q" => saved_ctm.push(state.ctm),
                "Q" => {
                    if let Some(ctm) = saved_ctm.pop() {
                        state.ctm = ctm;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_operands(op) {
                        state.ctm = m.multiply(&state.ctm);
                    }
                }
                "BT" => {
                    state.in_text = true;
                    state.matrix = Matrix::default();
                    runs.break_line();
                }
                "ET" => {
                    state.in_text = false;
                    runs.break_line();
                }
                "Tf" => {
                    if let Some(PdfValue::Name(resource)) = op.operands.first() {
                        state.font_name = match self.fonts.get(resource) {
                            Some(name) => name.clone(),
                            None => {
                                let name = String::from_utf8_lossy(resource).to_string();
                                log::warn!(
                                    "page object {}: font /{} not in resources",
                                    self.page.0,
                                    name
                                );
                                name
                            }
                        };
                        state.font_resource = resource.clone();
                    }
                    state.font_size = op.number(1).unwrap_or(DEFAULT_FONT_SIZE);
                }
                "TL" => state.leading = op.number(0).unwrap_or(0.0),
                "Td" | "TD" => {
                    let (tx, ty) = (op.number(0).unwrap_or(0.0), op.number(1).unwrap_or(0.0));
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.matrix.translate(tx, ty);
                    if ty != 0.0 {
                        runs.break_line();
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(op) {
                        if !m.same_baseline(&state.matrix) {
                            runs.break_line();
                        }
                        state.matrix = m;
                    }
                }
                "T*" => {
                    state.matrix.translate(0.0, -state.leading);
                    runs.break_line();
                }
                "Tj" => {
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        self.show(&state, self.decode(&state, bytes), &mut runs);
                    }
                }
                "TJ" => {
                    if let Some(PdfValue::Array(items)) = op.operands.first() {
                        self.show(&state, self.decode_array(&state, items), &mut runs);
                    }
                }
                "'" | "\"" => {
                    state.matrix.translate(0.0, -state.leading);
                    runs.break_line();
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                        self.show(&state, self.decode(&state, bytes), &mut runs);
                    }
                }
                _ => {}
            }
        }

        runs.finish()
    }

    fn show(&self, state: &TextState, text: String, runs: &mut RunBuilder) {
        if !state.in_text {
            return;
        }
        let scale = state.matrix.multiply(&state.ctm).vertical_scale();
        runs.append(text, state.font_size * scale, &state.font_name);
    }

    fn decode(&self, state: &TextState, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page, &state.font_resource, bytes)
    }

    /// Join the strings of a `TJ` array, turning wide negative kerning into spaces.
    fn decode_array(&self, state: &TextState, items: &[PdfValue]) -> String {
        let mut combined = String::new();

        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(state, bytes)),
                other => {
                    let Some(adjustment) = other.as_number() else {
                        continue;
                    };
                    if -adjustment > TJ_SPACE_THRESHOLD && needs_word_space(&combined) {
                        combined.push(' ');
                    }
                }
            }
        }

        combined
    }
}

/// Accumulates shown strings into same-line, same-style runs.
#[derive(Debug, Default)]
struct RunBuilder {
    open: Option<RawSpan>,
    spans: Vec<RawSpan>,
}

impl RunBuilder {
    fn append(&mut self, text: String, size: f32, font: &str) {
        if let Some(open) = &mut self.open {
            if open.font == font && open.size == size {
                open.text.push_str(&text);
                return;
            }
        }
        self.break_line();
        self.open = Some(RawSpan::new(text, size, font));
    }

    /// Close the open run; whitespace-only runs are dropped.
    fn break_line(&mut self) {
        if let Some(span) = self.open.take() {
            if !span.text.trim().is_empty() {
                self.spans.push(span);
            }
        }
    }

    fn finish(mut self) -> Vec<RawSpan> {
        self.break_line();
        self.spans
    }
}

#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
    matrix: Matrix,
    ctm: Matrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: DEFAULT_FONT_SIZE,
            leading: 0.0,
            matrix: Matrix::default(),
            ctm: Matrix::default(),
        }
    }
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    /// Read six numeric operands (`cm`, `Tm`).
    fn from_operands(op: &ContentOp) -> Option<Self> {
        if op.operands.len() < 6 {
            return None;
        }
        Some(Self {
            a: op.number(0)?,
            b: op.number(1)?,
            c: op.number(2)?,
            d: op.number(3)?,
            e: op.number(4)?,
            f: op.number(5)?,
        })
    }

    /// `self × other`: apply `self` first, then `other`.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    /// Whether text placed by `other` continues the baseline of `self`.
    fn same_baseline(&self, other: &Matrix) -> bool {
        self.b == other.b && self.d == other.d && self.f == other.f
    }

    /// Length of the transformed y axis.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

fn needs_word_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Check if a character belongs to a script written without word spaces.
///
/// Chinese and Japanese don't separate words; Hangul is left out on purpose
/// since Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF       // CJK Unified Ideographs
        | 0x3400..=0x4DBF     // Extension A
        | 0x20000..=0x2EBEF   // Extensions B-F
        | 0x3040..=0x309F     // Hiragana
        | 0x30A0..=0x30FF     // Katakana
        | 0x3000..=0x303F     // CJK Symbols and Punctuation
    )
}
