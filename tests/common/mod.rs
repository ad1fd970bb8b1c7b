//! Synthetic PDF fixtures.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, encryption, Document, Object, Stream};

/// A line of text on a fixture page.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub text: &'static str,
    pub size: i64,
    pub bold: bool,
}

/// Regular-weight line.
pub fn line(text: &'static str, size: i64) -> Line {
    Line {
        text,
        size,
        bold: false,
    }
}

/// Bold line.
pub fn bold(text: &'static str, size: i64) -> Line {
    Line {
        text,
        size,
        bold: true,
    }
}

/// Build a PDF with one content stream per page, each line in its own text object.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    save(build_document(pages))
}

/// Build a PDF encrypted with RC4-40 under an owner password only, so the
/// empty user password opens it.
pub fn build_encrypted_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = build_document(pages);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "O" => Object::string_literal(vec![0x5A; 32]),
        "P" => -44,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(b"pdfoutline-fixture-id".to_vec()),
            Object::string_literal(b"pdfoutline-fixture-id".to_vec()),
        ],
    );

    // RC4 is symmetric, so lopdf's object decryption also encrypts.
    let key = encryption::get_encryption_key(&doc, "", false).expect("encryption key");
    for (&id, object) in doc.objects.iter_mut() {
        if id == encrypt_id {
            continue;
        }
        let Ok(cipher) = encryption::decrypt_object(&key, id, object) else {
            continue;
        };
        match object {
            Object::Stream(stream) => stream.set_content(cipher),
            Object::String(content, _) => *content = cipher,
            _ => {}
        }
    }

    save(doc)
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut data = Vec::new();
    doc.save_to(&mut data).expect("serialize pdf");
    data
}

fn build_document(pages: &[Vec<Line>]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y: i64 = 760;
        for l in lines {
            let font = if l.bold { "F2" } else { "F1" };
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), l.size.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 30;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a fixture PDF to `path`.
pub fn write_pdf(path: &Path, pages: &[Vec<Line>]) {
    std::fs::write(path, build_pdf(pages)).expect("write pdf");
}

/// The two-page document from the outline scenario.
pub fn intro_background_pages() -> Vec<Vec<Line>> {
    vec![
        vec![bold("Intro", 18), line("This is body text.", 12)],
        vec![bold("Intro", 18), bold("Background", 14)],
    ]
}
