//! Shared helpers for integration tests: minimal PDF files built with
//! lopdf, so the scanner exercises the same parser the application uses.

use std::fs;
use std::path::Path;

use lopdf::{dictionary, Document, Object, Stream};

/// Write a minimal but valid PDF with the given Info fields and page count.
pub fn write_pdf(path: &Path, title: Option<&str>, author: Option<&str>, pages: usize) {
    let mut doc = build_doc(title, author, pages);
    doc.save(path).expect("failed to write test PDF");
}

/// Write a PDF whose trailer carries an Encrypt dictionary, the way a
/// password-protected file does. The document itself parses fine.
pub fn write_encrypted_pdf(path: &Path, pages: usize) {
    let mut doc = build_doc(Some("Secret"), Some("Nobody"), pages);
    let encrypt_id = doc.add_object(Object::Dictionary(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal("0123456789abcdef0123456789abcdef"),
        "U" => Object::string_literal("0123456789abcdef0123456789abcdef"),
        "P" => -44,
    }));
    doc.trailer.set("Encrypt", encrypt_id);
    doc.save(path).expect("failed to write test PDF");
}

fn build_doc(title: Option<&str>, author: Option<&str>, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for _ in 0..pages.max(1) {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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

    let mut info = lopdf::Dictionary::new();
    if let Some(title) = title {
        info.set("Title", Object::string_literal(title));
    }
    if let Some(author) = author {
        info.set("Author", Object::string_literal(author));
    }
    if !info.is_empty() {
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", info_id);
    }

    doc
}

/// Write a file with a `.pdf` name that no PDF parser will accept.
pub fn write_garbage_pdf(path: &Path) {
    fs::write(path, b"definitely not a portable document").unwrap();
}
