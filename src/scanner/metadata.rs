//! PDF metadata extraction via lopdf.
//!
//! Reads the document Info dictionary (Title, Author) and counts pages from
//! the page tree. Extraction never panics and never propagates an error to
//! the scan: anything the parser rejects comes back as placeholder values.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object};
use thiserror::Error;

/// Placeholder for fields the PDF simply does not carry.
pub const NOT_EMBEDDED: &str = "(not embedded)";

/// Placeholder for fields of a file the parser could not read at all.
pub const UNREADABLE: &str = "(unreadable)";

/// The metadata fields pulled from one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMetadata {
    /// Title, or a placeholder
    pub title: String,
    /// Author, or a placeholder
    pub author: String,
    /// Page count; `None` when the file was unreadable
    pub pages: Option<u32>,
}

impl ExtractedMetadata {
    /// The all-placeholder value used for unreadable files.
    #[must_use]
    pub fn unreadable() -> Self {
        Self {
            title: UNREADABLE.to_string(),
            author: UNREADABLE.to_string(),
            pages: None,
        }
    }
}

/// Errors from parsing a single PDF. These stay local to this module;
/// callers of [`extract_metadata`] only ever see placeholder values.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// lopdf rejected the file.
    #[error("failed to parse PDF {path}: {message}")]
    Pdf {
        /// Path to the PDF file
        path: PathBuf,
        /// Parser error message
        message: String,
    },

    /// The document is encrypted and its metadata is not accessible.
    #[error("PDF is encrypted: {0}")]
    Encrypted(PathBuf),
}

/// Extract title, author, and page count from a PDF file.
///
/// Infallible by design: parse failures are logged at warn level and
/// surface as [`ExtractedMetadata::unreadable`], so a corrupt or
/// password-protected file never aborts the surrounding scan.
pub fn extract_metadata(path: &Path) -> ExtractedMetadata {
    match try_extract(path) {
        Ok(extracted) => extracted,
        Err(e) => {
            log::warn!("{}", e);
            ExtractedMetadata::unreadable()
        }
    }
}

fn try_extract(path: &Path) -> Result<ExtractedMetadata, ExtractError> {
    let doc = Document::load(path).map_err(|e| ExtractError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if doc.is_encrypted() {
        return Err(ExtractError::Encrypted(path.to_path_buf()));
    }

    let info = info_dictionary(&doc);
    let title = info
        .and_then(|dict| string_field(dict, b"Title"))
        .unwrap_or_else(|| NOT_EMBEDDED.to_string());
    let author = info
        .and_then(|dict| string_field(dict, b"Author"))
        .unwrap_or_else(|| NOT_EMBEDDED.to_string());
    let pages = doc.get_pages().len() as u32;

    Ok(ExtractedMetadata {
        title,
        author,
        pages: Some(pages),
    })
}

/// Resolve the trailer's Info entry, following one reference if needed.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    let object = match info {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    object.as_dict().ok()
}

/// Read a text field from the Info dictionary, returning `None` for
/// missing, non-string, or blank values.
fn string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let bytes = dict.get(key).ok()?.as_str().ok()?;
    let text = decode_pdf_string(bytes);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode a PDF text string. UTF-16BE when it carries a BOM, otherwise
/// treated as UTF-8/Latin-ish and decoded lossily.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
