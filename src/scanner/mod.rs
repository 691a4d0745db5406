//! Folder scanning and PDF metadata extraction.
//!
//! This module turns one folder of PDF files into a [`ScanResult`]:
//! - [`walk`]: non-recursive enumeration of `.pdf` files
//! - [`metadata`]: per-file metadata extraction via lopdf
//!
//! A scan is total over the enumerated files. A PDF that cannot be parsed
//! (corrupt, encrypted) still produces a record, with placeholder values in
//! the fields that could not be read. Only a missing or unreadable folder
//! fails the scan as a whole.
//!
//! # Example
//!
//! ```no_run
//! use pdfshelf::scanner::scan_folder;
//! use std::path::Path;
//!
//! let result = scan_folder(Path::new("/home/user/books")).unwrap();
//! for record in &result.records {
//!     println!("{}: {:?} pages", record.path.display(), record.pages);
//! }
//! ```

pub mod metadata;
pub mod walk;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;

pub use metadata::{extract_metadata, ExtractedMetadata, NOT_EMBEDDED, UNREADABLE};
pub use walk::enumerate_pdfs;

/// Metadata for one scanned PDF file.
///
/// One record is produced per enumerated file. Records are immutable for a
/// given scan; a re-scan supersedes them rather than mutating in place.
/// `title` and `author` hold placeholder text ([`UNREADABLE`] or
/// [`NOT_EMBEDDED`]) when the value could not be read, and `pages` is `None`
/// for files the PDF parser rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// Absolute path to the file; unique key within a scan
    pub path: PathBuf,
    /// Document title from the PDF Info dictionary
    pub title: String,
    /// Document author from the PDF Info dictionary
    pub author: String,
    /// Page count, absent for unreadable files
    pub pages: Option<u32>,
    /// File size in bytes
    pub size: u64,
    /// Last modification time, unix seconds
    pub modified: i64,
}

impl MetadataRecord {
    /// Render the modification time as RFC 3339, or `"unknown"` for
    /// timestamps outside chrono's representable range.
    #[must_use]
    pub fn modified_rfc3339(&self) -> String {
        DateTime::from_timestamp(self.modified, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// The outcome of scanning one folder: an ordered sequence of records,
/// one per enumerated PDF, in filesystem enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// The folder that was scanned
    pub folder: PathBuf,
    /// One record per PDF file found directly in the folder
    pub records: Vec<MetadataRecord>,
}

impl ScanResult {
    /// Number of records in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the scan found no PDF files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Errors that fail a scan as a whole.
///
/// Per-file problems never appear here; they degrade to placeholder values
/// inside the affected record.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The folder does not exist.
    #[error("Folder not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but is not a directory.
    #[error("Not a folder: {0}")]
    NotADirectory(PathBuf),

    /// The folder could not be read.
    #[error("Cannot read folder {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Scan a folder of PDFs and extract metadata from each.
///
/// Enumerates `.pdf` files directly in `folder` (non-recursive) and builds
/// one [`MetadataRecord`] per file. Extraction failures for individual files
/// are logged and recorded as placeholders; they do not abort the scan.
///
/// # Errors
///
/// Returns [`ScanError`] only when the folder itself is missing, not a
/// directory, or unreadable.
pub fn scan_folder(folder: &Path) -> Result<ScanResult, ScanError> {
    let meta = std::fs::metadata(folder).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScanError::NotFound(folder.to_path_buf())
        } else {
            ScanError::Io {
                path: folder.to_path_buf(),
                source: e,
            }
        }
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(folder.to_path_buf()));
    }

    let files = enumerate_pdfs(folder)?;
    log::info!("Scanning {} PDF(s) in {}", files.len(), folder.display());

    let mut records = Vec::with_capacity(files.len());
    for path in files {
        records.push(scan_file(&path));
    }

    Ok(ScanResult {
        folder: folder.to_path_buf(),
        records,
    })
}

/// Build the record for a single file. Never fails: unreadable filesystem
/// metadata and unparseable PDFs both degrade to placeholder values.
fn scan_file(path: &Path) -> MetadataRecord {
    let (size, modified) = match std::fs::metadata(path) {
        Ok(meta) => (meta.len(), unix_seconds(meta.modified().ok())),
        Err(e) => {
            log::warn!("Cannot stat {}: {}", path.display(), e);
            (0, 0)
        }
    };

    let extracted = extract_metadata(path);
    log::debug!(
        "Scanned {}: {} page(s)",
        path.display(),
        extracted
            .pages
            .map_or_else(|| "?".to_string(), |p| p.to_string())
    );

    MetadataRecord {
        path: path.to_path_buf(),
        title: extracted.title,
        author: extracted.author,
        pages: extracted.pages,
        size,
        modified,
    }
}

fn unix_seconds(time: Option<SystemTime>) -> i64 {
    match time {
        Some(t) => match t.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            // mtimes before the epoch are legal on some filesystems
            Err(e) => -(e.duration().as_secs() as i64),
        },
        None => 0,
    }
}
