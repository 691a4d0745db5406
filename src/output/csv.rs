//! CSV mirror of a scan result.
//!
//! The row-oriented, human-readable counterpart of the columnar cache.
//! One row per scanned PDF, after a header row:
//!
//! ```text
//! path,title,author,pages,size,modified
//! ```
//!
//! `pages` is empty for unreadable files and `modified` is RFC 3339.
//! The mirror is write-only; the application never loads from it.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::scanner::ScanResult;

/// Errors that can occur while writing the CSV mirror.
#[derive(Debug, Error)]
pub enum CsvError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output. Field order matches the header row.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    path: &'a str,
    title: &'a str,
    author: &'a str,
    pages: Option<u32>,
    size: u64,
    modified: String,
}

/// CSV formatter over a scan result.
pub struct CsvMirror<'a> {
    result: &'a ScanResult,
}

impl<'a> CsvMirror<'a> {
    /// Create a new CSV formatter.
    #[must_use]
    pub fn new(result: &'a ScanResult) -> Self {
        Self { result }
    }

    /// Write the header row and one row per record to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        // Written explicitly so an empty scan still produces the header row
        csv_writer.write_record(["path", "title", "author", "pages", "size", "modified"])?;

        for record in &self.result.records {
            let path = record.path.to_string_lossy();
            let row = CsvRow {
                path: &path,
                title: &record.title,
                author: &record.author,
                pages: record.pages,
                size: record.size,
                modified: record.modified_rfc3339(),
            };
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write the mirror to a file, truncating any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError`] if the file cannot be created or written.
    pub fn write_file(&self, path: &Path) -> Result<(), CsvError> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Generate the CSV as a string.
    ///
    /// # Errors
    ///
    /// Returns [`CsvError`] if serialization fails.
    pub fn to_csv_string(&self) -> Result<String, CsvError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
