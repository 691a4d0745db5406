//! Columnar on-disk table for scan results.
//!
//! The cache stores the table column-by-column: one vector per record field,
//! all of equal length, bincode-encoded behind a version field. This is the
//! fast-reload counterpart to the row-oriented CSV mirror.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scanner::{MetadataRecord, ScanResult};
use super::CacheError;

/// Cache format version - bump when the column layout changes.
pub const CACHE_VERSION: u32 = 1;

/// One scan result laid out by column, plus the envelope fields used to
/// decide whether the cache still applies: the format version, the source
/// folder tag, and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnarTable {
    /// Cache format version
    pub version: u32,
    /// Canonicalized folder this cache was built for
    pub folder: PathBuf,
    /// When the cache was built (unix seconds, informational)
    pub created_at: i64,
    /// File paths, one per record
    pub paths: Vec<PathBuf>,
    /// Titles
    pub titles: Vec<String>,
    /// Authors
    pub authors: Vec<String>,
    /// Page counts
    pub pages: Vec<Option<u32>>,
    /// File sizes in bytes
    pub sizes: Vec<u64>,
    /// Modification times, unix seconds
    pub modified: Vec<i64>,
}

impl ColumnarTable {
    /// Lay out a scan result by column.
    #[must_use]
    pub fn from_result(folder: PathBuf, created_at: i64, result: &ScanResult) -> Self {
        let n = result.records.len();
        let mut table = Self {
            version: CACHE_VERSION,
            folder,
            created_at,
            paths: Vec::with_capacity(n),
            titles: Vec::with_capacity(n),
            authors: Vec::with_capacity(n),
            pages: Vec::with_capacity(n),
            sizes: Vec::with_capacity(n),
            modified: Vec::with_capacity(n),
        };
        for record in &result.records {
            table.paths.push(record.path.clone());
            table.titles.push(record.title.clone());
            table.authors.push(record.author.clone());
            table.pages.push(record.pages);
            table.sizes.push(record.size);
            table.modified.push(record.modified);
        }
        table
    }

    /// Reassemble rows from the columns.
    ///
    /// The returned result carries the folder the rows were originally
    /// scanned under, which is the caller's requested folder after the tag
    /// check in [`super::load`].
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Malformed`] when the columns disagree in
    /// length; a decoder that produced such a table read a damaged file.
    pub fn into_result(self, folder: PathBuf) -> Result<ScanResult, CacheError> {
        let n = self.paths.len();
        if self.titles.len() != n
            || self.authors.len() != n
            || self.pages.len() != n
            || self.sizes.len() != n
            || self.modified.len() != n
        {
            return Err(CacheError::Malformed);
        }

        let records = self
            .paths
            .into_iter()
            .zip(self.titles)
            .zip(self.authors)
            .zip(self.pages)
            .zip(self.sizes)
            .zip(self.modified)
            .map(
                |(((((path, title), author), pages), size), modified)| MetadataRecord {
                    path,
                    title,
                    author,
                    pages,
                    size,
                    modified,
                },
            )
            .collect();

        Ok(ScanResult { folder, records })
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
