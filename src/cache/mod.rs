//! Scan result caching.
//!
//! Persists extracted rows next to the PDFs they describe so the next launch
//! renders without re-parsing every file.
//!
//! # Architecture
//!
//! - [`columnar`]: the versioned, bincode-encoded column-per-field table.
//! - [`store`]: load/save against a folder, including the CSV mirror and
//!   the staleness check.
//!
//! # Cache validity
//!
//! A cache applies to a folder when its format version matches, its folder
//! tag matches, and the folder's mtime has not advanced past the cache
//! file's. Anything else - including a file that fails to decode - is a
//! Miss, and the caller re-scans. Cached rows are never re-validated against
//! the filesystem; entries for files deleted since the scan persist until
//! the next Miss.

pub mod columnar;
pub mod store;

use std::path::PathBuf;

pub use columnar::{ColumnarTable, CACHE_VERSION};
pub use store::{load, save, CACHE_FILE, CSV_FILE};

/// Errors from writing or reassembling a cache.
///
/// Read-side problems never surface as errors; [`store::load`] turns them
/// into a Miss.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// An I/O error while writing the cache.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The table could not be encoded or decoded.
    #[error("cache encoding failed: {0}")]
    Encode(#[from] bincode::Error),

    /// The decoded columns disagree in length.
    #[error("cache columns disagree in length")]
    Malformed,
}
