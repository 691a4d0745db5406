//! Cache load/save against the scanned folder.
//!
//! Both cache artifacts live inside the scanned folder, as the rows they
//! mirror do: the columnar binary at [`CACHE_FILE`] and the CSV mirror at
//! [`CSV_FILE`]. `load` never returns an error - any unreadable, corrupt,
//! mismatched, or stale cache degrades to a Miss (`None`) and the caller
//! falls back to a fresh scan.
//!
//! # Staleness
//!
//! The cache is stale when the folder's mtime is strictly newer than the
//! cache file's mtime. The binary cache is written last and its mtime is
//! pinned to the folder's afterwards, so saving the cache can never make it
//! stale against its own writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::output::csv::CsvMirror;
use crate::scanner::ScanResult;

use super::columnar::{ColumnarTable, CACHE_VERSION};
use super::CacheError;

/// File name of the columnar binary cache, inside the scanned folder.
pub const CACHE_FILE: &str = ".pdfshelf.cache";

/// File name of the human-readable CSV mirror, inside the scanned folder.
pub const CSV_FILE: &str = "pdfshelf.csv";

/// Load the cached scan result for `folder`, or signal a Miss.
///
/// Returns `Some` only when all of the following hold:
/// - the cache file exists and decodes,
/// - its format version matches,
/// - its folder tag matches `folder`,
/// - the folder's mtime has not advanced past the cache file's.
///
/// Every failure path logs and returns `None`; a corrupt cache must degrade
/// to a re-scan, never a crash.
pub fn load(folder: &Path) -> Option<ScanResult> {
    let cache_path = folder.join(CACHE_FILE);

    let bytes = match fs::read(&cache_path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No cache at {}", cache_path.display());
            return None;
        }
        Err(e) => {
            log::warn!("Cannot read cache {}: {}", cache_path.display(), e);
            return None;
        }
    };

    let table: ColumnarTable = match bincode::deserialize(&bytes) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("Corrupt cache {}: {}", cache_path.display(), e);
            return None;
        }
    };

    if table.version != CACHE_VERSION {
        log::info!(
            "Cache version mismatch at {}: expected {}, got {}",
            cache_path.display(),
            CACHE_VERSION,
            table.version
        );
        return None;
    }

    if !same_folder(&table.folder, folder) {
        log::info!(
            "Cache at {} was built for {}, not {}",
            cache_path.display(),
            table.folder.display(),
            folder.display()
        );
        return None;
    }

    if is_stale(folder, &cache_path) {
        log::info!("Cache for {} is stale", folder.display());
        return None;
    }

    match table.into_result(folder.to_path_buf()) {
        Ok(result) => {
            log::info!(
                "Loaded {} row(s) from cache for {}",
                result.len(),
                folder.display()
            );
            Some(result)
        }
        Err(e) => {
            log::warn!("Damaged cache {}: {}", cache_path.display(), e);
            None
        }
    }
}

/// Write the columnar cache and the CSV mirror for `result`, overwriting
/// any prior cache for the folder.
///
/// The CSV mirror is written first and its failure is non-fatal (logged at
/// warn); the binary cache is the authoritative artifact and is published
/// atomically via temp file + rename.
///
/// # Errors
///
/// Returns [`CacheError`] when the binary cache cannot be encoded or
/// written.
pub fn save(result: &ScanResult) -> Result<PathBuf, CacheError> {
    let folder = &result.folder;
    let cache_path = folder.join(CACHE_FILE);
    let csv_path = folder.join(CSV_FILE);

    if let Err(e) = CsvMirror::new(result).write_file(&csv_path) {
        log::warn!("CSV mirror at {} failed: {}", csv_path.display(), e);
    } else {
        log::debug!("Wrote CSV mirror to {}", csv_path.display());
    }

    let tag = fs::canonicalize(folder).unwrap_or_else(|_| folder.to_path_buf());
    let table = ColumnarTable::from_result(tag, now_unix(), result);
    let encoded = bincode::serialize(&table)?;

    let tmp_path = folder.join(format!("{CACHE_FILE}.tmp"));
    fs::write(&tmp_path, &encoded).map_err(|e| CacheError::Io {
        path: tmp_path.clone(),
        source: e,
    })?;
    fs::rename(&tmp_path, &cache_path).map_err(|e| CacheError::Io {
        path: cache_path.clone(),
        source: e,
    })?;

    // The rename that publishes the cache also bumps the folder mtime; pin
    // the file mtime to the folder's so a fresh cache is never already stale.
    pin_mtime_to_folder(folder, &cache_path);

    log::info!(
        "Cached {} row(s) to {}",
        result.len(),
        cache_path.display()
    );
    Ok(cache_path)
}

/// Stale when the folder's mtime is strictly newer than the cache file's.
/// Unreadable mtimes count as stale.
fn is_stale(folder: &Path, cache_path: &Path) -> bool {
    match (mtime(folder), mtime(cache_path)) {
        (Some(folder_mtime), Some(cache_mtime)) => folder_mtime > cache_mtime,
        _ => true,
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn pin_mtime_to_folder(folder: &Path, cache_path: &Path) {
    let Some(folder_mtime) = mtime(folder) else {
        return;
    };
    match fs::File::options().write(true).open(cache_path) {
        Ok(file) => {
            if let Err(e) = file.set_modified(folder_mtime) {
                log::debug!("Cannot pin cache mtime: {}", e);
            }
        }
        Err(e) => log::debug!("Cannot reopen cache to pin mtime: {}", e),
    }
}

/// Compare the stored folder tag against the requested folder, tolerating
/// symlinks and relative paths via canonicalization.
fn same_folder(tag: &Path, requested: &Path) -> bool {
    if tag == requested {
        return true;
    }
    match (fs::canonicalize(tag), fs::canonicalize(requested)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
