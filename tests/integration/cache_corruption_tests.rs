//! The cache read path must degrade every kind of damage to a Miss. A
//! corrupt, truncated, or future-versioned cache falls back to a fresh
//! scan, never a crash.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use filetime::FileTime;
use pdfshelf::cache::{self, ColumnarTable, CACHE_FILE, CACHE_VERSION};
use pdfshelf::scanner::scan_folder;
use tempfile::TempDir;

use super::support::write_pdf;

/// Keep the cache file "fresh" so only the damage under test can reject it.
fn pin_fresh(cache_path: &Path) {
    let future = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(3600));
    filetime::set_file_mtime(cache_path, future).unwrap();
}

#[test]
fn test_garbage_bytes_are_a_miss() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join(CACHE_FILE);
    fs::write(&cache_path, b"\x00\x01garbage, not bincode").unwrap();
    pin_fresh(&cache_path);

    assert!(cache::load(dir.path()).is_none());
}

#[test]
fn test_truncated_cache_is_a_miss() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    let cache_path = cache::save(&result).unwrap();

    let bytes = fs::read(&cache_path).unwrap();
    fs::write(&cache_path, &bytes[..bytes.len() / 2]).unwrap();
    pin_fresh(&cache_path);

    assert!(cache::load(dir.path()).is_none());
}

#[test]
fn test_future_version_is_a_miss() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    let mut table = ColumnarTable::from_result(
        fs::canonicalize(dir.path()).unwrap(),
        0,
        &result,
    );
    table.version = CACHE_VERSION + 1;

    let cache_path = dir.path().join(CACHE_FILE);
    fs::write(&cache_path, bincode::serialize(&table).unwrap()).unwrap();
    pin_fresh(&cache_path);

    assert!(cache::load(dir.path()).is_none());
}

#[test]
fn test_mismatched_columns_are_a_miss() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    let mut table = ColumnarTable::from_result(
        fs::canonicalize(dir.path()).unwrap(),
        0,
        &result,
    );
    table.titles.clear();

    let cache_path = dir.path().join(CACHE_FILE);
    fs::write(&cache_path, bincode::serialize(&table).unwrap()).unwrap();
    pin_fresh(&cache_path);

    assert!(cache::load(dir.path()).is_none());
}

#[test]
fn test_empty_cache_file_is_a_miss() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join(CACHE_FILE);
    fs::write(&cache_path, b"").unwrap();
    pin_fresh(&cache_path);

    assert!(cache::load(dir.path()).is_none());
}
