use std::fs;
use std::time::{Duration, SystemTime};

use filetime::FileTime;
use pdfshelf::cache::{self, CACHE_FILE, CSV_FILE};
use pdfshelf::scanner::scan_folder;
use pdfshelf::{refresh_folder, LoadSource};
use tempfile::TempDir;

use super::support::write_pdf;

#[test]
fn test_save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), Some("Ann"), 2);
    write_pdf(&dir.path().join("b.pdf"), Some("Beta"), Some("Bob"), 5);

    let result = scan_folder(dir.path()).unwrap();
    cache::save(&result).unwrap();

    let loaded = cache::load(dir.path()).expect("expected a cache hit");
    assert_eq!(loaded, result);
}

#[test]
fn test_save_writes_both_artifacts() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    let cache_path = cache::save(&result).unwrap();

    assert_eq!(cache_path, dir.path().join(CACHE_FILE));
    assert!(cache_path.exists());
    assert!(dir.path().join(CSV_FILE).exists());
}

#[test]
fn test_folder_mtime_advancing_invalidates() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    cache::save(&result).unwrap();
    assert!(cache::load(dir.path()).is_some());

    // Simulate the folder changing after the save
    let future = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(3600));
    filetime::set_file_mtime(dir.path(), future).unwrap();

    assert!(cache::load(dir.path()).is_none());
}

#[test]
fn test_cache_for_another_folder_is_a_miss() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    write_pdf(&dir_a.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir_a.path()).unwrap();
    cache::save(&result).unwrap();

    // Transplant A's cache into B, keeping it "fresh" so only the folder
    // tag can reject it
    let cache_in_b = dir_b.path().join(CACHE_FILE);
    fs::copy(dir_a.path().join(CACHE_FILE), &cache_in_b).unwrap();
    let future = FileTime::from_system_time(SystemTime::now() + Duration::from_secs(3600));
    filetime::set_file_mtime(&cache_in_b, future).unwrap();

    assert!(cache::load(dir_b.path()).is_none());
}

#[test]
fn test_refresh_scans_on_miss_then_hits_cache() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let (first, first_source) = refresh_folder(dir.path()).unwrap();
    assert_eq!(first_source, LoadSource::Scan);
    assert_eq!(first.len(), 1);

    let (second, second_source) = refresh_folder(dir.path()).unwrap();
    assert_eq!(second_source, LoadSource::Cache);
    assert_eq!(second, first);
}

#[test]
fn test_save_overwrites_previous_cache() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let first = scan_folder(dir.path()).unwrap();
    cache::save(&first).unwrap();

    write_pdf(&dir.path().join("b.pdf"), Some("Beta"), None, 1);
    let second = scan_folder(dir.path()).unwrap();
    cache::save(&second).unwrap();

    let loaded = cache::load(dir.path()).expect("expected a cache hit");
    assert_eq!(loaded.len(), 2);
}
