use std::fs;

use pdfshelf::cache::{self, CACHE_FILE, CSV_FILE};
use pdfshelf::scanner::scan_folder;
use tempfile::TempDir;

use super::support::{write_garbage_pdf, write_pdf};

#[test]
fn test_save_mirrors_every_row_to_csv() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), Some("Ann"), 3);
    write_pdf(&dir.path().join("c.pdf"), None, None, 2);
    write_garbage_pdf(&dir.path().join("broken.pdf"));

    let result = scan_folder(dir.path()).unwrap();
    assert_eq!(result.len(), 3);
    cache::save(&result).unwrap();

    assert!(dir.path().join(CACHE_FILE).exists());

    let csv = fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    // Header plus one row per PDF, readable or not
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "path,title,author,pages,size,modified");

    let broken_line = lines.iter().find(|l| l.contains("broken.pdf")).unwrap();
    // Unreadable files carry placeholders and an empty pages field
    assert!(broken_line.contains("(unreadable)"));
    let fields: Vec<&str> = broken_line.split(',').collect();
    assert_eq!(fields[3], "");

    let bare_line = lines.iter().find(|l| l.contains("c.pdf")).unwrap();
    assert!(bare_line.contains("(not embedded)"));
}

#[test]
fn test_empty_folder_mirrors_to_header_only() {
    let dir = TempDir::new().unwrap();

    let result = scan_folder(dir.path()).unwrap();
    cache::save(&result).unwrap();

    let csv = fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
    assert_eq!(csv.trim(), "path,title,author,pages,size,modified");
}

#[test]
fn test_csv_modified_field_is_rfc3339() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    cache::save(&result).unwrap();

    let csv = fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
    let row = csv.lines().nth(1).unwrap();
    let modified = row.rsplit(',').next().unwrap();
    assert!(modified.contains('T'), "not a timestamp: {modified}");
    assert!(modified.ends_with("+00:00"));
}

#[test]
fn test_resaving_truncates_previous_csv() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), None, 1);
    write_pdf(&dir.path().join("b.pdf"), Some("Beta"), None, 1);

    let result = scan_folder(dir.path()).unwrap();
    cache::save(&result).unwrap();

    fs::remove_file(dir.path().join("b.pdf")).unwrap();
    let smaller = scan_folder(dir.path()).unwrap();
    cache::save(&smaller).unwrap();

    let csv = fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
    assert_eq!(csv.lines().count(), 2);
}
