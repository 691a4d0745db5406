use std::fs;

use pdfshelf::cache::{self, CSV_FILE};
use pdfshelf::scanner::{scan_folder, ScanError, NOT_EMBEDDED, UNREADABLE};
use tempfile::TempDir;

use super::support::{write_encrypted_pdf, write_garbage_pdf, write_pdf};

#[test]
fn test_one_record_per_pdf() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), Some("Ann"), 3);
    write_pdf(&dir.path().join("b.pdf"), Some("Beta"), Some("Bob"), 1);
    write_pdf(&dir.path().join("c.pdf"), Some("Gamma"), Some("Cyd"), 2);

    let result = scan_folder(dir.path()).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.folder, dir.path());

    let alpha = result
        .records
        .iter()
        .find(|r| r.path.ends_with("a.pdf"))
        .unwrap();
    assert_eq!(alpha.title, "Alpha");
    assert_eq!(alpha.author, "Ann");
    assert_eq!(alpha.pages, Some(3));
    assert!(alpha.size > 0);
    assert!(alpha.modified > 0);
}

#[test]
fn test_unreadable_pdf_gets_placeholders_without_aborting() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("good.pdf"), Some("Good"), Some("G"), 1);
    write_garbage_pdf(&dir.path().join("broken.pdf"));

    let result = scan_folder(dir.path()).unwrap();
    assert_eq!(result.len(), 2);

    let broken = result
        .records
        .iter()
        .find(|r| r.path.ends_with("broken.pdf"))
        .unwrap();
    assert_eq!(broken.title, UNREADABLE);
    assert_eq!(broken.author, UNREADABLE);
    assert_eq!(broken.pages, None);
    // Filesystem facts are still recorded for unreadable files
    assert!(broken.size > 0);

    let good = result
        .records
        .iter()
        .find(|r| r.path.ends_with("good.pdf"))
        .unwrap();
    assert_eq!(good.title, "Good");
    assert_eq!(good.pages, Some(1));
}

#[test]
fn test_password_protected_pdf_gets_placeholders() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), Some("Alpha"), Some("Ann"), 1);
    write_pdf(&dir.path().join("b.pdf"), Some("Beta"), Some("Bob"), 2);
    write_encrypted_pdf(&dir.path().join("locked.pdf"), 1);

    let result = scan_folder(dir.path()).unwrap();
    assert_eq!(result.len(), 3);

    let locked = result
        .records
        .iter()
        .find(|r| r.path.ends_with("locked.pdf"))
        .unwrap();
    // Encrypted metadata is not accessible; the Info fields it does carry
    // must not leak through
    assert_eq!(locked.title, UNREADABLE);
    assert_eq!(locked.author, UNREADABLE);
    assert_eq!(locked.pages, None);
    assert!(locked.size > 0);

    cache::save(&result).unwrap();
    let csv = fs::read_to_string(dir.path().join(CSV_FILE)).unwrap();
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_absent_metadata_fields_get_placeholders() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("bare.pdf"), None, None, 2);

    let result = scan_folder(dir.path()).unwrap();
    let bare = &result.records[0];

    assert_eq!(bare.title, NOT_EMBEDDED);
    assert_eq!(bare.author, NOT_EMBEDDED);
    assert_eq!(bare.pages, Some(2));
}

#[test]
fn test_scan_is_non_recursive_and_pdf_only() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("top.pdf"), Some("Top"), None, 1);
    fs::write(dir.path().join("notes.txt"), b"irrelevant").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write_pdf(&dir.path().join("sub").join("deep.pdf"), Some("Deep"), None, 1);

    let result = scan_folder(dir.path()).unwrap();

    assert_eq!(result.len(), 1);
    assert!(result.records[0].path.ends_with("top.pdf"));
}

#[test]
fn test_empty_folder_scans_to_empty_result() {
    let dir = TempDir::new().unwrap();
    let result = scan_folder(dir.path()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_scanning_a_file_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.pdf");
    write_pdf(&file, None, None, 1);

    let err = scan_folder(&file).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));
}
