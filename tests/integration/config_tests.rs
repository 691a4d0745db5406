use std::fs;
use std::path::PathBuf;

use pdfshelf::config::Config;
use tempfile::TempDir;

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        last_folder: Some(PathBuf::from("/home/user/books")),
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_empty_config_serializes_to_empty_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    Config::default().save_to(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim(), "{}");
}

#[test]
fn test_unparseable_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "last_folder = '/books'").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_missing_config_loads_as_default() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_unknown_fields_are_tolerated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"last_folder":"/books","some_future_field":true}"#,
    )
    .unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.last_folder, Some(PathBuf::from("/books")));
}
