//! pdfshelf - PDF folder browser.
//!
//! Scans a folder of PDF files, extracts basic metadata (title, author,
//! page count) per file, shows the rows in an interactive sortable and
//! searchable table, and caches the extracted rows to disk - a columnar
//! binary cache for fast reload plus a CSV mirror for humans.
//!
//! Control flow: the presentation layer asks the cache for rows; on a miss
//! the scanner runs and its output is written back through the cache; the
//! table renders whatever came back.

pub mod cache;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod tui;

use std::path::Path;

use anyhow::Context;

use cli::Cli;
use config::Config;
use scanner::{ScanError, ScanResult};
use tui::App;

/// Where a set of rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Loaded from the on-disk cache
    Cache,
    /// Produced by a fresh scan
    Scan,
}

/// Get the rows for `folder`: cached if valid, scanned on a Miss.
///
/// A Miss triggers a scan, and the scan's output is written back through
/// the cache. Cache write failures are logged and swallowed; the rows are
/// still returned.
///
/// # Errors
///
/// Returns [`ScanError`] when the folder is missing, not a directory, or
/// unreadable.
pub fn refresh_folder(folder: &Path) -> Result<(ScanResult, LoadSource), ScanError> {
    if let Some(result) = cache::load(folder) {
        return Ok((result, LoadSource::Cache));
    }
    rescan_folder(folder)
}

/// Scan `folder` unconditionally and write the result back to the cache.
///
/// # Errors
///
/// Returns [`ScanError`] when the folder is missing, not a directory, or
/// unreadable.
pub fn rescan_folder(folder: &Path) -> Result<(ScanResult, LoadSource), ScanError> {
    let result = scanner::scan_folder(folder)?;
    if let Err(e) = cache::save(&result) {
        log::warn!("Failed to write cache for {}: {}", folder.display(), e);
    }
    Ok((result, LoadSource::Scan))
}

/// Persist `folder` as the remembered last folder. Config write failures
/// are non-fatal by contract and only logged at debug level.
pub fn remember_folder(folder: &Path) {
    let mut config = Config::load();
    config.last_folder = Some(folder.to_path_buf());
    if let Err(e) = config.save() {
        log::debug!("Failed to save config: {}", e);
    }
}

/// Application entry point: initialize logging, resolve the starting
/// folder, load or scan it, and run the UI.
///
/// The starting folder is the CLI argument if given, else the remembered
/// last folder if it still is a directory. With neither, the UI starts
/// idle at the folder prompt.
///
/// # Errors
///
/// Returns an error only for terminal failures; scan and cache problems
/// surface inside the UI.
pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load();
    let folder = cli
        .folder
        .clone()
        .or_else(|| config.last_folder.clone().filter(|p| p.is_dir()));

    let mut app = App::new();
    if let Some(folder) = folder {
        match refresh_folder(&folder) {
            Ok((result, source)) => {
                remember_folder(&folder);
                app.set_result(result, source);
            }
            Err(e) => {
                log::error!("Cannot open {}: {}", folder.display(), e);
                app.set_error(&e.to_string());
            }
        }
    }

    tui::run_tui(&mut app).context("terminal UI failed")?;
    Ok(())
}
