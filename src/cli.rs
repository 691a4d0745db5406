//! Command-line interface definitions.
//!
//! The CLI surface is intentionally small: launch, optionally with a folder,
//! plus the standard verbosity flags. Everything else happens interactively
//! in the UI.
//!
//! # Example
//!
//! ```bash
//! # Open the last-used folder (or the folder prompt, on first run)
//! pdfshelf
//!
//! # Open a specific folder
//! pdfshelf ~/books
//!
//! # Verbose mode for debugging
//! pdfshelf -v ~/books
//! ```

use clap::Parser;
use std::path::PathBuf;

/// PDF folder browser with a sortable metadata table and columnar cache.
///
/// Scans a folder of PDFs, extracts title/author/page count per file, and
/// shows the rows in an interactive table. Results are cached on disk and
/// reused until the folder changes.
#[derive(Debug, Parser)]
#[command(name = "pdfshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder of PDFs to browse (defaults to the last-used folder)
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
