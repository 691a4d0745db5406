//! pdfshelf - PDF folder browser.
//!
//! Entry point for the pdfshelf binary.

use clap::Parser;
use pdfshelf::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = pdfshelf::run_app(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
