//! Output formatters.
//!
//! Currently a single formatter: the CSV mirror written alongside the
//! columnar cache. See [`csv`].

pub mod csv;

pub use csv::{CsvError, CsvMirror};
