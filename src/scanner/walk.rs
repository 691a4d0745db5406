//! Non-recursive PDF file enumeration.
//!
//! Lists the `.pdf` files directly inside one folder using walkdir with a
//! depth limit of one. Subfolders are not descended into, matching the
//! scan contract: one folder, one table.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Enumerate the `.pdf` files directly inside `folder`.
///
/// The extension match is case-insensitive (`.pdf`, `.PDF`, ...). Entries
/// that cannot be read during iteration are logged and skipped so one bad
/// entry never fails the listing. The returned order is filesystem
/// enumeration order and is not guaranteed stable across runs.
///
/// # Errors
///
/// Returns [`ScanError::Io`] if the folder itself cannot be listed at all.
pub fn enumerate_pdfs(folder: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // A root-level error means the folder listing failed outright
                if e.path().map_or(true, |p| p == folder) {
                    return Err(ScanError::Io {
                        path: folder.to_path_buf(),
                        source: e.into(),
                    });
                }
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if is_pdf(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Case-insensitive `.pdf` extension check.
fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
