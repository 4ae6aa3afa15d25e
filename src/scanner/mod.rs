//! File discovery for the files being tagged.
//!
//! A file path yields itself. A directory yields its direct entries that are
//! files, sorted by name, optionally filtered by extension
//! (case-insensitive). Subdirectories are not descended into: one directory
//! holds one release.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::model::Candidate;

/// List the files under `path` that may receive track metadata.
pub fn discover(path: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(Error::not_found(path));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if scan.filter_extensions && !has_allowed_extension(entry.path(), &scan.extensions) {
            tracing::debug!(path = %entry.path().display(), "Skipping non-audio file");
            continue;
        }
        files.push(entry.into_path());
    }

    tracing::info!(count = files.len(), root = %path.display(), "Discovered files");
    Ok(files)
}

/// Discover files and probe each one into a [`Candidate`].
///
/// A file that cannot be probed is fatal: it would leave the pool short.
pub fn candidates(path: &Path, scan: &ScanConfig) -> Result<Vec<Candidate>> {
    discover(path, scan)?
        .iter()
        .map(|p| Candidate::from_path(p))
        .collect()
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
