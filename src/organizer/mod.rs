//! Applying a finished assignment to the files on disk.
//!
//! Writes each pair's tags and optionally renames the file from a template
//! such as `%no - %track`:
//! - `%no` is replaced by the track position
//! - `%track` is replaced by the track title
//!
//! The file stays in its directory and keeps its original extension.
//! Every file is handled on its own: a failure is recorded in the
//! [`ApplyReport`] and the remaining files are still processed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};
use crate::matching::Assignment;
use crate::metadata::{self, FieldChange, TagRecord};
use crate::model::{AlbumMetadata, TrackMetadata};

/// Placeholder replaced by the track position.
pub const POSITION_PLACEHOLDER: &str = "%no";
/// Placeholder replaced by the track title.
pub const TITLE_PLACEHOLDER: &str = "%track";

/// What happened to one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Final location after a rename (planned location in dry-run mode)
    pub new_path: Option<PathBuf>,
    /// Fields that differ from what the file held (dry-run only)
    pub changes: Vec<FieldChange>,
    pub error: Option<Error>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-file results of [`apply_assignment`], in tracklist order.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<FileOutcome>,
}

impl ApplyReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// Options for [`apply_assignment`].
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Rename template with `%no` / `%track` placeholders
    pub rename: Option<String>,
    /// Compute changes without writing or moving anything
    pub dry_run: bool,
}

/// Write tags for every pair and rename when a template is given.
///
/// Tags are written first; the files whose tags were written are then
/// renamed together with [`rename_all`].
pub fn apply_assignment(
    album: &AlbumMetadata,
    assignment: &Assignment,
    options: &ApplyOptions,
) -> ApplyReport {
    let mut report = ApplyReport::default();
    let mut moves: Vec<(usize, Move)> = Vec::new();

    for pair in assignment.in_track_order() {
        let path = pair.candidate.path.clone();
        let record = TagRecord::new(album, &pair.track);

        let result = if options.dry_run {
            metadata::preview_write(&path, &record)
        } else {
            metadata::write_tags(&path, &record).map(|()| Vec::new())
        };

        match result {
            Ok(changes) => {
                let new_path = options
                    .rename
                    .as_deref()
                    .map(|t| renamed_path(&path, t, &pair.track));
                if let (Some(to), false) = (&new_path, options.dry_run) {
                    moves.push((
                        report.outcomes.len(),
                        Move {
                            from: path.clone(),
                            to: to.clone(),
                        },
                    ));
                }
                report.outcomes.push(FileOutcome {
                    path,
                    new_path,
                    changes,
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to apply metadata");
                report.outcomes.push(FileOutcome {
                    path,
                    new_path: None,
                    changes: Vec::new(),
                    error: Some(e),
                });
            }
        }
    }

    let (indices, moves): (Vec<usize>, Vec<Move>) = moves.into_iter().unzip();
    for (index, result) in indices.into_iter().zip(rename_all(&moves)) {
        if let Err(e) = result {
            let outcome = &mut report.outcomes[index];
            tracing::warn!(path = %outcome.path.display(), error = %e, "Failed to rename file");
            outcome.new_path = None;
            outcome.error = Some(e);
        }
    }

    tracing::info!(
        ok = report.success_count(),
        failed = report.error_count(),
        dry_run = options.dry_run,
        "Applied assignment"
    );
    report
}

/// Substitute the placeholders in `template`.
///
/// Inserted values are sanitized; the template itself is used as given.
pub fn render_name(template: &str, track: &TrackMetadata) -> String {
    template
        .replace(POSITION_PLACEHOLDER, &sanitize_filename(&track.position))
        .replace(TITLE_PLACEHOLDER, &sanitize_filename(&track.title))
}

/// Where `path` would move to under `template`.
pub fn renamed_path(path: &Path, template: &str, track: &TrackMetadata) -> PathBuf {
    let mut name = render_name(template, track);
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }

    match path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Rename a batch of files, returning one result per move.
///
/// Files are first moved to a temporary name next to them and only then to
/// their destination, so names can be exchanged within the batch. A
/// destination is refused when it exists and is not itself moved away by
/// the batch. A file whose final rename fails is put back where it was.
pub fn rename_all(moves: &[Move]) -> Vec<Result<PathBuf>> {
    let leaving: HashSet<&Path> = moves
        .iter()
        .filter(|m| m.from != m.to)
        .map(|m| m.from.as_path())
        .collect();

    let mut results: Vec<Option<Result<PathBuf>>> = moves.iter().map(|_| None).collect();
    let mut staged: Vec<(usize, PathBuf)> = Vec::new();

    for (i, m) in moves.iter().enumerate() {
        if m.from == m.to {
            results[i] = Some(Ok(m.to.clone()));
        } else if m.to.exists() && !leaving.contains(m.to.as_path()) {
            results[i] = Some(Err(already_exists(m)));
        } else {
            match stage(&m.from, i) {
                Ok(temp) => staged.push((i, temp)),
                Err(e) => results[i] = Some(Err(e)),
            }
        }
    }

    for (i, temp) in staged {
        let m = &moves[i];
        let result = if m.to.exists() {
            Err(already_exists(m))
        } else {
            fs::rename(&temp, &m.to)
                .with_context(format!("Failed to rename {}", m.from.display()))
                .map(|()| m.to.clone())
        };

        match &result {
            Ok(dest) => {
                tracing::info!(from = %m.from.display(), to = %dest.display(), "Renamed file")
            }
            Err(_) => restore(&temp, &m.from),
        }
        results[i] = Some(result);
    }

    results
        .into_iter()
        .zip(moves)
        .map(|(result, m)| {
            result.unwrap_or_else(|| Err(Error::rename(&m.from, "rename was not attempted")))
        })
        .collect()
}

fn already_exists(m: &Move) -> Error {
    Error::rename(
        &m.from,
        format!("destination {} already exists", m.to.display()),
    )
}

/// Move `path` to a temporary name in its own directory.
fn stage(path: &Path, index: usize) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::rename(path, "not a file path"))?
        .to_string_lossy();
    let temp = path.with_file_name(format!(".{name}.{}-{index}.tagging", std::process::id()));
    if temp.exists() {
        return Err(Error::rename(
            path,
            format!("temporary name {} is taken", temp.display()),
        ));
    }

    fs::rename(path, &temp).with_context(format!("Failed to stage rename of {}", path.display()))?;
    Ok(temp)
}

fn restore(temp: &Path, original: &Path) {
    if original.exists() {
        tracing::error!(
            file = %temp.display(),
            original = %original.display(),
            "Original name was taken, file left under its temporary name"
        );
        return;
    }
    if let Err(e) = fs::rename(temp, original) {
        tracing::error!(file = %temp.display(), error = %e, "Failed to restore file name");
    }
}

/// Sanitizes a filename by removing/replacing invalid characters
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
