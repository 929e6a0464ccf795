use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// A pending entry of the watched directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotFile {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

impl ScreenshotFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, modified: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }
}

/// List every entry of `dir` with its modification time, sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read.
pub fn list_entries(dir: &Path) -> std::io::Result<Vec<ScreenshotFile>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let modified = entry.metadata()?.modified()?;
        entries.push(ScreenshotFile::new(entry.path(), DateTime::<Utc>::from(modified)));
    }
    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(entries)
}

/// Pick the most recently modified entry.
///
/// Ties go to the entry that comes first in the listing.
///
/// # Errors
///
/// Returns `EmptyDirectory` when the listing is empty.
pub fn select_latest<'a>(
    dir: &Path,
    entries: &'a [ScreenshotFile],
) -> Result<&'a ScreenshotFile, PipelineError> {
    entries
        .iter()
        .reduce(|best, candidate| {
            if candidate.modified > best.modified {
                candidate
            } else {
                best
            }
        })
        .ok_or_else(|| PipelineError::EmptyDirectory {
            dir: dir.to_path_buf(),
        })
}
