use std::path::Path;

use crate::error::PipelineError;
use crate::selector::list_entries;

/// Delete every entry of `dir`, in file-name order.
///
/// Stops at the first entry that cannot be removed; entries already deleted
/// stay deleted. Sub-directories are not unlinked and fail the drain.
///
/// # Errors
///
/// Returns `DrainFailed` naming the directory (listing failed) or the entry
/// whose removal failed.
pub fn drain(dir: &Path) -> Result<usize, PipelineError> {
    let entries = list_entries(dir).map_err(|source| PipelineError::DrainFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    for (removed, entry) in entries.iter().enumerate() {
        if let Err(source) = std::fs::remove_file(&entry.path) {
            log::warn!(
                "Drain stopped at {} after {removed} deletions: {source}",
                entry.path.display()
            );
            return Err(PipelineError::DrainFailed {
                path: entry.path.clone(),
                source,
            });
        }
        log::debug!("Removed {}", entry.path.display());
    }

    Ok(entries.len())
}
