use glob::{glob, Pattern};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SlothError};

/// Counts reported by a pruning pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneSummary {
    pub total: usize,
    pub deleted: usize,
}

impl PruneSummary {
    pub fn deleted_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.deleted as f64 / self.total as f64 * 100.0
        }
    }
}

/// Delete all but every `keep_every`-th file directly inside `dir`.
///
/// Files are visited in name order, so captures named by sequence number
/// keep an even spacing. With `dry_run` nothing is removed.
pub fn keep_nth_files(dir: &Path, keep_every: usize, dry_run: bool) -> Result<PruneSummary> {
    if keep_every == 0 {
        return Err(SlothError::InvalidArgument(
            "keep_every must be at least 1".to_string(),
        ));
    }
    if !dir.is_dir() {
        return Err(SlothError::InvalidArgument(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let files = list_files(dir)?;
    let mut summary = PruneSummary {
        total: files.len(),
        deleted: 0,
    };

    for (i, path) in files.iter().enumerate() {
        if i % keep_every == 0 {
            continue;
        }
        if dry_run {
            info!("Would delete {}", path.display());
        } else {
            info!("Deleting {}", path.display());
            fs::remove_file(path).map_err(|e| SlothError::io(path, e))?;
        }
        summary.deleted += 1;
    }

    info!(
        "Removed {} / {} = {:.1}%",
        summary.deleted,
        summary.total,
        summary.deleted_percent()
    );
    Ok(summary)
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*", Pattern::escape(&dir.to_string_lossy()));
    let entries = glob(&pattern)
        .map_err(|e| SlothError::InvalidArgument(format!("bad directory pattern: {}", e)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}
