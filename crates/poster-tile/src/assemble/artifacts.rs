//! Transient tile artifacts and workspace cleanup
//!
//! Removal is always best-effort: a file that cannot be removed is logged
//! and reported, and the remaining files are still processed.

use crate::constants::{is_tile_file_name, tile_file_name};
use crate::layout::GridPosition;
use crate::options::TileStorage;
use crate::types::*;
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Tiles staged by a single assembly.
///
/// Every staged file is removed exactly once, either by [`cleanup`] or,
/// if the assembly bails out early, when the value is dropped.
///
/// [`cleanup`]: TileArtifacts::cleanup
pub(crate) struct TileArtifacts {
    dir: Option<PathBuf>,
    staged: Vec<PathBuf>,
}

impl TileArtifacts {
    pub(crate) fn new(storage: &TileStorage) -> Result<Self> {
        let dir = match storage {
            TileStorage::Memory => None,
            TileStorage::Directory(dir) => {
                std::fs::create_dir_all(dir)?;
                Some(dir.clone())
            }
        };
        Ok(Self {
            dir,
            staged: Vec::new(),
        })
    }

    /// Stage an encoded tile and return the bytes to embed in the document
    pub(crate) fn stage(&mut self, pos: GridPosition, jpeg: Vec<u8>) -> Result<Vec<u8>> {
        let Some(dir) = &self.dir else {
            return Ok(jpeg);
        };

        let path = dir.join(tile_file_name(pos.row, pos.col));
        // Tracked before writing so a partial write is cleaned up too
        self.staged.push(path.clone());
        std::fs::write(&path, &jpeg)?;
        Ok(std::fs::read(&path)?)
    }

    /// Remove every staged tile
    pub(crate) fn cleanup(&mut self) -> CleanupReport {
        remove_files(std::mem::take(&mut self.staged))
    }
}

impl Drop for TileArtifacts {
    fn drop(&mut self) {
        if !self.staged.is_empty() {
            let report = self.cleanup();
            debug!(
                "Removed {} staged tiles after an interrupted assembly",
                report.removed.len()
            );
        }
    }
}

/// Remove each path, continuing past failures
pub(crate) fn remove_files(paths: impl IntoIterator<Item = PathBuf>) -> CleanupReport {
    let mut report = CleanupReport::default();

    for path in paths {
        match std::fs::remove_file(&path) {
            Ok(()) => report.removed.push(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Tile {} already gone", path.display());
            }
            Err(error) => {
                warn!("Could not remove {}: {}", path.display(), error);
                report.failed.push(CleanupFailure { path, error });
            }
        }
    }

    report
}

/// Remove tiles left behind in `dir` by an assembly that never finished.
///
/// Only files named like `tile_{row}_{col}.jpg` are touched. A missing
/// directory is not an error.
pub async fn cleanup_stale_tiles(dir: impl AsRef<Path>) -> Result<CleanupReport> {
    let dir = dir.as_ref();
    let mut report = CleanupReport::default();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if !name.to_str().is_some_and(is_tile_file_name) {
            continue;
        }
        let path = entry.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => report.removed.push(path),
            Err(error) => {
                warn!("Could not remove {}: {}", path.display(), error);
                report.failed.push(CleanupFailure { path, error });
            }
        }
    }

    Ok(report)
}

/// Empty and recreate each directory.
///
/// Files that cannot be removed (in use, permission denied) are skipped and
/// reported; the directories exist and are writable afterwards unless
/// recreating one of them fails.
pub async fn reset_workspace(dirs: &[impl AsRef<Path>]) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();

    for dir in dirs {
        let dir = dir.as_ref();
        if tokio::fs::try_exists(dir).await? {
            remove_tree_files(dir, &mut report).await;
            if let Err(error) = tokio::fs::remove_dir_all(dir).await {
                warn!("Could not remove {}: {}", dir.display(), error);
                report.failed.push(CleanupFailure {
                    path: dir.to_path_buf(),
                    error,
                });
            }
        }
        tokio::fs::create_dir_all(dir).await?;
    }

    Ok(report)
}

/// Remove every file below `root`, leaving the directory structure
async fn remove_tree_files(root: &Path, report: &mut CleanupReport) {
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(error) => {
                warn!("Could not read {}: {}", dir.display(), error);
                report.failed.push(CleanupFailure { path: dir, error });
                continue;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(error) => {
                    warn!("Could not list {}: {}", dir.display(), error);
                    break;
                }
            };
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .await
                .map(|kind| kind.is_dir())
                .unwrap_or(false);

            if is_dir {
                pending.push(path);
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => report.removed.push(path),
                Err(error) => {
                    warn!("Could not remove {}: {}", path.display(), error);
                    report.failed.push(CleanupFailure { path, error });
                }
            }
        }
    }
}
