//! Local filesystem adapter (secondary/driven adapter)
//!
//! Implements [`ILocalFileSystem`] using `std::fs`.
//!
//! ## Design Decisions
//!
//! - **Atomic replace**: `rename_replace` is a single `rename(2)` call, which
//!   replaces an existing destination file in one step. Moving a directory
//!   onto an existing non-empty directory fails rather than merging.
//! - **Symlinks**: existence and directory checks use `symlink_metadata`, so
//!   a dangling link still occupies its name and a link to a directory is
//!   unlinked instead of having its target emptied.
//! - **Errors**: every failure carries the operation and path as context on
//!   top of the OS error, so the text shown to the user explains itself.

use std::path::Path;

use anyhow::Context;
use keepsync_core::ports::local_filesystem::ILocalFileSystem;
use tracing::{debug, instrument};

/// Adapter that bridges the [`ILocalFileSystem`] port to the real filesystem.
///
/// This is a zero-sized struct because all operations derive their context
/// from the path arguments.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystemAdapter;

impl LocalFileSystemAdapter {
    /// Create a new `LocalFileSystemAdapter`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ILocalFileSystem for LocalFileSystemAdapter {
    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn is_directory(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn remove(&self, path: &Path) -> anyhow::Result<()> {
        debug!("removing file");
        std::fs::remove_file(path)
            .with_context(|| format!("cannot remove {}", path.display()))
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn remove_recursively(&self, path: &Path) -> anyhow::Result<()> {
        debug!("removing directory tree");
        std::fs::remove_dir_all(path)
            .with_context(|| format!("cannot remove directory {}", path.display()))
    }

    #[instrument(skip(self), fields(from = %from.display(), to = %to.display()))]
    fn rename_replace(&self, from: &Path, to: &Path) -> anyhow::Result<()> {
        debug!("renaming");
        std::fs::rename(from, to).with_context(|| {
            format!("cannot rename {} to {}", from.display(), to.display())
        })
    }
}
