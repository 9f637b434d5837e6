//! Local filesystem port (driven/secondary port)
//!
//! This module defines the filesystem primitives the conflict solver
//! needs: existence checks, single and recursive removal, and an atomic
//! rename that replaces the destination.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because filesystem errors are adapter-specific.
//!   The error text is shown to the user verbatim, so adapters should keep
//!   the operating-system message in the error chain.
//! - The trait is synchronous: a resolution blocks until the filesystem
//!   has answered, and the caller is expected to run it off any UI thread.

use std::path::Path;

/// Port trait for local filesystem operations
///
/// ## Implementation Notes
///
/// - `exists` must return true for any entry occupying the name, including
///   dangling symlinks, since it guards rename targets.
/// - `is_directory` must not follow symlinks: a symlink to a directory is
///   removed with `remove`, never traversed.
/// - `rename_replace` must be a single indivisible operation (POSIX
///   `rename(2)` semantics), not delete-then-create.
pub trait ILocalFileSystem: Send + Sync {
    /// Returns true if an entry exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Returns true if `path` is a directory (not following symlinks)
    fn is_directory(&self, path: &Path) -> bool;

    /// Removes a single non-directory entry
    ///
    /// # Errors
    /// Returns an error if the entry cannot be removed
    fn remove(&self, path: &Path) -> anyhow::Result<()>;

    /// Removes a directory and everything below it
    ///
    /// # Errors
    /// Returns an error if any part of the tree cannot be removed
    fn remove_recursively(&self, path: &Path) -> anyhow::Result<()>;

    /// Atomically moves `from` to `to`, replacing an existing `to`
    ///
    /// # Errors
    /// Returns an error if the rename fails; nothing is changed in that case
    fn rename_replace(&self, from: &Path, to: &Path) -> anyhow::Result<()>;
}
