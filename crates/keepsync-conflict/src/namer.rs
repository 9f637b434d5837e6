//! Conflict naming for keep-both resolution
//!
//! Picks the target name for a kept-aside local copy, following the
//! pattern `<stem>_conflict_N<.ext>` where `N` is the lowest free integer
//! starting at 1.

use std::path::{Path, PathBuf};

use keepsync_core::{domain::naming::ConflictBaseName, ports::naming::IConflictNaming};
use tracing::trace;

use crate::error::ConflictError;

/// Generates collision-free conflict file names
pub struct ConflictNamer;

impl ConflictNamer {
    /// Scans `N = 1, 2, ...` and returns the first candidate that does not exist
    ///
    /// The scan is contiguous: a gap below a taken number is reused. It
    /// gives up after `max_attempts` candidates.
    pub fn first_free<F>(
        base: &ConflictBaseName,
        mut exists: F,
        max_attempts: u32,
    ) -> Result<PathBuf, ConflictError>
    where
        F: FnMut(&Path) -> bool,
    {
        for n in 1..=max_attempts {
            let candidate = base.candidate(n);
            if !exists(&candidate) {
                return Ok(candidate);
            }
            trace!(candidate = %candidate.display(), "Conflict name taken");
        }

        Err(ConflictError::NamesExhausted {
            pattern: base.pattern(),
            attempts: max_attempts,
        })
    }

    /// Derives the conflict base name of `path` and finds the first free target
    pub fn generate_unique<F>(
        naming: &dyn IConflictNaming,
        path: &Path,
        exists: F,
        max_attempts: u32,
    ) -> Result<PathBuf, ConflictError>
    where
        F: FnMut(&Path) -> bool,
    {
        let base = naming.conflict_base_name(path);
        Self::first_free(&base, exists, max_attempts)
    }
}
