//! Error types for the conflict solver

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during conflict resolution
///
/// Only filesystem-level failures are shown to the user. A missing path is
/// a caller bug and a declined prompt is the user's own choice, so both
/// end the resolution quietly.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// A required path is empty or the local entry does not exist
    #[error("precondition not met: {0}")]
    PreconditionUnmet(String),

    /// The user declined the deletion prompt
    #[error("deletion of {0:?} declined")]
    Declined(PathBuf),

    /// Moving an entry failed at the operating-system level
    #[error("Moving file failed:\n\n{source:#}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Removing an entry failed at the operating-system level
    #[error("Deleting {kind} failed:\n\n{source:#}")]
    RemoveFailed {
        path: PathBuf,
        kind: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// Every conflict name up to the configured cap is taken
    #[error("no free conflict name for {pattern} after {attempts} attempts")]
    NamesExhausted { pattern: String, attempts: u32 },

    /// Invalid glob pattern or strategy in a conflict rule
    #[error("invalid glob pattern: {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ConflictError {
    /// Returns true if the error should be surfaced to the user
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            ConflictError::RenameFailed { .. }
                | ConflictError::RemoveFailed { .. }
                | ConflictError::NamesExhausted { .. }
        )
    }
}
