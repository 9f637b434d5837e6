//! Conflict solver
//!
//! Applies a user-selected strategy to one local/remote conflict:
//! - `KeepLocal`: atomically move the local entry over the remote path
//! - `KeepRemote`: delete the local entry after confirmation
//! - `KeepBoth`: move the local entry aside under a free conflict name
//!
//! A solver is short-lived, but reusing one instance across a batch is how
//! a "yes to all" answer carries over to the remaining deletions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use keepsync_core::{
    config::{ConflictsConfig, DEFAULT_MAX_RENAME_ATTEMPTS},
    domain::{
        conflict::{ConfirmationAnswer, ConfirmationRequest, ConflictEntry, Resolution},
        naming::DefaultConflictNaming,
    },
    ports::{
        confirmation::IConfirmationService,
        local_filesystem::ILocalFileSystem,
        naming::IConflictNaming,
        observer::{ISolverObserver, SolverProperty},
    },
};

use crate::{error::ConflictError, namer::ConflictNamer};

/// Title used for every error shown to the user
const ERROR_TITLE: &str = "Error";

/// What a successful resolution did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    /// The local entry now lives at the remote path
    Overwritten { remote: PathBuf },
    /// The local entry was deleted
    Deleted { recursive: bool },
    /// The local entry was moved aside
    Renamed { target: PathBuf },
}

/// Result of a batch resolution operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub resolved: u32,
    pub failed: u32,
    pub declined: u32,
    pub skipped: u32,
    pub errors: Vec<String>,
}

/// Resolves a single conflict between a local entry and its remote version
pub struct ConflictSolver {
    filesystem: Arc<dyn ILocalFileSystem>,
    confirmation: Arc<dyn IConfirmationService>,
    naming: Arc<dyn IConflictNaming>,
    observers: Vec<Arc<dyn ISolverObserver>>,
    local_path: PathBuf,
    remote_path: PathBuf,
    is_bulk_operation: bool,
    yes_to_all_confirmed: bool,
    max_rename_attempts: u32,
}

impl ConflictSolver {
    pub fn new(
        filesystem: Arc<dyn ILocalFileSystem>,
        confirmation: Arc<dyn IConfirmationService>,
    ) -> Self {
        Self {
            filesystem,
            confirmation,
            naming: Arc::new(DefaultConflictNaming::default()),
            observers: Vec::new(),
            local_path: PathBuf::new(),
            remote_path: PathBuf::new(),
            is_bulk_operation: false,
            yes_to_all_confirmed: false,
            max_rename_attempts: DEFAULT_MAX_RENAME_ATTEMPTS,
        }
    }

    /// Creates a solver using the marker and suffix cap from configuration
    pub fn from_config(
        filesystem: Arc<dyn ILocalFileSystem>,
        confirmation: Arc<dyn IConfirmationService>,
        config: &ConflictsConfig,
    ) -> Self {
        Self::new(filesystem, confirmation)
            .with_naming(Arc::new(DefaultConflictNaming::with_marker(
                config.marker.clone(),
            )))
            .with_max_rename_attempts(config.max_rename_attempts)
    }

    /// Replaces the conflict-copy naming convention
    pub fn with_naming(mut self, naming: Arc<dyn IConflictNaming>) -> Self {
        self.naming = naming;
        self
    }

    /// Caps the `_N` suffix search used by `KeepBoth`
    pub fn with_max_rename_attempts(mut self, attempts: u32) -> Self {
        self.max_rename_attempts = attempts.max(1);
        self
    }

    /// Registers an observer for field changes
    pub fn subscribe(&mut self, observer: Arc<dyn ISolverObserver>) {
        self.observers.push(observer);
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn remote_path(&self) -> &Path {
        &self.remote_path
    }

    pub fn is_bulk_operation(&self) -> bool {
        self.is_bulk_operation
    }

    pub fn yes_to_all_confirmed(&self) -> bool {
        self.yes_to_all_confirmed
    }

    pub fn max_rename_attempts(&self) -> u32 {
        self.max_rename_attempts
    }

    pub fn set_local_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.local_path == path {
            return;
        }
        self.local_path = path;
        self.notify(SolverProperty::LocalPath);
    }

    pub fn set_remote_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.remote_path == path {
            return;
        }
        self.remote_path = path;
        self.notify(SolverProperty::RemotePath);
    }

    pub fn set_bulk_operation(&mut self, is_bulk: bool) {
        if self.is_bulk_operation == is_bulk {
            return;
        }
        self.is_bulk_operation = is_bulk;
        self.notify(SolverProperty::IsBulkOperation);
    }

    /// Sets the sticky "yes to all" flag
    ///
    /// Meant for carrying an earlier answer over from another solver. The
    /// solver itself only ever sets the flag, never clears it.
    pub fn set_yes_to_all_confirmed(&mut self, confirmed: bool) {
        if self.yes_to_all_confirmed == confirmed {
            return;
        }
        self.yes_to_all_confirmed = confirmed;
        self.notify(SolverProperty::YesToAllConfirmed);
    }

    fn notify(&self, property: SolverProperty) {
        for observer in &self.observers {
            observer.on_property_changed(property);
        }
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Applies `strategy` and reports whether it succeeded
    ///
    /// Filesystem failures are shown to the user through the confirmation
    /// service. Unmet preconditions and declined prompts return `false`
    /// without any report.
    pub fn resolve(&mut self, strategy: Resolution) -> bool {
        match self.try_resolve(strategy) {
            Ok(_) => true,
            Err(e) => {
                self.handle_failure(&e);
                false
            }
        }
    }

    /// Applies `strategy` and returns what happened
    ///
    /// Unlike [`resolve`](Self::resolve) nothing is reported to the user.
    pub fn try_resolve(&mut self, strategy: Resolution) -> Result<Outcome, ConflictError> {
        debug!(
            strategy = %strategy,
            local = %self.local_path.display(),
            remote = %self.remote_path.display(),
            "Resolving conflict"
        );

        match strategy {
            Resolution::KeepLocal => self.overwrite_remote_version(),
            Resolution::KeepRemote => self.delete_local_version(),
            Resolution::KeepBoth => self.rename_local_version(),
        }
    }

    /// Resolves every entry in order on this solver, in bulk mode
    ///
    /// Entries without a strategy ask `fallback`; if that returns `None`
    /// the entry is skipped. The bulk flag is restored afterwards, the
    /// "yes to all" flag is not.
    pub fn resolve_batch<F>(&mut self, entries: &[ConflictEntry], mut fallback: F) -> BatchResult
    where
        F: FnMut(&ConflictEntry) -> Option<Resolution>,
    {
        let was_bulk = self.is_bulk_operation;
        self.set_bulk_operation(true);

        let mut result = BatchResult::default();
        for entry in entries {
            let Some(strategy) = entry.strategy.or_else(|| fallback(entry)) else {
                debug!(path = %entry.local_path.display(), "No strategy for entry, skipping");
                result.skipped += 1;
                continue;
            };

            self.set_local_path(entry.local_path.clone());
            self.set_remote_path(entry.remote_path.clone().unwrap_or_default());

            match self.try_resolve(strategy) {
                Ok(_) => result.resolved += 1,
                Err(ConflictError::Declined(_)) => result.declined += 1,
                Err(e) => {
                    self.handle_failure(&e);
                    result.failed += 1;
                    result
                        .errors
                        .push(format!("{}: {e}", entry.local_path.display()));
                }
            }
        }

        self.set_bulk_operation(was_bulk);

        info!(
            resolved = result.resolved,
            failed = result.failed,
            declined = result.declined,
            skipped = result.skipped,
            "Batch resolution finished"
        );
        result
    }

    fn handle_failure(&self, error: &ConflictError) {
        if error.is_reportable() {
            warn!(error = %error, local = %self.local_path.display(), "Conflict resolution failed");
            self.confirmation
                .report_error(ERROR_TITLE, &error.to_string());
        } else {
            debug!(reason = %error, "Conflict left unresolved");
        }
    }

    fn require_local_path(&self) -> Result<(), ConflictError> {
        if self.local_path.as_os_str().is_empty() {
            return Err(ConflictError::PreconditionUnmet(
                "local path is empty".to_string(),
            ));
        }
        Ok(())
    }

    fn require_local_exists(&self) -> Result<(), ConflictError> {
        if !self.filesystem.exists(&self.local_path) {
            return Err(ConflictError::PreconditionUnmet(format!(
                "{} does not exist",
                self.local_path.display()
            )));
        }
        Ok(())
    }

    /// Keep local: move the local entry over the remote path
    fn overwrite_remote_version(&mut self) -> Result<Outcome, ConflictError> {
        self.require_local_path()?;
        if self.remote_path.as_os_str().is_empty() {
            return Err(ConflictError::PreconditionUnmet(
                "remote path is empty".to_string(),
            ));
        }
        self.require_local_exists()?;

        self.filesystem
            .rename_replace(&self.local_path, &self.remote_path)
            .map_err(|source| ConflictError::RenameFailed {
                from: self.local_path.clone(),
                to: self.remote_path.clone(),
                source,
            })?;

        info!(
            local = %self.local_path.display(),
            remote = %self.remote_path.display(),
            "Keep-local: remote version overwritten"
        );
        Ok(Outcome::Overwritten {
            remote: self.remote_path.clone(),
        })
    }

    /// Keep remote: delete the local entry once the user agrees
    fn delete_local_version(&mut self) -> Result<Outcome, ConflictError> {
        self.require_local_path()?;
        self.require_local_exists()?;

        let is_directory = self.filesystem.is_directory(&self.local_path);
        self.confirm_deletion(is_directory)?;

        let removal = if is_directory {
            self.filesystem.remove_recursively(&self.local_path)
        } else {
            self.filesystem.remove(&self.local_path)
        };
        removal.map_err(|source| ConflictError::RemoveFailed {
            path: self.local_path.clone(),
            kind: if is_directory { "directory" } else { "file" },
            source,
        })?;

        info!(
            local = %self.local_path.display(),
            recursive = is_directory,
            "Keep-remote: local version deleted"
        );
        Ok(Outcome::Deleted {
            recursive: is_directory,
        })
    }

    /// Keep both: move the local entry to the first free conflict name
    fn rename_local_version(&mut self) -> Result<Outcome, ConflictError> {
        self.require_local_path()?;
        self.require_local_exists()?;

        let target = ConflictNamer::generate_unique(
            self.naming.as_ref(),
            &self.local_path,
            |candidate| self.filesystem.exists(candidate),
            self.max_rename_attempts,
        )?;

        self.filesystem
            .rename_replace(&self.local_path, &target)
            .map_err(|source| ConflictError::RenameFailed {
                from: self.local_path.clone(),
                to: target.clone(),
                source,
            })?;

        info!(
            original = %self.local_path.display(),
            conflict_copy = %target.display(),
            "Keep-both: local version moved aside"
        );
        Ok(Outcome::Renamed { target })
    }

    /// Asks before a deletion unless "yes to all" was already given
    fn confirm_deletion(&mut self, is_directory: bool) -> Result<(), ConflictError> {
        if self.yes_to_all_confirmed {
            debug!(local = %self.local_path.display(), "Deletion pre-approved by yes to all");
            return Ok(());
        }

        let request =
            ConfirmationRequest::deletion(&self.local_path, is_directory, self.is_bulk_operation);
        let answer = self.confirmation.ask_yes_no(&request);
        if answer == ConfirmationAnswer::YesToAll {
            self.set_yes_to_all_confirmed(true);
        }
        if answer.is_affirmative() {
            Ok(())
        } else {
            Err(ConflictError::Declined(self.local_path.clone()))
        }
    }
}

impl std::fmt::Debug for ConflictSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictSolver")
            .field("local_path", &self.local_path)
            .field("remote_path", &self.remote_path)
            .field("is_bulk_operation", &self.is_bulk_operation)
            .field("yes_to_all_confirmed", &self.yes_to_all_confirmed)
            .field("max_rename_attempts", &self.max_rename_attempts)
            .finish()
    }
}
