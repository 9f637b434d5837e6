//! Resolve command - Resolve a single local/remote conflict
//!
//! Provides the `keepsync resolve` CLI command which applies one of the
//! three strategies to a local entry:
//! 1. `keep_local`: move the local entry over the remote path
//! 2. `keep_remote`: delete the local entry (after confirmation)
//! 3. `keep_both`: move the local entry aside under a conflict name

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use tracing::info;

use keepsync_conflict::{ConflictError, ConflictSolver, Outcome};
use keepsync_core::domain::conflict::Resolution;
use keepsync_fs::LocalFileSystemAdapter;

use super::{absolutize, confirmation_service, AppContext};
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the resolve subcommand
#[derive(Debug, clap::Args)]
pub struct ResolveCommand {
    /// Local conflicting file or directory
    #[arg(long)]
    pub local: PathBuf,

    /// Path occupied by the remote version (required for keep_local)
    #[arg(long)]
    pub remote: Option<PathBuf>,

    /// Resolution strategy: keep_local, keep_remote, keep_both (or local, remote, both)
    #[arg(long)]
    pub strategy: Resolution,

    /// Offer "yes to all" in the deletion prompt
    #[arg(long)]
    pub bulk: bool,

    /// Approve deletions without prompting
    #[arg(short, long)]
    pub yes: bool,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(format);
        let config = ctx.load_config()?;

        if self.strategy.requires_remote_path() && self.remote.is_none() {
            bail!("--remote is required for strategy '{}'", self.strategy);
        }

        let local = absolutize(&self.local)?;
        let remote = self.remote.as_deref().map(absolutize).transpose()?;

        let mut solver = ConflictSolver::from_config(
            Arc::new(LocalFileSystemAdapter::new()),
            confirmation_service(self.yes),
            &config.conflicts,
        );
        solver.set_bulk_operation(self.bulk);
        solver.set_local_path(&local);
        if let Some(remote) = &remote {
            solver.set_remote_path(remote);
        }

        info!(
            local = %local.display(),
            strategy = %self.strategy,
            "Resolving conflict"
        );

        match solver.try_resolve(self.strategy) {
            Ok(outcome) => {
                if format.is_json() {
                    let json = serde_json::json!({
                        "resolved": true,
                        "strategy": self.strategy,
                        "local": local.display().to_string(),
                        "outcome": outcome,
                    });
                    formatter.print_json(&json);
                } else {
                    formatter.success(&describe(&outcome, &local));
                }
                Ok(())
            }
            Err(ConflictError::Declined(path)) => {
                if format.is_json() {
                    let json = serde_json::json!({
                        "resolved": false,
                        "declined": true,
                        "local": path.display().to_string(),
                    });
                    formatter.print_json(&json);
                } else {
                    formatter.warn(&format!(
                        "Deletion of {} declined, nothing changed",
                        path.display()
                    ));
                }
                Ok(())
            }
            // The message already carries the OS error text
            Err(e) => Err(anyhow!("{e}")),
        }
    }
}

/// One-line summary of what a resolution did
fn describe(outcome: &Outcome, local: &std::path::Path) -> String {
    match outcome {
        Outcome::Overwritten { remote } => format!(
            "Kept local version: {} now replaces {}",
            local.display(),
            remote.display()
        ),
        Outcome::Deleted { recursive: true } => format!(
            "Kept remote version: deleted directory {}",
            local.display()
        ),
        Outcome::Deleted { recursive: false } => {
            format!("Kept remote version: deleted file {}", local.display())
        }
        Outcome::Renamed { target } => format!(
            "Kept both versions: local copy moved to {}",
            target.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn context(dir: &Path) -> AppContext {
        AppContext {
            config_path: dir.join("absent.yaml"),
            explicit: false,
        }
    }

    fn command(local: PathBuf, remote: Option<PathBuf>, strategy: Resolution) -> ResolveCommand {
        ResolveCommand {
            local,
            remote,
            strategy,
            bulk: false,
            yes: true,
        }
    }

    #[test]
    fn test_keep_both_renames_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("report.txt");
        std::fs::write(&local, "mine").unwrap();

        command(local.clone(), None, Resolution::KeepBoth)
            .execute(OutputFormat::Quiet, &context(dir.path()))
            .unwrap();

        assert!(!local.exists());
        assert!(dir.path().join("report_conflict_1.txt").exists());
    }

    #[test]
    fn test_keep_local_requires_remote() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("report.txt");
        std::fs::write(&local, "mine").unwrap();

        let err = command(local.clone(), None, Resolution::KeepLocal)
            .execute(OutputFormat::Quiet, &context(dir.path()))
            .unwrap_err();
        assert!(err.to_string().contains("--remote"));
        assert!(local.exists());
    }

    #[test]
    fn test_missing_local_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = command(dir.path().join("gone.txt"), None, Resolution::KeepRemote)
            .execute(OutputFormat::Quiet, &context(dir.path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_describe() {
        let local = Path::new("/a/x.txt");
        assert_eq!(
            describe(&Outcome::Deleted { recursive: false }, local),
            "Kept remote version: deleted file /a/x.txt"
        );
        assert_eq!(
            describe(
                &Outcome::Renamed {
                    target: PathBuf::from("/a/x_conflict_1.txt")
                },
                local
            ),
            "Kept both versions: local copy moved to /a/x_conflict_1.txt"
        );
    }
}
