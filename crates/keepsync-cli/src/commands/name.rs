//! Name command - Show where "keep both" would move an entry
//!
//! Runs the same name derivation and free-suffix scan as the resolver but
//! touches nothing on disk.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use keepsync_conflict::ConflictNamer;
use keepsync_core::{
    config::ConflictsConfig, domain::naming::DefaultConflictNaming,
    ports::local_filesystem::ILocalFileSystem,
};
use keepsync_fs::LocalFileSystemAdapter;

use super::{absolutize, AppContext};
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the name subcommand
#[derive(Debug, clap::Args)]
pub struct NameCommand {
    /// Local file or directory
    pub path: PathBuf,
}

impl NameCommand {
    /// Execute the name command
    pub fn execute(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(format);
        let config = ctx.load_config()?;
        let path = absolutize(&self.path)?;

        let target = conflict_target(&LocalFileSystemAdapter::new(), &path, &config.conflicts)?;

        if format.is_json() {
            let json = serde_json::json!({
                "path": path.display().to_string(),
                "target": target.display().to_string(),
            });
            formatter.print_json(&json);
        } else {
            println!("{}", target.display());
        }
        Ok(())
    }
}

fn conflict_target(
    filesystem: &dyn ILocalFileSystem,
    path: &Path,
    config: &ConflictsConfig,
) -> Result<PathBuf> {
    let naming = DefaultConflictNaming::with_marker(config.marker.clone());
    ConflictNamer::generate_unique(
        &naming,
        path,
        |candidate| filesystem.exists(candidate),
        config.max_rename_attempts,
    )
    .map_err(|e| anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_skips_existing_names() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("report.txt");
        std::fs::write(&local, "mine").unwrap();
        std::fs::write(dir.path().join("report_conflict_1.txt"), "old").unwrap();

        let target =
            conflict_target(&LocalFileSystemAdapter::new(), &local, &ConflictsConfig::default())
                .unwrap();
        assert_eq!(target, dir.path().join("report_conflict_2.txt"));
        assert!(local.exists());
    }

    #[test]
    fn test_target_uses_configured_marker() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConflictsConfig {
            marker: "_mine".to_string(),
            ..ConflictsConfig::default()
        };

        let target =
            conflict_target(&LocalFileSystemAdapter::new(), &dir.path().join("a.md"), &config)
                .unwrap();
        assert_eq!(target, dir.path().join("a_mine_1.md"));
    }

    #[test]
    fn test_exhausted_names_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_conflict_1.md"), "").unwrap();
        let config = ConflictsConfig {
            max_rename_attempts: 1,
            ..ConflictsConfig::default()
        };

        let err =
            conflict_target(&LocalFileSystemAdapter::new(), &dir.path().join("a.md"), &config)
                .unwrap_err();
        assert!(err.to_string().contains("after 1 attempts"));
    }
}
