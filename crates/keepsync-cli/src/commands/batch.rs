//! Batch command - Resolve many conflicts listed in a file
//!
//! The file is a YAML or JSON list of entries:
//!
//! ```yaml
//! - local_path: /home/u/Documents/report.docx
//!   strategy: keep_both
//! - local_path: /home/u/Documents/notes.md
//!   remote_path: /home/u/Documents/notes (remote).md
//!   strategy: keep_local
//! - local_path: /home/u/Downloads/setup.tmp
//! ```
//!
//! Relative paths are resolved against the batch file's directory.
//! Entries without a strategy use `--strategy`, or else the configured
//! conflict rules, matched relative to that same directory (a rule
//! `Documents/**` covers `<batch dir>/Documents/...`). All entries share
//! one solver in bulk mode, so a single "yes to all" covers the remaining
//! deletions.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use keepsync_conflict::{ConflictSolver, PolicyEngine};
use keepsync_core::domain::conflict::{ConflictEntry, Resolution};
use keepsync_fs::LocalFileSystemAdapter;

use super::{absolutize, confirmation_service, AppContext};
use crate::output::{get_formatter, OutputFormat};

/// Arguments for the batch subcommand
#[derive(Debug, clap::Args)]
pub struct BatchCommand {
    /// YAML or JSON file listing the conflicts
    pub file: PathBuf,

    /// Strategy for entries that do not name one (overrides configured rules)
    #[arg(long)]
    pub strategy: Option<Resolution>,

    /// Approve deletions without prompting
    #[arg(short, long)]
    pub yes: bool,
}

impl BatchCommand {
    /// Execute the batch command
    pub fn execute(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(format);
        let config = ctx.load_config()?;

        let file = absolutize(&self.file)?;
        let root = file.parent().map(Path::to_path_buf).unwrap_or_default();

        let entries: Vec<ConflictEntry> = load_entries(&file)?
            .into_iter()
            .map(|mut entry| {
                entry.local_path = root.join(&entry.local_path);
                entry.remote_path = entry.remote_path.map(|remote| root.join(remote));
                entry
            })
            .collect();

        info!(
            file = %file.display(),
            entries = entries.len(),
            "Resolving conflict batch"
        );

        let policy = PolicyEngine::from_config(&config.conflicts);
        let mut solver = ConflictSolver::from_config(
            Arc::new(LocalFileSystemAdapter::new()),
            confirmation_service(self.yes),
            &config.conflicts,
        );

        let result = solver.resolve_batch(&entries, |entry| {
            self.strategy
                .or_else(|| policy.evaluate_in(&entry.local_path, &root))
        });

        if format.is_json() {
            let json = serde_json::json!({
                "total": entries.len(),
                "result": result,
            });
            formatter.print_json(&json);
        } else {
            formatter.success(&format!(
                "Resolved {} of {} conflict{}",
                result.resolved,
                entries.len(),
                if entries.len() == 1 { "" } else { "s" }
            ));
            if result.declined > 0 {
                formatter.info(&format!("Declined: {}", result.declined));
            }
            if result.skipped > 0 {
                formatter.info(&format!(
                    "Skipped (no strategy): {}",
                    result.skipped
                ));
            }
        }

        if result.failed > 0 {
            bail!(
                "{} conflict{} could not be resolved",
                result.failed,
                if result.failed == 1 { "" } else { "s" }
            );
        }
        Ok(())
    }
}

/// Reads the entry list; `.json` files are JSON, anything else is YAML
fn load_entries(path: &Path) -> Result<Vec<ConflictEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse batch file {}", path.display()))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse batch file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &Path) -> AppContext {
        AppContext {
            config_path: dir.join("absent.yaml"),
            explicit: false,
        }
    }

    #[test]
    fn test_load_yaml_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("batch.yaml");
        std::fs::write(
            &file,
            "- local_path: /a/x.txt\n  strategy: keep_both\n- local_path: /a/y.txt\n",
        )
        .unwrap();

        let entries = load_entries(&file).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].strategy, Some(Resolution::KeepBoth));
        assert_eq!(entries[1].strategy, None);
        assert_eq!(entries[1].remote_path, None);
    }

    #[test]
    fn test_load_json_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("batch.json");
        std::fs::write(
            &file,
            r#"[{"local_path": "/a/x.txt", "remote_path": "/a/x (remote).txt", "strategy": "keep_local"}]"#,
        )
        .unwrap();

        let entries = load_entries(&file).unwrap();
        assert_eq!(entries[0].remote_path, Some(PathBuf::from("/a/x (remote).txt")));
        assert_eq!(entries[0].strategy, Some(Resolution::KeepLocal));
    }

    #[test]
    fn test_malformed_batch_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("batch.yaml");
        std::fs::write(&file, "local_path: [unterminated").unwrap();
        assert!(load_entries(&file).is_err());
    }

    #[test]
    fn test_batch_applies_cli_strategy_to_unlabelled_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "a").unwrap();
        std::fs::write(&b, "b").unwrap();

        let file = dir.path().join("batch.yaml");
        std::fs::write(
            &file,
            format!(
                "- local_path: {}\n  strategy: keep_both\n- local_path: {}\n",
                a.display(),
                b.display()
            ),
        )
        .unwrap();

        let cmd = BatchCommand {
            file,
            strategy: Some(Resolution::KeepRemote),
            yes: true,
        };
        cmd.execute(OutputFormat::Quiet, &context(dir.path())).unwrap();

        assert!(dir.path().join("a_conflict_1.txt").exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_batch_matches_rules_relative_to_batch_file() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("Documents");
        std::fs::create_dir(&docs).unwrap();
        std::fs::write(docs.join("report.docx"), "r").unwrap();
        std::fs::write(docs.join("notes.md"), "n").unwrap();
        std::fs::write(dir.path().join("other.md"), "o").unwrap();

        let config_path = dir.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "conflicts:\n  rules:\n    - pattern: \"Documents/**\"\n      strategy: keep_both\n",
        )
        .unwrap();

        let file = dir.path().join("batch.yaml");
        std::fs::write(
            &file,
            format!(
                "- local_path: Documents/report.docx\n- local_path: {}\n- local_path: other.md\n",
                docs.join("notes.md").display()
            ),
        )
        .unwrap();

        let ctx = AppContext {
            config_path,
            explicit: true,
        };
        let cmd = BatchCommand {
            file,
            strategy: None,
            yes: true,
        };
        cmd.execute(OutputFormat::Quiet, &ctx).unwrap();

        assert!(docs.join("report_conflict_1.docx").exists());
        assert!(docs.join("notes_conflict_1.md").exists());
        // No rule covers it and the default is manual
        assert!(dir.path().join("other.md").exists());
    }

    #[test]
    fn test_batch_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, "a").unwrap();

        let file = dir.path().join("batch.yaml");
        std::fs::write(
            &file,
            format!(
                "- local_path: {}\n  remote_path: {}\n  strategy: keep_local\n",
                a.display(),
                dir.path().join("missing/a.txt").display()
            ),
        )
        .unwrap();

        let cmd = BatchCommand {
            file,
            strategy: None,
            yes: true,
        };
        let err = cmd
            .execute(OutputFormat::Quiet, &context(dir.path()))
            .unwrap_err();
        assert!(err.to_string().contains("1 conflict could not be resolved"));
        assert!(a.exists());
    }
}
