//! Shell completion scripts for `keepsync`
//!
//! Printed to stdout by default, or written into `--dir` under the file
//! name the shell expects (`keepsync.bash`, `_keepsync`, `keepsync.fish`, ...).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, clap::Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory instead of stdout
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn execute(&self, format: OutputFormat) -> Result<()> {
        let mut cmd = crate::Cli::command();
        let bin = cmd.get_name().to_string();

        let Some(dir) = &self.dir else {
            clap_complete::generate(self.shell, &mut cmd, bin, &mut std::io::stdout());
            return Ok(());
        };

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let written = clap_complete::generate_to(self.shell, &mut cmd, bin, dir)
            .with_context(|| format!("Failed to write {} completions", self.shell))?;

        let formatter = get_formatter(format);
        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "shell": self.shell.to_string(),
                "path": written.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Wrote {}", written.display()));
        }
        Ok(())
    }
}
