//! Config command - View and manage keepsync configuration
//!
//! Provides the `keepsync config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON)
//! 2. Validates the configuration file, including conflict rule globs
//! 3. Prints the configuration file location
//! 4. Writes a default configuration file

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use tracing::info;

use keepsync_conflict::policy::validate_rule;
use keepsync_core::config::{Config, ValidationError};

use super::AppContext;
use crate::output::{get_formatter, OutputFormat};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl ConfigCommand {
    /// Execute the config command
    pub fn execute(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, ctx),
            ConfigCommand::Validate => self.execute_validate(format, ctx),
            ConfigCommand::Path => self.execute_path(format, ctx),
            ConfigCommand::Init { force } => self.execute_init(*force, format, ctx),
        }
    }

    /// Show current configuration
    fn execute_show(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(format);
        let config = ctx.load_config()?;

        info!(config_path = %ctx.config_path.display(), "Showing configuration");

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", ctx.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    /// Validate configuration file
    fn execute_validate(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(format);
        let config_path = &ctx.config_path;

        if !config_path.exists() {
            if format.is_json() {
                let json = serde_json::json!({
                    "valid": !ctx.explicit,
                    "config_path": config_path.display().to_string(),
                    "errors": ["Configuration file not found. Using defaults."],
                });
                formatter.print_json(&json);
            } else {
                formatter.info(&format!(
                    "Configuration file not found at {}",
                    config_path.display()
                ));
                formatter.info("Using default configuration. Run 'keepsync config init' to create one.");
            }
            if ctx.explicit {
                bail!("Configuration file not found: {}", config_path.display());
            }
            return Ok(());
        }

        // Load the file explicitly, not through load_config, to report parse errors
        let config = Config::load(config_path).with_context(|| {
            format!("Failed to parse configuration {}", config_path.display())
        })?;

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = collect_errors(&config);

        if format.is_json() {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            let json = serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            });
            formatter.print_json(&json);
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", config_path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        if !errors.is_empty() {
            bail!("Configuration is invalid");
        }
        Ok(())
    }

    fn execute_path(&self, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        if format.is_json() {
            let json = serde_json::json!({
                "config_path": ctx.config_path.display().to_string(),
                "exists": ctx.config_path.exists(),
            });
            get_formatter(format).print_json(&json);
        } else {
            println!("{}", ctx.config_path.display());
        }
        Ok(())
    }

    /// Write the default configuration
    fn execute_init(&self, force: bool, format: OutputFormat, ctx: &AppContext) -> Result<()> {
        let formatter = get_formatter(format);
        let config_path = &ctx.config_path;

        if config_path.exists() && !force {
            bail!(
                "{} already exists; use --force to overwrite",
                config_path.display()
            );
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create configuration directory")?;
        }

        let yaml = serde_yaml::to_string(&Config::default())
            .context("Failed to serialize configuration")?;
        std::fs::write(config_path, &yaml).context("Failed to write configuration file")?;

        info!(config_path = %config_path.display(), "Wrote default configuration");

        if format.is_json() {
            let json = serde_json::json!({
                "success": true,
                "config_path": config_path.display().to_string(),
            });
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Wrote {}", config_path.display()));
        }
        Ok(())
    }
}

/// Field-level validation plus glob syntax of every conflict rule
fn collect_errors(config: &Config) -> Vec<ValidationError> {
    let mut errors = config.validate();
    for (i, rule) in config.conflicts.rules.iter().enumerate() {
        if rule.pattern.is_empty() {
            continue;
        }
        if let Err(e) = validate_rule(rule) {
            let field = format!("conflicts.rules[{i}]");
            // Strategy problems are already reported by Config::validate
            if !errors.iter().any(|known| known.field.starts_with(&field)) {
                errors.push(ValidationError {
                    field,
                    message: e.to_string(),
                });
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use keepsync_core::config::ConfigBuilder;

    use super::*;

    fn context(path: &Path) -> AppContext {
        AppContext {
            config_path: path.to_path_buf(),
            explicit: true,
        }
    }

    #[test]
    fn test_collect_errors_reports_bad_glob() {
        let config = ConfigBuilder::new()
            .conflicts_rule("[oops", "keep_both")
            .conflicts_rule("**/*.tmp", "keep_remote")
            .build();

        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "conflicts.rules[0]");
    }

    #[test]
    fn test_collect_errors_does_not_duplicate_strategy_errors() {
        let config = ConfigBuilder::new()
            .conflicts_rule("**/*.tmp", "sometimes")
            .build();

        let errors = collect_errors(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "conflicts.rules[0].strategy");
    }

    #[test]
    fn test_init_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.yaml");
        let ctx = context(&path);

        ConfigCommand::Init { force: false }
            .execute(OutputFormat::Quiet, &ctx)
            .unwrap();
        assert!(path.exists());

        ConfigCommand::Validate
            .execute(OutputFormat::Quiet, &ctx)
            .unwrap();

        // A second init without --force must not clobber the file
        assert!(ConfigCommand::Init { force: false }
            .execute(OutputFormat::Quiet, &ctx)
            .is_err());
        ConfigCommand::Init { force: true }
            .execute(OutputFormat::Quiet, &ctx)
            .unwrap();
    }

    #[test]
    fn test_validate_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "logging:\n  level: loud\n").unwrap();

        assert!(ConfigCommand::Validate
            .execute(OutputFormat::Quiet, &context(&path))
            .is_err());
    }
}
