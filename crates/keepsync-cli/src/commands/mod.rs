pub mod batch;
pub mod completions;
pub mod config;
pub mod name;
pub mod resolve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use keepsync_conflict::HeadlessConfirmation;
use keepsync_core::{config::Config, ports::confirmation::IConfirmationService};

use crate::prompt::InteractiveConfirmation;

/// Where the configuration comes from and how strictly to load it
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config_path: PathBuf,
    /// Set when the path was given with `--config`
    pub explicit: bool,
}

impl AppContext {
    pub fn new(config: Option<&str>) -> Self {
        match config {
            Some(path) => Self {
                config_path: PathBuf::from(path),
                explicit: true,
            },
            None => Self {
                config_path: Config::default_path(),
                explicit: false,
            },
        }
    }

    /// Loads and validates the configuration
    ///
    /// A missing default file means defaults; a missing `--config` file is
    /// an error.
    pub fn load_config(&self) -> Result<Config> {
        let config = if self.explicit || self.config_path.exists() {
            Config::load(&self.config_path).with_context(|| {
                format!(
                    "Failed to load configuration from {}",
                    self.config_path.display()
                )
            })?
        } else {
            Config::default()
        };

        let errors = config.validate();
        if !errors.is_empty() {
            let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            bail!(
                "Invalid configuration ({}): {}",
                self.config_path.display(),
                details.join("; ")
            );
        }
        Ok(config)
    }
}

/// Picks the confirmation surface: prompt the user, or approve everything
pub fn confirmation_service(assume_yes: bool) -> Arc<dyn IConfirmationService> {
    if assume_yes {
        Arc::new(HeadlessConfirmation::approve_all())
    } else {
        Arc::new(InteractiveConfirmation::new())
    }
}

/// Makes `path` absolute against the current directory
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}
