//! Conflict domain entities
//!
//! This module defines the value types exchanged between the conflict
//! solver and its collaborators: the chosen strategy, the question put to
//! the user before a destructive step, and the user's answer.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// How a conflict should be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Keep the local version, overwriting remote
    KeepLocal,
    /// Keep the remote version, deleting local
    KeepRemote,
    /// Keep both versions (rename local to a free conflict name)
    KeepBoth,
}

impl Resolution {
    /// All strategies, in the order they are usually offered to a user
    pub const ALL: [Resolution; 3] = [
        Resolution::KeepLocal,
        Resolution::KeepRemote,
        Resolution::KeepBoth,
    ];

    /// Returns true if this strategy needs a remote path to act on
    pub fn requires_remote_path(&self) -> bool {
        matches!(self, Resolution::KeepLocal)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Resolution::KeepLocal => "keep_local",
            Resolution::KeepRemote => "keep_remote",
            Resolution::KeepBoth => "keep_both",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Resolution {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "keep_local" | "local" => Ok(Resolution::KeepLocal),
            "keep_remote" | "remote" => Ok(Resolution::KeepRemote),
            "keep_both" | "both" => Ok(Resolution::KeepBoth),
            _ => Err(DomainError::InvalidStrategy(s.to_string())),
        }
    }
}

/// The user's answer to a deletion confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationAnswer {
    /// Proceed with this one item
    Yes,
    /// Do not proceed (also covers dismissing the prompt)
    No,
    /// Proceed with this item and every later one of the same batch
    YesToAll,
}

impl ConfirmationAnswer {
    /// Returns true for any affirmative answer
    pub fn is_affirmative(&self) -> bool {
        !matches!(self, ConfirmationAnswer::No)
    }
}

impl std::fmt::Display for ConfirmationAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfirmationAnswer::Yes => "yes",
            ConfirmationAnswer::No => "no",
            ConfirmationAnswer::YesToAll => "yes_to_all",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ConfirmationAnswer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "yes" | "y" => Ok(ConfirmationAnswer::Yes),
            "no" | "n" => Ok(ConfirmationAnswer::No),
            "yes_to_all" | "all" => Ok(ConfirmationAnswer::YesToAll),
            _ => Err(DomainError::InvalidAnswer(s.to_string())),
        }
    }
}

/// A yes/no question put to the user before a destructive operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    /// Short title of the prompt
    pub title: String,
    /// Full question text
    pub message: String,
    /// The entry the question is about
    pub path: PathBuf,
    /// Whether the entry is a directory (deletion would be recursive)
    pub is_directory: bool,
    /// Whether "yes to all" may be offered
    pub allow_yes_to_all: bool,
}

impl ConfirmationRequest {
    /// Builds the deletion question for `path`
    ///
    /// The message names the entry itself (its last path component).
    pub fn deletion(path: impl Into<PathBuf>, is_directory: bool, allow_yes_to_all: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let message = if is_directory {
            format!("Do you want to delete the directory {name} and all its contents permanently?")
        } else {
            format!("Do you want to delete the file {name} permanently?")
        };

        Self {
            title: "Confirm deletion".to_string(),
            message,
            path,
            is_directory,
            allow_yes_to_all,
        }
    }
}

/// One conflict to resolve, as supplied by a batch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    /// The local conflicting file or directory
    pub local_path: PathBuf,
    /// Where the remote version lives; only needed for `keep_local`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_path: Option<PathBuf>,
    /// Strategy for this entry; falls back to policy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Resolution>,
}

impl ConflictEntry {
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
            remote_path: None,
            strategy: None,
        }
    }

    pub fn with_remote(mut self, remote_path: impl Into<PathBuf>) -> Self {
        self.remote_path = Some(remote_path.into());
        self
    }

    pub fn with_strategy(mut self, strategy: Resolution) -> Self {
        self.strategy = Some(strategy);
        self
    }
}
