//! Domain error types
//!
//! Parse failures on user-supplied strategy and answer names.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown resolution strategy name
    #[error("Invalid strategy '{0}'; valid: keep_local, keep_remote, keep_both")]
    InvalidStrategy(String),

    /// Unknown confirmation answer name
    #[error("Invalid confirmation answer '{0}'; valid: yes, no, yes_to_all")]
    InvalidAnswer(String),
}
