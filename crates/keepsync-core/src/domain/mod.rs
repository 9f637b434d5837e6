//! Domain entities and business logic
//!
//! This module contains the core domain types for keepsync:
//! - Resolution strategies and confirmation answers
//! - The deletion confirmation request
//! - Batch conflict entries
//! - The default conflict-copy naming convention
//! - Domain-specific error types

pub mod conflict;
pub mod errors;
pub mod naming;

// Re-export commonly used types
pub use conflict::{ConfirmationAnswer, ConfirmationRequest, ConflictEntry, Resolution};
pub use errors::DomainError;
pub use naming::{ConflictBaseName, DefaultConflictNaming};
