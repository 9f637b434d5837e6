//! Conflict naming port
//!
//! The naming convention for conflict copies is owned outside the solver.
//! The solver only needs a pure mapping from a local path to the
//! conflict-marked stem and extension; see
//! [`DefaultConflictNaming`](crate::domain::naming::DefaultConflictNaming)
//! for the built-in convention.

use std::path::Path;

use crate::domain::naming::ConflictBaseName;

/// Port trait for the conflict-copy naming convention
pub trait IConflictNaming: Send + Sync {
    /// Maps `path` to its conflict-marked stem and final extension
    ///
    /// Must be pure: the same input always yields the same output and the
    /// filesystem is not consulted.
    fn conflict_base_name(&self, path: &Path) -> ConflictBaseName;
}
