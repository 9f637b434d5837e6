//! Solver observer port
//!
//! Lets a host (for instance a UI binding) follow changes to a solver's
//! settable fields without polling.

use serde::{Deserialize, Serialize};

/// A settable field of the conflict solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverProperty {
    LocalPath,
    RemotePath,
    IsBulkOperation,
    YesToAllConfirmed,
}

/// Observer for solver field changes
///
/// Called only when a value actually changes, after the new value is stored.
pub trait ISolverObserver: Send + Sync {
    fn on_property_changed(&self, property: SolverProperty);
}
