//! keepsync Conflict - Conflict resolution
//!
//! Provides:
//! - `ConflictSolver`: keep local, keep remote, or keep both for one conflict
//! - Collision-free naming for kept-aside local copies
//! - Batch resolution with "yes to all" carried across items
//! - Glob-based policy rules for picking a strategy automatically
//! - A headless confirmation adapter for non-interactive hosts

pub mod error;
pub mod headless;
pub mod namer;
pub mod policy;
pub mod solver;

pub use error::ConflictError;
pub use headless::HeadlessConfirmation;
pub use namer::ConflictNamer;
pub use policy::PolicyEngine;
pub use solver::{BatchResult, ConflictSolver, Outcome};
