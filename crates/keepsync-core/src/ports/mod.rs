//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! conflict solver. Ports are interfaces that the core depends on, but
//! whose implementations live in adapter crates or in the host.
//!
//! ## Ports Overview
//!
//! - [`ILocalFileSystem`] - Existence checks, removal, atomic rename-replace
//! - [`IConfirmationService`] - Deletion prompts and error reports
//! - [`IConflictNaming`] - Conflict-copy naming convention
//! - [`ISolverObserver`] - Change notification for solver fields

pub mod confirmation;
pub mod local_filesystem;
pub mod naming;
pub mod observer;

pub use confirmation::IConfirmationService;
pub use local_filesystem::ILocalFileSystem;
pub use naming::IConflictNaming;
pub use observer::{ISolverObserver, SolverProperty};
