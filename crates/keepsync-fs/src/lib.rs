//! keepsync FS - Local filesystem adapter
//!
//! ## Modules
//!
//! - [`filesystem`] - `ILocalFileSystem` on top of `std::fs` (atomic rename-replace,
//!   symlink-aware existence and directory checks)

pub mod filesystem;

pub use filesystem::LocalFileSystemAdapter;
