//! keepsync Core - Domain types and port definitions
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `Resolution`, `ConfirmationAnswer`, `ConfirmationRequest`, `ConflictEntry`
//! - **Naming convention** - `DefaultConflictNaming` for keep-both conflict copies
//! - **Port definitions** - Traits for adapters: `ILocalFileSystem`, `IConfirmationService`,
//!   `IConflictNaming`, `ISolverObserver`
//! - **Configuration** - YAML-backed `Config` with validation and a builder
//!
//! # Architecture
//!
//! The domain module contains pure logic with no filesystem access.
//! Ports define trait interfaces that adapter crates implement.
//! The conflict solver in `keepsync-conflict` orchestrates them.

pub mod config;
pub mod domain;
pub mod ports;
