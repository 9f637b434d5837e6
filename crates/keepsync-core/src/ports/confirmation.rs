//! Confirmation service port (driving the user-facing surface)
//!
//! This module defines how the conflict solver talks to the user: a
//! blocking yes/no question before a destructive step, and a
//! fire-and-forget error report when a filesystem operation fails.
//!
//! ## Design Notes
//!
//! - `ask_yes_no` blocks until the user answers. Dismissing or closing the
//!   prompt must be reported as [`ConfirmationAnswer::No`].
//! - `report_error` never fails from the caller's point of view; an
//!   implementation that cannot display anything should log instead.
//! - Non-interactive embeddings implement this trait with a fixed answer
//!   (see `HeadlessConfirmation` in `keepsync-conflict`).

use crate::domain::conflict::{ConfirmationAnswer, ConfirmationRequest};

/// Port trait for user confirmation and error reporting
pub trait IConfirmationService: Send + Sync {
    /// Asks the user a yes/no question
    ///
    /// [`ConfirmationAnswer::YesToAll`] is only a valid answer when
    /// `request.allow_yes_to_all` is set.
    fn ask_yes_no(&self, request: &ConfirmationRequest) -> ConfirmationAnswer;

    /// Shows an error to the user
    ///
    /// # Arguments
    /// * `title` - Short title, e.g. "Error"
    /// * `message` - Full text including the underlying failure description
    fn report_error(&self, title: &str, message: &str);
}
