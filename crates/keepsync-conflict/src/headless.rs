//! Non-interactive confirmation adapter
//!
//! Implements [`IConfirmationService`] for hosts without a user to ask,
//! such as batch migrations or scripted runs. Every prompt gets the same
//! configured answer; error reports go to the log and are kept in memory
//! so the host can print a summary afterwards.

use std::sync::Mutex;

use tracing::{error, info};

use keepsync_core::{
    domain::conflict::{ConfirmationAnswer, ConfirmationRequest},
    ports::confirmation::IConfirmationService,
};

/// Answers every confirmation with a fixed answer
#[derive(Debug)]
pub struct HeadlessConfirmation {
    answer: ConfirmationAnswer,
    reports: Mutex<Vec<String>>,
}

impl HeadlessConfirmation {
    pub fn new(answer: ConfirmationAnswer) -> Self {
        Self {
            answer,
            reports: Mutex::new(Vec::new()),
        }
    }

    /// Approves everything with "yes to all"
    pub fn approve_all() -> Self {
        Self::new(ConfirmationAnswer::YesToAll)
    }

    /// Declines every destructive operation
    pub fn decline_all() -> Self {
        Self::new(ConfirmationAnswer::No)
    }

    /// Messages passed to `report_error` so far
    pub fn reports(&self) -> Vec<String> {
        self.reports
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl IConfirmationService for HeadlessConfirmation {
    fn ask_yes_no(&self, request: &ConfirmationRequest) -> ConfirmationAnswer {
        let answer = self.answer;
        info!(
            path = %request.path.display(),
            answer = %answer,
            "Answered confirmation without prompting"
        );
        answer
    }

    fn report_error(&self, title: &str, message: &str) {
        error!(title = %title, "{message}");
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(message.to_string());
        }
    }
}
