//! Terminal confirmation surface
//!
//! Implements [`IConfirmationService`] with `dialoguer` prompts on stderr.
//! A prompt that cannot be shown (no terminal, interrupted input) counts as
//! "no", so nothing is deleted without an explicit answer.

use dialoguer::Select;
use tracing::warn;

use keepsync_core::{
    domain::conflict::{ConfirmationAnswer, ConfirmationRequest},
    ports::confirmation::IConfirmationService,
};

const YES: &str = "Yes";
const NO: &str = "No";
const YES_TO_ALL: &str = "Yes to all";

/// Asks the user on the terminal
#[derive(Debug, Default)]
pub struct InteractiveConfirmation;

impl InteractiveConfirmation {
    pub fn new() -> Self {
        Self
    }
}

/// Choices shown for a request, in display order
fn choices(request: &ConfirmationRequest) -> Vec<&'static str> {
    let mut items = vec![YES, NO];
    if request.allow_yes_to_all {
        items.push(YES_TO_ALL);
    }
    items
}

/// Maps the selected label back to an answer; no selection means "no"
fn answer_for(choice: Option<&str>) -> ConfirmationAnswer {
    match choice {
        Some(YES) => ConfirmationAnswer::Yes,
        Some(YES_TO_ALL) => ConfirmationAnswer::YesToAll,
        _ => ConfirmationAnswer::No,
    }
}

impl IConfirmationService for InteractiveConfirmation {
    fn ask_yes_no(&self, request: &ConfirmationRequest) -> ConfirmationAnswer {
        let items = choices(request);
        eprintln!("{}", request.title);

        let selection = Select::new()
            .with_prompt(request.message.as_str())
            .items(&items)
            .default(1)
            .interact_opt();

        match selection {
            Ok(index) => answer_for(index.and_then(|i| items.get(i).copied())),
            Err(e) => {
                warn!(error = %e, path = %request.path.display(), "Confirmation prompt unavailable, declining");
                ConfirmationAnswer::No
            }
        }
    }

    fn report_error(&self, title: &str, message: &str) {
        eprintln!("\u{2717} {}: {}", title, message);
    }
}
