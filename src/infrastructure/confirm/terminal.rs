//! Terminal confirmer backed by dialoguer

use std::fmt;

use dialoguer::theme::Theme;
use dialoguer::Confirm;

use crate::domain::ports::Confirmer;
use crate::error::{KeelError, KeelResult};

/// Interactive yes/no prompt on the controlling terminal.
///
/// Enter accepts the default (yes). Keys other than `y`/`n` are ignored
/// until one of them or Enter is pressed.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl TerminalConfirmer {
    pub fn new() -> Self {
        Self
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> KeelResult<bool> {
        Confirm::with_theme(&PromptTheme)
            .with_prompt(prompt)
            .default(true)
            .wait_for_newline(true)
            .interact()
            .map_err(|e| KeelError::ConfirmationUnavailable(e.to_string()))
    }
}

/// Renders the question the same way as the line prompt, `<prompt> (Y/n): `.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptTheme;

impl Theme for PromptTheme {
    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        let choices = match default {
            Some(true) => "(Y/n)",
            Some(false) => "(y/N)",
            None => "(y/n)",
        };
        write!(f, "{} {}: ", prompt, choices)
    }
}
