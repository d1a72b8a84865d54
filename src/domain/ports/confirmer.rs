//! Confirmer Port
//!
//! Destructive or risky actions ask for a yes/no decision through this trait.
//! Implementations can be interactive (prompting the operator) or a fixed
//! policy for batch use.

use crate::error::{KeelError, KeelResult};

/// Trait for obtaining a yes/no confirmation.
///
/// Implementations can be:
/// - `LineConfirmer`: reads answers line by line from any reader
/// - `TerminalConfirmer`: dialoguer prompt on a TTY
/// - `AssumeYes` / `AssumeNo` / `FailFast`: fixed policies
pub trait Confirmer {
    /// Ask `prompt` and return `true` for an affirmative answer.
    ///
    /// An `Err` means no answer can be obtained at all; a negative answer
    /// is `Ok(false)`.
    fn confirm(&self, prompt: &str) -> KeelResult<bool>;
}

/// Always answers yes.
///
/// Use this when `--yes` is passed.
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, _prompt: &str) -> KeelResult<bool> {
        Ok(true)
    }
}

/// Always answers no.
pub struct AssumeNo;

impl Confirmer for AssumeNo {
    fn confirm(&self, _prompt: &str) -> KeelResult<bool> {
        Ok(false)
    }
}

/// Refuses to answer.
///
/// Use this for non-interactive callers that must never be blocked.
pub struct FailFast;

impl Confirmer for FailFast {
    fn confirm(&self, prompt: &str) -> KeelResult<bool> {
        Err(KeelError::ConfirmationUnavailable(format!(
            "'{}' requires confirmation; rerun with --yes or from a terminal",
            prompt
        )))
    }
}
