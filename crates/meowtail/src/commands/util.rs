//! Shared helpers for command handlers.

use std::io::IsTerminal;

use meowtail_core::Confirm;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Terminal-backed [`Confirm`] for destructive actions.
///
/// Without `--yes` and without a terminal to ask on, the answer is no.
pub struct PromptConfirm {
    pub yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.yes {
            return true;
        }
        if !std::io::stdin().is_terminal() {
            tracing::warn!("no terminal to confirm on; pass --yes to skip the prompt");
            return false;
        }
        confirm(prompt, false).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "confirmation prompt failed");
            false
        })
    }
}
