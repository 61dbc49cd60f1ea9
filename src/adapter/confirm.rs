//! Confirmation gate for mutating operations.

use crate::error::AdapterError;

pub trait Confirmer: Send + Sync {
    /// Ask whether to proceed. `Ok(false)` aborts the invocation.
    fn confirm(&self, prompt: &str) -> Result<bool, AdapterError>;
}

/// Interactive prompt on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, AdapterError> {
        use dialoguer::Confirm;
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| AdapterError::Confirmation(format!("Failed to get user input: {}", e)))
    }
}

/// Fixed answer, for non-interactive hosts.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> Result<bool, AdapterError> {
        Ok(self.0)
    }
}

/// Prompt text naming the operation and, when known, its target.
pub fn prompt_for(service: &str, operation: &str, target: Option<&str>) -> String {
    match target {
        Some(target) => format!(
            "Performing {}:{} on target \"{}\". Continue?",
            service, operation, target
        ),
        None => format!("Performing {}:{}. Continue?", service, operation),
    }
}
