//! CLI output: error mapping and the result of one routed command.

use crate::error::AdapterError;

/// Map adapter errors to a string for CLI output.
pub fn map_error(e: &AdapterError) -> String {
    match e {
        AdapterError::Binding(_) | AdapterError::Selector(_) => {
            format!("{}\nUse --help on the operation to list its parameters.", e)
        }
        _ => e.to_string(),
    }
}

/// What a routed command produced. The binary decides how to print it and
/// which exit status to use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Printed to stdout when non-empty
    pub stdout: String,
    /// Printed to stderr when present
    pub stderr: Option<String>,
    /// The remote operation failed
    pub failed: bool,
}

impl CommandOutput {
    pub fn text(stdout: String) -> Self {
        Self {
            stdout,
            ..Self::default()
        }
    }

    pub fn notice(message: &str) -> Self {
        Self {
            stderr: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            stdout: String::new(),
            stderr: Some(message),
            failed: true,
        }
    }
}
