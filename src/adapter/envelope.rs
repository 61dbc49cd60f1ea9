//! Output Envelope: either the selected payload or a captured error.

use crate::error::{AdapterError, ClientError};
use serde::Serialize;
use serde_json::Value;

/// Error captured at the invocation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedError {
    pub service: String,
    pub operation: String,
    /// endpoint, service, protocol or runtime
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

impl CapturedError {
    pub fn capture(service: &str, operation: &str, err: &AdapterError) -> Self {
        let (kind, code) = match err {
            AdapterError::Endpoint { .. } => ("endpoint", None),
            AdapterError::Service(ClientError::Service { code, .. }) => {
                ("service", Some(code.clone()))
            }
            AdapterError::Service(_) => ("service", None),
            AdapterError::Protocol(_) => ("protocol", None),
            _ => ("runtime", None),
        };
        Self {
            service: service.to_string(),
            operation: operation.to_string(),
            kind: kind.to_string(),
            code,
            message: err.to_string(),
        }
    }
}

/// Result of one completed invocation; exactly one slot is ever set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEnvelope {
    /// `None` when the selector yields nothing (void-like operations)
    Success(Option<Value>),
    Failure(CapturedError),
}

impl OutputEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self, OutputEnvelope::Success(_))
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            OutputEnvelope::Success(payload) => payload.as_ref(),
            OutputEnvelope::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&CapturedError> {
        match self {
            OutputEnvelope::Success(_) => None,
            OutputEnvelope::Failure(err) => Some(err),
        }
    }
}
