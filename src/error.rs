//! Error types for the command adapter layer.

use thiserror::Error;

/// Errors raised by a remote service client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The service answered with an error document.
    #[error("{code}: {message} (HTTP {status})")]
    Service {
        code: String,
        message: String,
        status: u16,
    },

    /// The request never reached the service (name resolution, connect, TLS).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service answered with something that could not be decoded.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Adapter-level errors
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Parameter binding failed: {0}")]
    Binding(String),

    #[error("Invalid output selector: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Confirmation failed: {0}")]
    Confirmation(String),

    #[error("{message} (endpoint: {endpoint}, region: {region})")]
    Endpoint {
        message: String,
        endpoint: String,
        region: String,
    },

    #[error("Service error: {0}")]
    Service(ClientError),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl AdapterError {
    /// Errors raised before any remote call is attempted.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AdapterError::Binding(_)
                | AdapterError::Selector(_)
                | AdapterError::Config(_)
                | AdapterError::Schema(_)
        )
    }
}

impl From<config::ConfigError> for AdapterError {
    fn from(err: config::ConfigError) -> Self {
        AdapterError::Config(err.to_string())
    }
}

impl From<ClientError> for AdapterError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Protocol(msg) => AdapterError::Protocol(msg),
            other => AdapterError::Service(other),
        }
    }
}
