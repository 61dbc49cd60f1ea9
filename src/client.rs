//! Remote Service Client
//!
//! Narrow interface to the service: accepts a request built by the projector
//! and returns the decoded response or a [`ClientError`]. Credentials, retries
//! and pagination are the client's concern, not the adapter's.

use crate::adapter::Request;
use crate::config::ClientSettings;
use crate::error::{AdapterError, ClientError};
use crate::schema::{OperationSchema, ServiceSchema};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub mod http;

pub use http::HttpServiceClient;

/// Endpoint a client talks to; used to enrich network failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    pub url: String,
    pub region: String,
}

/// Service client trait
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Perform one remote operation.
    async fn call(&self, operation: &OperationSchema, request: &Request)
        -> Result<Value, ClientError>;

    fn endpoint(&self) -> &EndpointInfo;
}

/// Builds the client handle for a service. Injected into the run context so
/// tests can substitute their own clients.
pub trait ClientFactory: Send + Sync {
    fn client_for(
        &self,
        service: &ServiceSchema,
        settings: &ClientSettings,
    ) -> Result<Arc<dyn ServiceClient>, AdapterError>;
}

/// Factory for the reqwest-backed awsJson client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    fn client_for(
        &self,
        service: &ServiceSchema,
        settings: &ClientSettings,
    ) -> Result<Arc<dyn ServiceClient>, AdapterError> {
        Ok(Arc::new(HttpServiceClient::new(service, settings)?))
    }
}
