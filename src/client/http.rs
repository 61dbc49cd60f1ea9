//! awsJson client over reqwest.
//!
//! Requests are POSTed unsigned to the configured endpoint with the operation
//! named in `X-Amz-Target`, which suits local emulators and signing gateways.

use super::{EndpointInfo, ServiceClient};
use crate::adapter::Request;
use crate::config::ClientSettings;
use crate::error::{AdapterError, ClientError};
use crate::schema::{OperationSchema, ServiceSchema};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Service client speaking the awsJson protocol
pub struct HttpServiceClient {
    client: Client,
    endpoint: EndpointInfo,
    target_prefix: String,
    content_type: String,
}

impl HttpServiceClient {
    pub fn new(service: &ServiceSchema, settings: &ClientSettings) -> Result<Self, AdapterError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| AdapterError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: EndpointInfo {
                url: settings.endpoint_for(service),
                region: settings.region.clone(),
            },
            target_prefix: service.target_prefix.clone(),
            content_type: format!("application/x-amz-json-{}", service.json_version),
        })
    }
}

// Map transport failures; anything that never reached the service is a network error.
fn map_http_error(error: reqwest::Error) -> ClientError {
    if error.is_connect() || error.is_timeout() {
        ClientError::Network {
            message: error.to_string(),
        }
    } else if error.is_decode() {
        ClientError::Protocol(format!("Failed to decode response: {}", error))
    } else {
        ClientError::Protocol(format!("HTTP error: {}", error))
    }
}

#[derive(Deserialize)]
struct ErrorDocument {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

/// Decode an awsJson error body; `__type` may carry a `namespace#Code` prefix.
fn service_error(status: u16, body: &str) -> ClientError {
    let doc: Option<ErrorDocument> = serde_json::from_str(body).ok();
    let code = doc
        .as_ref()
        .and_then(|d| d.error_type.as_deref())
        .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        .unwrap_or_else(|| format!("Http{}", status));
    let message = doc
        .and_then(|d| d.message)
        .unwrap_or_else(|| body.trim().to_string());
    ClientError::Service {
        code,
        message,
        status,
    }
}

#[async_trait]
impl ServiceClient for HttpServiceClient {
    async fn call(
        &self,
        operation: &OperationSchema,
        request: &Request,
    ) -> Result<Value, ClientError> {
        let target = format!("{}.{}", self.target_prefix, operation.name);
        debug!(endpoint = %self.endpoint.url, target = %target, "Sending request");

        let response = self
            .client
            .post(&self.endpoint.url)
            .header("Content-Type", &self.content_type)
            .header("X-Amz-Target", &target)
            .json(&request.body)
            .send()
            .await
            .map_err(map_http_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_http_error)?;
        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&body)
            .map_err(|e| ClientError::Protocol(format!("Failed to parse response: {}", e)))
    }

    fn endpoint(&self) -> &EndpointInfo {
        &self.endpoint
    }
}
