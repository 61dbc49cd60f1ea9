//! Configuration System
//!
//! Layered configuration: defaults, the global file, workspace files and
//! `AWSCMD__*` environment variables, in increasing precedence. Holds client
//! endpoint settings, output defaults, extra schema paths and logging.

use crate::error::AdapterError;
use crate::logging::LoggingConfig;
use crate::schema::ServiceSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub schema: SchemaSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint used for every service without its own override
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Per-service endpoint overrides, keyed by service name
    #[serde(default)]
    pub endpoints: HashMap<String, String>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
            endpoints: HashMap::new(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ClientSettings {
    /// Effective endpoint: service override, then global override, then the
    /// regional default derived from the service's endpoint prefix.
    pub fn endpoint_for(&self, service: &ServiceSchema) -> String {
        self.endpoints
            .get(&service.name)
            .or(self.endpoint_url.as_ref())
            .cloned()
            .unwrap_or_else(|| {
                format!(
                    "https://{}.{}.amazonaws.com",
                    service.endpoint_prefix, self.region
                )
            })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.region.trim().is_empty() {
            return Err("region cannot be empty".to_string());
        }
        let urls = self
            .endpoint_url
            .iter()
            .map(|u| ("endpoint_url".to_string(), u))
            .chain(
                self.endpoints
                    .iter()
                    .map(|(name, u)| (format!("endpoints.{}", name), u)),
            );
        for (key, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{} must be an http(s) URL, got '{}'", key, url));
            }
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("timeouts must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Output rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// json or text
    #[serde(default = "default_output_format")]
    pub format: String,
}

fn default_output_format() -> String {
    "json".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

/// Extra schema sources merged into the built-in catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSettings {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

impl SchemaSettings {
    /// Schema paths with relative entries resolved against `base`.
    pub fn resolved_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { base.join(p) })
            .collect()
    }
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), AdapterError> {
        let mut errors = Vec::new();
        if let Err(e) = self.client.validate() {
            errors.push(format!("client: {}", e));
        }
        if self.output.format != "json" && self.output.format != "text" {
            errors.push(format!(
                "output: invalid format '{}' (must be 'json' or 'text')",
                self.output.format
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AdapterError::Config(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}
