//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("client.region", "us-east-1")?
        .set_default("client.connect_timeout_secs", 10)?
        .set_default("client.request_timeout_secs", 60)?
        .set_default("output.format", "json")
}
