//! Global config file source: $XDG_CONFIG_HOME/awscmd/config.toml or ~/.config/awscmd/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Path to global config file.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("awscmd").join("config.toml"))
}

/// Add global config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            let canonical = global_path
                .canonicalize()
                .unwrap_or_else(|_| global_path.clone());
            builder = builder.add_source(File::from(canonical.as_path()).required(false));
        } else {
            debug!(
                config_path = %global_path.display(),
                "No global configuration file found"
            );
        }
    }
    Ok(builder)
}
