//! Config loader facade: builds `AppConfig` from the layered sources.

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::AppConfig;
use crate::error::AdapterError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use std::path::{Path, PathBuf};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence, lowest to highest: defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{AWSCMD_ENV}.toml`, `AWSCMD__*` env vars.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, AdapterError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder)
    }

    /// Load configuration from an explicit file, skipping global and workspace files.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, AdapterError> {
        if !path.exists() {
            return Err(AdapterError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?.add_source(File::from(path));
        Self::finish(builder)
    }

    /// Path of the global configuration file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, AdapterError> {
        let config = builder
            .add_source(
                Environment::with_prefix("AWSCMD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
