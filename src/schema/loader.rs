//! Schema file loading: one service definition per `.toml` or `.json` file.

use super::ServiceSchema;
use crate::error::AdapterError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Load every service definition found at `paths`.
///
/// Each path is either a schema file or a directory whose `.toml`/`.json`
/// files are read in file-name order. Missing paths are skipped with a warning.
pub fn load_paths(paths: &[PathBuf]) -> Result<Vec<ServiceSchema>, AdapterError> {
    let mut services = Vec::new();
    for path in paths {
        if !path.exists() {
            warn!(path = %path.display(), "Schema path does not exist, skipping");
            continue;
        }
        if path.is_dir() {
            for file in schema_files_in(path)? {
                services.push(load_file(&file)?);
            }
        } else {
            services.push(load_file(path)?);
        }
    }
    Ok(services)
}

fn schema_files_in(dir: &Path) -> Result<Vec<PathBuf>, AdapterError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        AdapterError::Schema(format!("Failed to read schema directory {}: {}", dir.display(), e))
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_schema_file(p))
        .collect();
    files.sort();
    Ok(files)
}

fn is_schema_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("toml") | Some("json")
    )
}

/// Parse a single schema file.
pub fn load_file(path: &Path) -> Result<ServiceSchema, AdapterError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AdapterError::Schema(format!("Failed to read schema file {}: {}", path.display(), e))
    })?;
    let service: ServiceSchema = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            AdapterError::Schema(format!("Invalid schema file {}: {}", path.display(), e))
        })?,
        _ => toml::from_str(&content).map_err(|e| {
            AdapterError::Schema(format!("Invalid schema file {}: {}", path.display(), e))
        })?,
    };
    debug!(
        path = %path.display(),
        service = %service.name,
        operations = service.operations.len(),
        "Loaded schema file"
    );
    Ok(service)
}
