//! Logging System
//!
//! Structured logging using the `tracing` crate. Provides configurable log levels,
//! output formats, and destinations. Command output owns stdout, so logs go to
//! stderr or a file by default.

use crate::error::AdapterError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Off by default: stdout carries command output
    #[serde(default)]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"); defaults to the user data directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Default log file: `<data dir>/awscmd/awscmd.log`.
pub fn default_log_file() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.data_dir().join("awscmd").join("awscmd.log"))
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (AWSCMD_LOG, AWSCMD_LOG_FORMAT, AWSCMD_LOG_OUTPUT)
/// 2. The given config (CLI flags already folded in by the caller)
/// 3. Defaults
///
/// Does nothing when logging is disabled and `AWSCMD_LOG` is unset. A config
/// with level `off` (what `--quiet` produces) stays silent even then.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), AdapterError> {
    if !logging_enabled(config, std::env::var_os("AWSCMD_LOG").is_some()) {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && output != Output::File;

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => {
            let log_file = config
                .and_then(|c| c.file.clone())
                .or_else(default_log_file)
                .ok_or_else(|| {
                    AdapterError::Config("No log file configured and no data directory".to_string())
                })?;
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AdapterError::Config(format!("Failed to create log directory: {}", e))
                })?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .map_err(|e| {
                    AdapterError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
                })?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
    };

    let base_subscriber = Registry::default().with(filter);
    let installed = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };
    installed.map_err(|e| AdapterError::Config(format!("Failed to install log subscriber: {}", e)))
}

fn logging_enabled(config: Option<&LoggingConfig>, env_requested: bool) -> bool {
    match config {
        Some(c) if c.level == "off" => false,
        Some(c) => c.enabled || env_requested,
        None => env_requested,
    }
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, AdapterError> {
    if let Ok(filter) = EnvFilter::try_from_env("AWSCMD_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("warn");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| AdapterError::Config(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    if let Ok(modules_str) = std::env::var("AWSCMD_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, module_level)) = module_spec.split_once('=') {
                let directive = format!("{}={}", module.trim(), module_level.trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    AdapterError::Config(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, AdapterError> {
    if let Ok(format) = std::env::var("AWSCMD_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(AdapterError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Determine output destination from config or environment
fn determine_output(config: Option<&LoggingConfig>) -> Result<Output, AdapterError> {
    if let Ok(output) = std::env::var("AWSCMD_LOG_OUTPUT") {
        return parse_output(&output);
    }
    parse_output(config.map(|c| c.output.as_str()).unwrap_or("stderr"))
}

fn parse_output(output: &str) -> Result<Output, AdapterError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(AdapterError::Config(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
