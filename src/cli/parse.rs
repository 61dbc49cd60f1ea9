//! CLI parse: clap types for awscmd. No behavior; definitions only.
//!
//! Operation commands are not known until the schema catalog is loaded, so
//! `<service> <operation> ...` arrives as an external subcommand and is parsed
//! a second time against the operation's parameter surface (see `dynamic`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// awscmd - Schema-driven commands for remote service operations
#[derive(Parser, Debug)]
#[command(name = "awscmd")]
#[command(about = "Invoke remote service operations through schema-driven commands")]
#[command(after_help = "Run `awscmd <service> <operation> --help` for operation parameters.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ and relative schema paths resolve here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Region used to derive default endpoints
    #[arg(long)]
    pub region: Option<String>,

    /// Endpoint URL for every service (e.g. a local emulator)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Payload rendering (json, text)
    #[arg(long)]
    pub output: Option<String>,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List known services
    Services {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List operations, optionally for one service
    Operations {
        /// Only list this service's operations
        #[arg(long)]
        service: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show an operation's parameters, defaults and output behavior
    Describe {
        service: String,
        operation: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// `<service> <operation> [--Param value ...]`
    #[command(external_subcommand)]
    Invoke(Vec<String>),
}
