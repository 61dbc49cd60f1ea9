//! awscmd CLI Binary
//!
//! Command-line host for the schema-driven command adapters.

use awscmd::cli::{Cli, ConfigOverrides, RunContext};
use awscmd::config::ConfigLoader;
use awscmd::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("awscmd starting");

    let context = match RunContext::new(
        cli.workspace.clone(),
        cli.config.clone(),
        &ConfigOverrides::from_cli(&cli),
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing run context: {}", e);
            eprintln!("{}", awscmd::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.stdout.is_empty() {
                println!("{}", output.stdout);
            }
            if let Some(message) = &output.stderr {
                eprintln!("{}", message);
            }
            if output.failed {
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", awscmd::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    if cli.quiet {
        config.enabled = false;
        config.level = "off".to_string();
    }

    config
}
