//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log events (e.g. "services", "invoke.ec2.create-customer-gateway").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Services { .. } => "services".to_string(),
        Commands::Operations { .. } => "operations".to_string(),
        Commands::Describe { .. } => "describe".to_string(),
        Commands::Invoke(args) => {
            let parts: Vec<&str> = args.iter().take(2).map(String::as_str).collect();
            if parts.is_empty() {
                "invoke".to_string()
            } else {
                format!("invoke.{}", parts.join("."))
            }
        }
    }
}
