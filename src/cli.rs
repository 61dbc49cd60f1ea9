//! CLI domain: parse, route, help, output, and presentation only.
//! No adapter logic; single route table dispatches to the command adapter.

mod dynamic;
mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use dynamic::{operation_command, parse_operation_args, OperationArgs};
pub use help::command_name;
pub use output::{map_error, CommandOutput};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_describe, format_operations, format_services, render_failure, render_payload,
    render_preview,
};
pub use route::{ConfigOverrides, RunContext};
