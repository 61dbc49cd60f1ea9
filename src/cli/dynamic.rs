//! Operation commands built at runtime from a parameter surface.

use crate::adapter::{InvocationOptions, Parameter, ParameterSurface};
use crate::error::AdapterError;
use crate::schema::{OperationSchema, ServiceSchema};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Result of parsing an operation's arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationArgs {
    /// `--help` was requested; rendered help text
    Help(String),
    Parsed {
        /// Raw values per canonical parameter name, in surface order
        raw: Vec<(String, Vec<String>)>,
        options: InvocationOptions,
    },
}

/// Build the clap command for one operation.
pub fn operation_command(
    service: &ServiceSchema,
    operation: &OperationSchema,
    surface: &ParameterSurface,
) -> Command {
    let mut command = Command::new(format!("awscmd {} {}", service.name, operation.command_name()))
        .no_binary_name(true)
        .disable_version_flag(true);
    if let Some(doc) = &operation.documentation {
        command = command.about(doc.clone());
    }

    for param in surface.parameters() {
        command = command.arg(parameter_arg(param));
    }

    command
        .arg(
            Arg::new("select")
                .long("select")
                .value_name("SELECTOR")
                .help("Output selection: '*' (full response), a field name, or '^Parameter'"),
        )
        .arg(
            Arg::new("pass-thru")
                .long("pass-thru")
                .action(ArgAction::SetTrue)
                .help("Deprecated: echo the pass-through parameter value; use --select '^Parameter'"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Skip the confirmation prompt"),
        )
        .arg(
            Arg::new("what-if")
                .long("what-if")
                .action(ArgAction::SetTrue)
                .help("Print the request that would be sent without calling the service"),
        )
}

fn parameter_arg(param: &Parameter) -> Arg {
    let mut arg = Arg::new(param.name.clone())
        .long(param.name.clone())
        .value_name(param.shape.type_label().to_uppercase())
        .help(parameter_help(param));
    if !param.aliases.is_empty() {
        arg = arg.aliases(param.aliases.clone());
    }
    // Multi-value and optional-value args only take negative numbers so a
    // following flag is never swallowed as a value.
    if param.is_boolean() {
        arg.num_args(0..=1).default_missing_value("true")
    } else if param.is_list() {
        arg.num_args(1..)
            .action(ArgAction::Append)
            .allow_negative_numbers(true)
    } else {
        arg.num_args(1).allow_hyphen_values(true)
    }
}

fn parameter_help(param: &Parameter) -> String {
    let mut help = param.documentation.clone().unwrap_or_default();
    let mut notes = Vec::new();
    if param.required {
        notes.push("required".to_string());
    }
    if !param.enum_values.is_empty() {
        notes.push(format!("one of: {}", param.enum_values.join(", ")));
    }
    if let Some(default) = &param.default {
        notes.push(format!("default: {}", default));
    }
    if param.path.len() > 1 {
        notes.push(format!("sets {}", param.dotted_path()));
    }
    if !notes.is_empty() {
        if !help.is_empty() {
            help.push(' ');
        }
        help.push_str(&format!("[{}]", notes.join("; ")));
    }
    help
}

/// Parse an operation's arguments (everything after `<service> <operation>`).
pub fn parse_operation_args(
    service: &ServiceSchema,
    operation: &OperationSchema,
    surface: &ParameterSurface,
    args: &[String],
) -> Result<OperationArgs, AdapterError> {
    let command = operation_command(service, operation, surface);
    let matches = match command.try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            return Ok(OperationArgs::Help(e.render().to_string()))
        }
        Err(e) => return Err(AdapterError::Binding(e.render().to_string())),
    };

    Ok(OperationArgs::Parsed {
        raw: collect_raw(surface, &matches),
        options: InvocationOptions {
            select: matches.get_one::<String>("select").cloned(),
            pass_thru: matches.get_flag("pass-thru"),
            force: matches.get_flag("force"),
            what_if: matches.get_flag("what-if"),
        },
    })
}

fn collect_raw(surface: &ParameterSurface, matches: &ArgMatches) -> Vec<(String, Vec<String>)> {
    surface
        .parameters()
        .iter()
        .filter_map(|param| {
            matches
                .get_many::<String>(&param.name)
                .map(|values| (param.name.clone(), values.cloned().collect()))
        })
        .collect()
}
