//! CLI route: single route table and run context. Dispatches to the catalog,
//! the command adapter and presentation.

use crate::adapter::{
    CommandAdapter, Confirmer, Invocation, OutputEnvelope, ParameterSurface, TerminalConfirmer,
};
use crate::cli::dynamic::{parse_operation_args, OperationArgs};
use crate::cli::output::CommandOutput;
use crate::cli::parse::{Cli, Commands};
use crate::cli::presentation::{
    format_describe, format_operations, format_services, render_failure, render_payload,
    render_preview,
};
use crate::cli::command_name;
use crate::client::{ClientFactory, HttpClientFactory};
use crate::config::{AppConfig, ConfigLoader};
use crate::error::AdapterError;
use crate::schema::Catalog;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Global flags that override loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub output: Option<String>,
}

impl ConfigOverrides {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            region: cli.region.clone(),
            endpoint_url: cli.endpoint_url.clone(),
            output: cli.output.clone(),
        }
    }

    fn apply(&self, config: &mut AppConfig) {
        if let Some(region) = &self.region {
            config.client.region = region.clone();
        }
        if let Some(url) = &self.endpoint_url {
            config.client.endpoint_url = Some(url.clone());
        }
        if let Some(output) = &self.output {
            config.output.format = output.clone();
        }
    }
}

/// Runtime context for CLI execution: configuration, the schema catalog and
/// the injected client factory and confirmer.
pub struct RunContext {
    config: AppConfig,
    catalog: Catalog,
    client_factory: Box<dyn ClientFactory>,
    confirmer: Box<dyn Confirmer>,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, AdapterError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        overrides.apply(&mut config);
        Self::from_config(config, &workspace_root)
    }

    /// Create run context from an already loaded configuration. Relative
    /// schema paths resolve against `workspace_root`.
    pub fn from_config(config: AppConfig, workspace_root: &Path) -> Result<Self, AdapterError> {
        config.validate()?;
        let catalog = Catalog::with_schema_paths(&config.schema.resolved_paths(workspace_root))?;
        debug!(
            services = catalog.services().count(),
            region = %config.client.region,
            "Run context initialized"
        );
        Ok(Self {
            config,
            catalog,
            client_factory: Box::new(HttpClientFactory),
            confirmer: Box::new(TerminalConfirmer),
            color: std::io::stderr().is_terminal(),
        })
    }

    pub fn with_client_factory(mut self, factory: Box<dyn ClientFactory>) -> Self {
        self.client_factory = factory;
        self
    }

    pub fn with_confirmer(mut self, confirmer: Box<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, AdapterError> {
        info!(command = %command_name(command), "Executing command");
        match command {
            Commands::Services { format } => {
                Ok(CommandOutput::text(format_services(&self.catalog, format)))
            }
            Commands::Operations { service, format } => {
                let services = match service {
                    Some(name) => vec![self.catalog.service(name).ok_or_else(|| {
                        AdapterError::Schema(format!("Unknown service '{}'", name))
                    })?],
                    None => self.catalog.services().collect(),
                };
                Ok(CommandOutput::text(format_operations(&services, format)))
            }
            Commands::Describe {
                service,
                operation,
                format,
            } => {
                let (svc, op) = self.catalog.resolve(service, operation)?;
                let surface = ParameterSurface::for_operation(op)?;
                Ok(CommandOutput::text(format_describe(svc, op, &surface, format)))
            }
            Commands::Invoke(args) => self.handle_invoke(args),
        }
    }

    fn handle_invoke(&self, args: &[String]) -> Result<CommandOutput, AdapterError> {
        let (service, operation) = match args {
            [service, operation, ..] => (service, operation),
            [service] => {
                return Err(AdapterError::Schema(format!(
                    "Missing operation for service '{}'. Run `awscmd operations --service {}` to list them.",
                    service, service
                )))
            }
            [] => return Err(AdapterError::Schema("Missing service".to_string())),
        };
        let (svc, op) = self.catalog.resolve(service, operation)?;
        let adapter = CommandAdapter::new(svc, op)?;

        let (raw, options) = match parse_operation_args(svc, op, adapter.surface(), &args[2..])? {
            OperationArgs::Help(text) => return Ok(CommandOutput::text(text)),
            OperationArgs::Parsed { raw, options } => (raw, options),
        };
        let bound = adapter.surface().bind(raw)?;
        let client = self.client_factory.client_for(svc, &self.config.client)?;

        match adapter.run(&bound, &options, client.as_ref(), self.confirmer.as_ref())? {
            Invocation::Declined => Ok(CommandOutput::notice("Cancelled.")),
            Invocation::Previewed(request) => Ok(CommandOutput::text(render_preview(&request))),
            Invocation::Completed(OutputEnvelope::Success(payload)) => Ok(CommandOutput::text(
                payload
                    .map(|p| render_payload(&p, &self.config.output.format))
                    .unwrap_or_default(),
            )),
            Invocation::Completed(OutputEnvelope::Failure(error)) => {
                Ok(CommandOutput::failure(render_failure(&error, self.color)))
            }
        }
    }
}
