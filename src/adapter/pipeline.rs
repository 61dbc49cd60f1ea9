//! Command Adapter pipeline: selector, confirmation, context, projection, call, output.

use super::confirm::{prompt_for, Confirmer};
use super::context::Context;
use super::envelope::{CapturedError, OutputEnvelope};
use super::invoker::invoke_blocking;
use super::projector::{project, Request};
use super::selector::Selector;
use super::surface::{BoundParameters, ParameterSurface};
use crate::client::ServiceClient;
use crate::error::AdapterError;
use crate::schema::{OperationSchema, ServiceSchema};
use tracing::{error, info};

/// Cross-cutting flags carried by every operation command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOptions {
    /// Raw `--select` value
    pub select: Option<String>,
    /// Deprecated echo flag
    pub pass_thru: bool,
    /// Skip the confirmation prompt
    pub force: bool,
    /// Build and return the request without calling the service
    pub what_if: bool,
}

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Confirmation was refused; nothing was built or sent
    Declined,
    /// `what_if` was set; the request that would have been sent
    Previewed(Request),
    Completed(OutputEnvelope),
}

/// Generic adapter for one operation of one service.
pub struct CommandAdapter<'a> {
    service: &'a ServiceSchema,
    operation: &'a OperationSchema,
    surface: ParameterSurface,
}

impl<'a> CommandAdapter<'a> {
    pub fn new(service: &'a ServiceSchema, operation: &'a OperationSchema) -> Result<Self, AdapterError> {
        Ok(Self {
            service,
            operation,
            surface: ParameterSurface::for_operation(operation)?,
        })
    }

    pub fn surface(&self) -> &ParameterSurface {
        &self.surface
    }

    pub fn operation(&self) -> &OperationSchema {
        self.operation
    }

    /// Run one invocation.
    ///
    /// `Err` is returned only for problems detected before the remote call
    /// (selector configuration, confirmation I/O). Failures of the call itself
    /// are captured into [`OutputEnvelope::Failure`].
    pub fn run(
        &self,
        bound: &BoundParameters,
        options: &InvocationOptions,
        client: &dyn ServiceClient,
        confirmer: &dyn Confirmer,
    ) -> Result<Invocation, AdapterError> {
        let selector = Selector::parse(
            options.select.as_deref(),
            options.pass_thru,
            self.operation,
            &self.surface,
        )?;

        if self.operation.mutating && !options.force && !options.what_if {
            let prompt = prompt_for(
                &self.service.name,
                &self.operation.name,
                self.confirmation_target(bound).as_deref(),
            );
            if !confirmer.confirm(&prompt)? {
                info!(
                    service = %self.service.name,
                    operation = %self.operation.name,
                    "Operation declined"
                );
                return Ok(Invocation::Declined);
            }
        }

        let context = Context::build(&self.surface, bound, selector);
        let request = project(self.operation, &context);

        if options.what_if {
            return Ok(Invocation::Previewed(request));
        }

        info!(
            service = %self.service.name,
            operation = %self.operation.name,
            fields = request.body.len(),
            "Invoking operation"
        );
        let envelope = match invoke_blocking(client, self.operation, &request) {
            Ok(response) => OutputEnvelope::Success(context.selector().apply(
                &response,
                &context,
                self.operation,
            )),
            Err(err) => {
                error!(
                    service = %self.service.name,
                    operation = %self.operation.name,
                    error = %err,
                    "Operation failed"
                );
                OutputEnvelope::Failure(CapturedError::capture(
                    &self.service.name,
                    &self.operation.name,
                    &err,
                ))
            }
        };
        info!(
            service = %self.service.name,
            operation = %self.operation.name,
            success = envelope.is_success(),
            "Operation finished"
        );
        Ok(Invocation::Completed(envelope))
    }

    // Pass-through parameter value, else the first bound required string.
    fn confirmation_target(&self, bound: &BoundParameters) -> Option<String> {
        let as_text = |name: &str| bound.get(name).and_then(|v| v.as_str()).map(String::from);
        self.operation
            .pass_thru
            .as_deref()
            .and_then(as_text)
            .or_else(|| {
                self.surface
                    .parameters()
                    .iter()
                    .filter(|p| p.required)
                    .find_map(|p| as_text(&p.name))
            })
    }
}
