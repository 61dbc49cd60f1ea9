//! Output Selector: projection applied to a response before it is emitted.

use super::context::Context;
use super::surface::ParameterSurface;
use crate::error::AdapterError;
use crate::schema::{OperationSchema, OutputDefault};
use serde_json::Value;

/// Selection mode, resolved once from the `--select` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `*`
    FullResponse,
    /// A response field; `.` separates nested fields
    NamedField(String),
    /// `^Name`: the value bound to an input parameter
    EchoParameter(String),
    /// The operation's own default projection
    Default,
}

impl Selector {
    /// Resolve the selector for one invocation.
    ///
    /// `pass_thru` is the deprecated echo flag; it maps to the operation's
    /// declared pass-through parameter and cannot be combined with `--select`.
    pub fn parse(
        raw: Option<&str>,
        pass_thru: bool,
        operation: &OperationSchema,
        surface: &ParameterSurface,
    ) -> Result<Self, AdapterError> {
        if pass_thru {
            if raw.is_some() {
                return Err(AdapterError::Selector(
                    "--pass-thru cannot be used when --select is specified".to_string(),
                ));
            }
            let parameter = operation.pass_thru.as_deref().ok_or_else(|| {
                AdapterError::Selector(format!(
                    "{} does not support --pass-thru",
                    operation.name
                ))
            })?;
            return Self::echo(parameter, surface);
        }

        let raw = match raw {
            None => return Ok(Selector::Default),
            Some(raw) => raw.trim(),
        };
        if raw.is_empty() {
            return Err(AdapterError::Selector("selector cannot be empty".to_string()));
        }
        if raw == "*" {
            return Ok(Selector::FullResponse);
        }
        if let Some(name) = raw.strip_prefix('^') {
            return Self::echo(name.trim(), surface);
        }
        if raw.split('.').any(|segment| segment.is_empty()) {
            return Err(AdapterError::Selector(format!(
                "'{}' is not a valid field path",
                raw
            )));
        }
        Ok(Selector::NamedField(raw.to_string()))
    }

    fn echo(name: &str, surface: &ParameterSurface) -> Result<Self, AdapterError> {
        if name.is_empty() {
            return Err(AdapterError::Selector(
                "'^' must be followed by a parameter name".to_string(),
            ));
        }
        surface
            .lookup(name)
            .map(|param| Selector::EchoParameter(param.name.clone()))
            .ok_or_else(|| {
                AdapterError::Selector(format!("'{}' is not a parameter of this command", name))
            })
    }

    /// Project a response. `None` means the invocation emits nothing.
    pub fn apply(
        &self,
        response: &Value,
        context: &Context,
        operation: &OperationSchema,
    ) -> Option<Value> {
        match self {
            Selector::FullResponse => Some(response.clone()),
            Selector::NamedField(path) => Some(field(response, path)),
            Selector::EchoParameter(name) => {
                Some(context.get(name).cloned().unwrap_or(Value::Null))
            }
            Selector::Default => match operation.output_default() {
                OutputDefault::FullResponse => Some(response.clone()),
                OutputDefault::Field(path) => Some(field(response, &path)),
                OutputDefault::Nothing => None,
            },
        }
    }
}

/// Walk a dotted path through nested objects; missing fields yield null.
/// Keys match exactly first, then case-insensitively.
fn field(response: &Value, path: &str) -> Value {
    let mut current = response;
    for segment in path.split('.') {
        let next = current.as_object().and_then(|obj| {
            obj.get(segment).or_else(|| {
                obj.iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(segment))
                    .map(|(_, v)| v)
            })
        });
        match next {
            Some(v) => current = v,
            None => return Value::Null,
        }
    }
    current.clone()
}
