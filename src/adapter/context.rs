//! Context Builder: per-invocation holder between bound parameters and the request.

use super::selector::Selector;
use super::surface::{BoundParameters, ParameterSurface};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Required parameter bound to null or an empty value
    ExplicitNull,
    /// Required parameter not bound and without a default
    Missing,
}

/// Non-fatal notice recorded while building a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingWarning {
    pub parameter: String,
    pub kind: WarningKind,
}

impl fmt::Display for BindingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::ExplicitNull => write!(
                f,
                "Required parameter '{}' was bound to an empty value; the service will validate it",
                self.parameter
            ),
            WarningKind::Missing => write!(
                f,
                "Required parameter '{}' was not supplied; the service will validate it",
                self.parameter
            ),
        }
    }
}

/// One slot per declared parameter plus the resolved output selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    values: BTreeMap<String, Value>,
    selector: Selector,
    warnings: Vec<BindingWarning>,
}

impl Context {
    /// Build a context. Never fails: required-but-empty parameters only
    /// produce warnings and their null values are forwarded unchanged.
    pub fn build(surface: &ParameterSurface, bound: &BoundParameters, selector: Selector) -> Self {
        let mut values = BTreeMap::new();
        let mut warnings = Vec::new();

        for param in surface.parameters() {
            let value = match bound.get(&param.name) {
                Some(Value::Array(items)) => Some(Value::Array(items.to_vec())),
                Some(Value::Object(entries)) => Some(Value::Object(entries.clone())),
                Some(other) => Some(other.clone()),
                None => param.default.clone(),
            };

            if param.required {
                let kind = match &value {
                    None => Some(WarningKind::Missing),
                    Some(v) if is_empty(v) => Some(WarningKind::ExplicitNull),
                    Some(_) => None,
                };
                if let Some(kind) = kind {
                    let warning = BindingWarning {
                        parameter: param.name.clone(),
                        kind,
                    };
                    warn!(parameter = %param.name, "{}", warning);
                    warnings.push(warning);
                }
            }

            if let Some(value) = value {
                values.insert(param.name.clone(), value);
            }
        }

        Self {
            values,
            selector,
            warnings,
        }
    }

    /// Slot contents, including explicit nulls. `None` when unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Slot contents when set to a non-null value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn warnings(&self) -> &[BindingWarning] {
        &self.warnings
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        _ => false,
    }
}
