//! Operation Schema Table
//!
//! Describes remote services and the input shape of each of their operations.
//! Every command adapter is driven from this table: the parameter surface is
//! flattened from `OperationSchema::input`, the projector walks the same tree,
//! and the output selector falls back to `OperationSchema::default_output`.

use crate::error::AdapterError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

mod builtin;
mod catalog;
pub mod loader;

pub use catalog::Catalog;

/// Shape of a single member value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    Timestamp,
    /// Free-form JSON value
    Document,
    List {
        member: Box<Shape>,
    },
    Map {
        value: Box<Shape>,
    },
    Structure {
        #[serde(default)]
        members: Vec<Member>,
    },
}

impl Shape {
    pub fn list(member: Shape) -> Self {
        Shape::List {
            member: Box::new(member),
        }
    }

    pub fn map(value: Shape) -> Self {
        Shape::Map {
            value: Box::new(value),
        }
    }

    pub fn structure(members: Vec<Member>) -> Self {
        Shape::Structure { members }
    }

    /// Short type label used in help and `describe` output.
    pub fn type_label(&self) -> String {
        match self {
            Shape::String => "string".to_string(),
            Shape::Integer => "integer".to_string(),
            Shape::Long => "long".to_string(),
            Shape::Double => "double".to_string(),
            Shape::Boolean => "boolean".to_string(),
            Shape::Timestamp => "timestamp".to_string(),
            Shape::Document => "document".to_string(),
            Shape::List { member } => format!("list<{}>", member.type_label()),
            Shape::Map { value } => format!("map<string,{}>", value.type_label()),
            Shape::Structure { .. } => "structure".to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One member of an input structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub required: bool,
    /// Keep an explicitly bound empty string instead of treating it as null
    #[serde(default)]
    pub allow_empty: bool,
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<String>,
    /// Literal applied when the parameter is left unbound
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Alternative parameter names accepted for backward compatibility
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Structures are flattened into one parameter per leaf unless disabled
    #[serde(default = "default_true")]
    pub flatten: bool,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl Member {
    pub fn new(name: &str, shape: Shape) -> Self {
        Self {
            name: name.to_string(),
            shape,
            required: false,
            allow_empty: false,
            enum_values: Vec::new(),
            default: None,
            aliases: Vec::new(),
            flatten: true,
            documentation: None,
        }
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, Shape::String)
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name, Shape::Integer)
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, Shape::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn default_value(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn unflattened(mut self) -> Self {
        self.flatten = false;
        self
    }

    pub fn doc(mut self, text: &str) -> Self {
        self.documentation = Some(text.to_string());
        self
    }
}

/// Default projection applied when no selector is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDefault {
    FullResponse,
    Field(String),
    Nothing,
}

/// Input shape and command metadata for one remote operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSchema {
    pub name: String,
    #[serde(default)]
    pub documentation: Option<String>,
    /// Mutating operations ask for confirmation unless forced
    #[serde(default)]
    pub mutating: bool,
    /// `*` for the full response, a field name, or absent for no output
    #[serde(default)]
    pub default_output: Option<String>,
    /// Parameter echoed by the legacy `--pass-thru` flag
    #[serde(default)]
    pub pass_thru: Option<String>,
    #[serde(default)]
    pub input: Vec<Member>,
}

impl OperationSchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            documentation: None,
            mutating: false,
            default_output: None,
            pass_thru: None,
            input: Vec::new(),
        }
    }

    pub fn mutating(mut self) -> Self {
        self.mutating = true;
        self
    }

    pub fn output(mut self, field: &str) -> Self {
        self.default_output = Some(field.to_string());
        self
    }

    pub fn pass_thru(mut self, parameter: &str) -> Self {
        self.pass_thru = Some(parameter.to_string());
        self
    }

    pub fn doc(mut self, text: &str) -> Self {
        self.documentation = Some(text.to_string());
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.input.push(member);
        self
    }

    /// Kebab-case command name, e.g. `create-customer-gateway`.
    pub fn command_name(&self) -> String {
        kebab_case(&self.name)
    }

    pub fn output_default(&self) -> OutputDefault {
        match self.default_output.as_deref() {
            None | Some("") => OutputDefault::Nothing,
            Some("*") => OutputDefault::FullResponse,
            Some(field) => OutputDefault::Field(field.to_string()),
        }
    }

    /// Whether `name` (PascalCase or kebab-case) refers to this operation.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.command_name() == name
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("operation name cannot be empty".to_string());
        }
        validate_members(&self.input, &self.name)?;
        if let Some(ref pass_thru) = self.pass_thru {
            let declared = self
                .input
                .iter()
                .any(|m| &m.name == pass_thru || m.aliases.contains(pass_thru));
            if !declared {
                return Err(format!(
                    "{}: pass-through parameter '{}' is not a top-level input member",
                    self.name, pass_thru
                ));
            }
        }
        Ok(())
    }
}

fn validate_members(members: &[Member], owner: &str) -> Result<(), String> {
    let mut seen = HashSet::new();
    for member in members {
        if member.name.trim().is_empty() {
            return Err(format!("{}: member name cannot be empty", owner));
        }
        if !seen.insert(member.name.as_str()) {
            return Err(format!("{}: duplicate member '{}'", owner, member.name));
        }
        if let Shape::Structure { members: nested } = &member.shape {
            validate_members(nested, &format!("{}.{}", owner, member.name))?;
        }
    }
    Ok(())
}

fn default_json_version() -> String {
    "1.1".to_string()
}

/// A remote service and the operations exposed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchema {
    /// CLI name, e.g. `autoscaling`
    pub name: String,
    /// Host label used to derive the default regional endpoint
    pub endpoint_prefix: String,
    /// `X-Amz-Target` prefix for awsJson requests
    pub target_prefix: String,
    #[serde(default = "default_json_version")]
    pub json_version: String,
    #[serde(default)]
    pub operations: Vec<OperationSchema>,
}

impl ServiceSchema {
    pub fn operation(&self, name: &str) -> Option<&OperationSchema> {
        self.operations.iter().find(|op| op.matches(name))
    }

    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.name.trim().is_empty() {
            return Err(AdapterError::Schema("service name cannot be empty".to_string()));
        }
        if self.target_prefix.trim().is_empty() {
            return Err(AdapterError::Schema(format!(
                "service '{}' has an empty target_prefix",
                self.name
            )));
        }
        let mut names = HashSet::new();
        for op in &self.operations {
            op.validate()
                .map_err(|e| AdapterError::Schema(format!("service '{}': {}", self.name, e)))?;
            if !names.insert(op.name.as_str()) {
                return Err(AdapterError::Schema(format!(
                    "service '{}': duplicate operation '{}'",
                    self.name, op.name
                )));
            }
        }
        Ok(())
    }
}

/// Convert a PascalCase operation name into a kebab-case command name.
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);
    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map(|n| n.is_ascii_lowercase()).unwrap_or(false);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
