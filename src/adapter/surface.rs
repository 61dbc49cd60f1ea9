//! Parameter Surface: one addressable parameter per leaf of an operation's input.
//!
//! Nested structures are flattened into `Parent_Child` names while the dotted
//! member path (`Parent.Child`) is kept for projection and help output.

use crate::error::AdapterError;
use crate::schema::{Member, OperationSchema, Shape};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

/// Flags every operation command carries; parameters may not reuse them.
pub const RESERVED_FLAGS: &[&str] = &["select", "pass-thru", "force", "what-if", "help"];

/// Flattened parameter name for a member path.
pub fn flat_name<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("_")
}

/// A single bindable parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub path: Vec<String>,
    pub aliases: Vec<String>,
    pub shape: Shape,
    pub required: bool,
    pub allow_empty: bool,
    pub enum_values: Vec<String>,
    pub default: Option<Value>,
    pub documentation: Option<String>,
}

impl Parameter {
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }

    pub fn is_list(&self) -> bool {
        matches!(self.shape, Shape::List { .. } | Shape::Map { .. })
    }

    pub fn is_boolean(&self) -> bool {
        self.shape == Shape::Boolean
    }
}

/// Parameters declared for one operation.
#[derive(Debug, Clone)]
pub struct ParameterSurface {
    parameters: Vec<Parameter>,
    index: HashMap<String, usize>,
}

impl ParameterSurface {
    pub fn for_operation(operation: &OperationSchema) -> Result<Self, AdapterError> {
        let mut parameters = Vec::new();
        collect(&operation.input, &[], true, &mut parameters);

        let mut index = HashMap::new();
        for (i, param) in parameters.iter().enumerate() {
            for name in std::iter::once(&param.name).chain(param.aliases.iter()) {
                if RESERVED_FLAGS.contains(&name.as_str()) {
                    return Err(AdapterError::Schema(format!(
                        "{}: parameter name '{}' collides with a reserved flag",
                        operation.name, name
                    )));
                }
                if let Some(prev) = index.insert(name.clone(), i) {
                    return Err(AdapterError::Schema(format!(
                        "{}: name '{}' is declared by both '{}' and '{}'",
                        operation.name, name, parameters[prev].name, param.name
                    )));
                }
            }
        }

        Ok(Self { parameters, index })
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Find a parameter by canonical name or alias.
    pub fn lookup(&self, name: &str) -> Option<&Parameter> {
        self.index.get(name).map(|&i| &self.parameters[i])
    }

    /// Bind raw command-line values.
    ///
    /// Each entry is a parameter name (or alias) with the raw strings given for
    /// it. An empty raw value binds an explicit null unless the parameter allows
    /// empty strings.
    pub fn bind<I>(&self, raw: I) -> Result<BoundParameters, AdapterError>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut values = BTreeMap::new();
        for (name, raws) in raw {
            let param = self.lookup(&name).ok_or_else(|| {
                AdapterError::Binding(format!("Unknown parameter '{}'", name))
            })?;
            if values.contains_key(&param.name) {
                return Err(AdapterError::Binding(format!(
                    "Parameter '{}' was bound more than once (via '{}')",
                    param.name, name
                )));
            }
            let value = parse_raw(param, &raws)
                .map_err(|e| AdapterError::Binding(format!("{}: {}", param.name, e)))?;
            values.insert(param.name.clone(), value);
        }
        Ok(BoundParameters { values })
    }
}

fn collect(members: &[Member], prefix: &[String], ancestors_required: bool, out: &mut Vec<Parameter>) {
    for member in members {
        let mut path = prefix.to_vec();
        path.push(member.name.clone());
        let required = ancestors_required && member.required;
        match &member.shape {
            Shape::Structure { members: nested } if member.flatten => {
                collect(nested, &path, required, out);
            }
            shape => out.push(Parameter {
                name: flat_name(&path),
                path,
                aliases: member.aliases.clone(),
                shape: shape.clone(),
                required,
                allow_empty: member.allow_empty,
                enum_values: member.enum_values.clone(),
                default: member.default.clone(),
                documentation: member.documentation.clone(),
            }),
        }
    }
}

/// Typed values bound to parameters, keyed by canonical name.
/// `Value::Null` records an explicit null binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameters {
    values: BTreeMap<String, Value>,
}

impl BoundParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an already typed value. Intended for programmatic callers.
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn parse_raw(param: &Parameter, raws: &[String]) -> Result<Value, String> {
    let single_empty = raws.len() == 1 && raws[0].is_empty();
    let value = match &param.shape {
        Shape::List { member } => {
            if raws.is_empty() || single_empty {
                return Ok(Value::Null);
            }
            if raws.len() == 1 && raws[0].trim_start().starts_with('[') {
                let parsed: Value = serde_json::from_str(&raws[0])
                    .map_err(|e| format!("invalid JSON array: {}", e))?;
                coerce(&param.shape, parsed)?
            } else {
                let items = raws
                    .iter()
                    .map(|raw| parse_scalar(member, raw))
                    .collect::<Result<Vec<_>, _>>()?;
                non_null_items(items)
            }
        }
        Shape::Map { value } => {
            if raws.is_empty() || single_empty {
                return Ok(Value::Null);
            }
            if raws.len() == 1 && raws[0].trim_start().starts_with('{') {
                let parsed: Value = serde_json::from_str(&raws[0])
                    .map_err(|e| format!("invalid JSON object: {}", e))?;
                coerce(&param.shape, parsed)?
            } else {
                let mut map = Map::new();
                for raw in raws {
                    let (key, val) = raw
                        .split_once('=')
                        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
                    let parsed = parse_scalar(value, val)?;
                    if !parsed.is_null() {
                        map.insert(key.to_string(), parsed);
                    }
                }
                non_empty_object(map)
            }
        }
        shape => {
            if raws.len() > 1 {
                return Err("accepts a single value".to_string());
            }
            let raw = raws.first().map(String::as_str).unwrap_or("");
            if raw.is_empty() {
                return Ok(if param.allow_empty && *shape == Shape::String {
                    Value::String(String::new())
                } else {
                    Value::Null
                });
            }
            parse_scalar(shape, raw)?
        }
    };
    check_enum(&param.shape, &param.enum_values, &value)?;
    Ok(value)
}

/// Check `value` against an enumerated value set. For lists and maps every
/// element is checked.
fn check_enum(shape: &Shape, allowed: &[String], value: &Value) -> Result<(), String> {
    if allowed.is_empty() {
        return Ok(());
    }
    match (shape, value) {
        (Shape::List { .. }, Value::Array(items)) => items
            .iter()
            .try_for_each(|item| check_allowed(allowed, item)),
        (Shape::Map { .. }, Value::Object(entries)) => entries
            .values()
            .try_for_each(|entry| check_allowed(allowed, entry)),
        (_, value) => check_allowed(allowed, value),
    }
}

fn check_allowed(allowed: &[String], value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !allowed.iter().any(|v| v == s) => Err(format!(
            "'{}' is not one of: {}",
            s,
            allowed.join(", ")
        )),
        _ => Ok(()),
    }
}

/// Drop null elements; a list whose every element was null becomes null.
fn non_null_items(items: Vec<Value>) -> Value {
    let had_items = !items.is_empty();
    let kept: Vec<Value> = items.into_iter().filter(|item| !item.is_null()).collect();
    if had_items && kept.is_empty() {
        Value::Null
    } else {
        Value::Array(kept)
    }
}

fn non_empty_object(map: Map<String, Value>) -> Value {
    if map.is_empty() {
        Value::Null
    } else {
        Value::Object(map)
    }
}

/// Parse one raw string as a value of `shape`.
fn parse_scalar(shape: &Shape, raw: &str) -> Result<Value, String> {
    match shape {
        Shape::String => Ok(Value::String(raw.to_string())),
        Shape::Integer | Shape::Long => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("'{}' is not an integer", raw)),
        Shape::Double => {
            let parsed = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", raw))?;
            serde_json::Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| format!("'{}' is not a finite number", raw))
        }
        Shape::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Bool(true)),
            "false" | "0" | "no" => Ok(Value::Bool(false)),
            _ => Err(format!("'{}' is not a boolean", raw)),
        },
        Shape::Timestamp => parse_timestamp(raw),
        Shape::Document | Shape::Structure { .. } | Shape::List { .. } | Shape::Map { .. } => {
            let parsed: Value =
                serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))?;
            coerce(shape, parsed)
        }
    }
}

fn parse_timestamp(raw: &str) -> Result<Value, String> {
    let trimmed = raw.trim();
    if let Ok(epoch) = trimmed.parse::<i64>() {
        return Ok(Value::from(epoch));
    }
    chrono::DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Value::from(dt.timestamp()))
        .map_err(|_| format!("'{}' is not an RFC 3339 timestamp or epoch seconds", raw))
}

/// Check a JSON value against `shape`, converting where the mapping is unambiguous.
///
/// Null fields are dropped and a structure or map left with no fields becomes null.
fn coerce(shape: &Shape, value: Value) -> Result<Value, String> {
    match (shape, value) {
        (_, Value::Null) => Ok(Value::Null),
        (Shape::Document, v) => Ok(v),
        (Shape::String, Value::String(s)) => Ok(Value::String(s)),
        (Shape::Integer | Shape::Long, Value::Number(n)) if n.is_i64() || n.is_u64() => {
            Ok(Value::Number(n))
        }
        (Shape::Double, Value::Number(n)) => Ok(Value::Number(n)),
        (Shape::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
        (Shape::Timestamp, Value::Number(n)) => Ok(Value::Number(n)),
        (Shape::Timestamp, Value::String(s)) => parse_timestamp(&s),
        (Shape::List { member }, Value::Array(items)) => items
            .into_iter()
            .map(|item| coerce(member, item))
            .collect::<Result<Vec<_>, _>>()
            .map(non_null_items),
        (Shape::Map { value }, Value::Object(entries)) => {
            let mut out = Map::new();
            for (k, v) in entries {
                let coerced = coerce(value, v)?;
                if !coerced.is_null() {
                    out.insert(k, coerced);
                }
            }
            Ok(non_empty_object(out))
        }
        (Shape::Structure { members }, Value::Object(entries)) => {
            let mut out = Map::new();
            for (k, v) in entries {
                let member = members
                    .iter()
                    .find(|m| m.name == k)
                    .ok_or_else(|| format!("unknown field '{}'", k))?;
                let coerced = coerce(&member.shape, v)?;
                if coerced.is_null() {
                    continue;
                }
                check_enum(&member.shape, &member.enum_values, &coerced)
                    .map_err(|e| format!("{}: {}", k, e))?;
                out.insert(k, coerced);
            }
            Ok(non_empty_object(out))
        }
        (shape, other) => Err(format!(
            "expected {}, got {}",
            shape.type_label(),
            json_type_name(&other)
        )),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
