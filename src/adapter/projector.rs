//! Request Projector: builds the request tree from a context.

use super::context::Context;
use super::surface::flat_name;
use crate::schema::{Member, OperationSchema, Shape};
use serde::Serialize;
use serde_json::{Map, Value};

/// Input for a single remote call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub operation: String,
    pub body: Map<String, Value>,
}

impl Request {
    /// Look up a field by dotted path, e.g. `LaunchTemplate.Version`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.body.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Project `context` into a request for `operation`.
///
/// Sub-structures whose leaves are all unset are absent from the result.
pub fn project(operation: &OperationSchema, context: &Context) -> Request {
    Request {
        operation: operation.name.clone(),
        body: build_structure(&operation.input, &[], context).unwrap_or_default(),
    }
}

fn build_structure(
    members: &[Member],
    prefix: &[&str],
    context: &Context,
) -> Option<Map<String, Value>> {
    let mut out = Map::new();
    for member in members {
        let mut path = prefix.to_vec();
        path.push(member.name.as_str());
        let value = match &member.shape {
            Shape::Structure { members: nested } if member.flatten => {
                build_structure(nested, &path, context).map(Value::Object)
            }
            shape => context
                .value(&flat_name(&path))
                .and_then(|value| collapse(shape, value.clone())),
        };
        if let Some(value) = value {
            out.insert(member.name.clone(), value);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Null-collapse a value bound whole: null leaves are dropped and so is any
/// object they leave empty. A non-empty list whose elements all collapse is
/// dropped. Documents are sent as given.
fn collapse(shape: &Shape, value: Value) -> Option<Value> {
    match (shape, value) {
        (_, Value::Null) => None,
        (Shape::Document, value) => Some(value),
        (Shape::List { member }, Value::Array(items)) => {
            if items.is_empty() {
                return Some(Value::Array(items));
            }
            let kept: Vec<Value> = items
                .into_iter()
                .filter_map(|item| collapse(member, item))
                .collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        (Shape::Map { value }, Value::Object(entries)) => non_empty(
            entries
                .into_iter()
                .filter_map(|(k, v)| collapse(value, v).map(|v| (k, v)))
                .collect(),
        ),
        (Shape::Structure { members }, Value::Object(entries)) => non_empty(
            entries
                .into_iter()
                .filter_map(|(k, v)| {
                    let collapsed = match members.iter().find(|m| m.name == k) {
                        Some(member) => collapse(&member.shape, v),
                        None => (!v.is_null()).then_some(v),
                    };
                    collapsed.map(|v| (k, v))
                })
                .collect(),
        ),
        (_, value) => Some(value),
    }
}

fn non_empty(map: Map<String, Value>) -> Option<Value> {
    (!map.is_empty()).then_some(Value::Object(map))
}
