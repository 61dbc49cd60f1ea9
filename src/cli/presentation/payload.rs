//! Payload presentation: selected output, previews and captured failures.

use crate::adapter::{CapturedError, Request};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Render a selected payload. `json` prints pretty JSON; `text` prints scalars
/// bare and arrays of objects as a table.
pub fn render_payload(payload: &Value, format: &str) -> String {
    if format == "json" {
        return serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    }
    match payload {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            object_table(items)
        }
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
        Value::Object(map) => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            for (key, value) in map {
                table.add_row(vec![key.clone(), cell(value)]);
            }
            table.to_string()
        }
        other => cell(other),
    }
}

// Columns in order of first appearance across rows.
fn object_table(items: &[Value]) -> String {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(columns.clone());
    for item in items {
        table.add_row(
            columns
                .iter()
                .map(|c| item.get(c).map(cell).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Request that `--what-if` would have sent.
pub fn render_preview(request: &Request) -> String {
    serde_json::to_string_pretty(request).unwrap_or_else(|_| "{}".to_string())
}

pub fn render_failure(error: &CapturedError, color: bool) -> String {
    let headline = format!("{}:{} failed", error.service, error.operation);
    let detail = match &error.code {
        Some(code) => format!("[{}] {}", code, error.message),
        None => format!("[{}] {}", error.kind, error.message),
    };
    if color {
        format!("{} {}\n  {}", "✗".red(), headline.bold(), detail)
    } else {
        format!("✗ {}\n  {}", headline, detail)
    }
}
