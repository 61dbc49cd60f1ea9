//! Catalog presentation: services, operations and describe output.

use crate::adapter::ParameterSurface;
use crate::schema::{Catalog, OperationSchema, OutputDefault, ServiceSchema};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

pub fn format_services(catalog: &Catalog, format: &str) -> String {
    if format == "json" {
        let services: Vec<_> = catalog
            .services()
            .map(|s| {
                json!({
                    "name": s.name,
                    "endpoint_prefix": s.endpoint_prefix,
                    "target_prefix": s.target_prefix,
                    "operations": s.operations.len(),
                })
            })
            .collect();
        let out = json!({ "services": services, "total": services.len() });
        return serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Service", "Endpoint prefix", "Target prefix", "Operations"]);
    for service in catalog.services() {
        table.add_row(vec![
            service.name.clone(),
            service.endpoint_prefix.clone(),
            service.target_prefix.clone(),
            service.operations.len().to_string(),
        ]);
    }
    table.to_string()
}

fn output_label(operation: &OperationSchema) -> String {
    match operation.output_default() {
        OutputDefault::FullResponse => "*".to_string(),
        OutputDefault::Field(field) => field,
        OutputDefault::Nothing => "-".to_string(),
    }
}

pub fn format_operations(services: &[&ServiceSchema], format: &str) -> String {
    if format == "json" {
        let operations: Vec<_> = services
            .iter()
            .flat_map(|s| {
                s.operations.iter().map(move |op| {
                    json!({
                        "service": s.name,
                        "command": op.command_name(),
                        "name": op.name,
                        "mutating": op.mutating,
                        "output": op.default_output,
                    })
                })
            })
            .collect();
        let out = json!({ "operations": operations, "total": operations.len() });
        return serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Service", "Command", "Operation", "Mutating", "Output"]);
    for service in services {
        for op in &service.operations {
            table.add_row(vec![
                service.name.clone(),
                op.command_name(),
                op.name.clone(),
                if op.mutating { "yes" } else { "" }.to_string(),
                output_label(op),
            ]);
        }
    }
    table.to_string()
}

pub fn format_describe(
    service: &ServiceSchema,
    operation: &OperationSchema,
    surface: &ParameterSurface,
    format: &str,
) -> String {
    if format == "json" {
        let parameters: Vec<_> = surface
            .parameters()
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "path": p.dotted_path(),
                    "aliases": p.aliases,
                    "type": p.shape.type_label(),
                    "required": p.required,
                    "allow_empty": p.allow_empty,
                    "enum": p.enum_values,
                    "default": p.default,
                })
            })
            .collect();
        let out = json!({
            "service": service.name,
            "operation": operation.name,
            "command": operation.command_name(),
            "documentation": operation.documentation,
            "mutating": operation.mutating,
            "output": operation.default_output,
            "pass_thru": operation.pass_thru,
            "parameters": parameters,
        });
        return serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string());
    }

    let mut output = format!(
        "{} {} ({})\n",
        service.name,
        operation.command_name(),
        operation.name
    );
    if let Some(doc) = &operation.documentation {
        output.push_str(&format!("{}\n", doc));
    }
    output.push('\n');
    output.push_str(&format!(
        "Mutating: {}\n",
        if operation.mutating { "yes (confirmation required unless --force)" } else { "no" }
    ));
    output.push_str(&format!("Default output: {}\n", output_label(operation)));
    if let Some(pass_thru) = &operation.pass_thru {
        output.push_str(&format!("Pass-thru parameter: {}\n", pass_thru));
    }

    if surface.is_empty() {
        output.push_str("\nNo parameters.");
        return output;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Parameter", "Aliases", "Type", "Required", "Values", "Sets"]);
    for p in surface.parameters() {
        let values = if !p.enum_values.is_empty() {
            p.enum_values.join(" | ")
        } else if let Some(default) = &p.default {
            format!("default {}", default)
        } else {
            String::new()
        };
        table.add_row(vec![
            format!("--{}", p.name),
            p.aliases.join(", "),
            p.shape.type_label(),
            if p.required { "yes" } else { "" }.to_string(),
            values,
            p.dotted_path(),
        ]);
    }
    output.push('\n');
    output.push_str(&table.to_string());
    output
}
