//! Property-based tests for null-collapsing projection

use awscmd::adapter::{project, BoundParameters, Context, ParameterSurface, Selector};
use awscmd::schema::{Catalog, Shape};
use proptest::prelude::*;
use serde_json::{json, Value};

fn contains_empty_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty() || map.values().any(contains_empty_object),
        Value::Array(items) => items.iter().any(contains_empty_object),
        _ => false,
    }
}

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.values().any(contains_null),
        Value::Array(items) => items.iter().any(contains_null),
        _ => false,
    }
}

/// String parameters of CreateAutoScalingGroup, nested ones included.
fn string_parameters() -> (Catalog, Vec<String>) {
    let catalog = Catalog::builtin();
    let names = {
        let (_, op) = catalog
            .resolve("autoscaling", "CreateAutoScalingGroup")
            .unwrap();
        ParameterSurface::for_operation(op)
            .unwrap()
            .parameters()
            .iter()
            .filter(|p| matches!(p.shape, Shape::String) && p.enum_values.is_empty())
            .map(|p| p.name.clone())
            .collect()
    };
    (catalog, names)
}

/// 0 = unbound, 1 = explicit null, 2 = value
fn bind(names: &[String], choices: &[u8]) -> BoundParameters {
    names
        .iter()
        .zip(choices)
        .fold(BoundParameters::new(), |bound, (name, choice)| match choice {
            0 => bound,
            1 => bound.with(name, Value::Null),
            _ => bound.with(name, json!(format!("v-{}", name))),
        })
}

#[test]
fn test_projection_never_emits_empty_objects_or_nulls() {
    let (catalog, names) = string_parameters();
    let (_, op) = catalog
        .resolve("autoscaling", "CreateAutoScalingGroup")
        .unwrap();
    let surface = ParameterSurface::for_operation(op).unwrap();
    assert!(names.len() > 5);

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(
            &prop::collection::vec(0u8..3, names.len()),
            |choices| {
                let bound = bind(&names, &choices);
                let context = Context::build(&surface, &bound, Selector::Default);
                let request = project(op, &context);
                let body = Value::Object(request.body.clone());

                prop_assert!(!contains_empty_object(&body) || request.is_empty());
                prop_assert!(!contains_null(&body));

                // Every value that was set shows up at its dotted path
                for (name, choice) in names.iter().zip(&choices) {
                    let param = surface.lookup(name).unwrap();
                    let found = request.get(&param.dotted_path());
                    if *choice == 2 {
                        prop_assert_eq!(found, Some(&json!(format!("v-{}", name))));
                    } else {
                        prop_assert!(found.is_none());
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

#[test]
fn test_projection_is_idempotent() {
    let (catalog, names) = string_parameters();
    let (_, op) = catalog
        .resolve("autoscaling", "CreateAutoScalingGroup")
        .unwrap();
    let surface = ParameterSurface::for_operation(op).unwrap();

    let mut runner = proptest::test_runner::TestRunner::default();
    runner
        .run(
            &prop::collection::vec(0u8..3, names.len()),
            |choices| {
                let bound = bind(&names, &choices);
                let context = Context::build(&surface, &bound, Selector::Default);
                let first = project(op, &context);
                let second = project(op, &context);
                prop_assert_eq!(&first, &second);

                let rebuilt = Context::build(&surface, &bound, Selector::Default);
                prop_assert_eq!(first, project(op, &rebuilt));
                Ok(())
            },
        )
        .unwrap();
}
