//! Integration tests for the command adapter pipeline against a recording client

use crate::integration::test_utils::{RecordingClient, RecordingConfirmer};
use awscmd::adapter::{
    AutoConfirm, BoundParameters, CommandAdapter, Invocation, InvocationOptions, OutputEnvelope,
};
use awscmd::error::{AdapterError, ClientError};
use awscmd::schema::Catalog;
use serde_json::{json, Value};

fn raw(pairs: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    pairs
        .iter()
        .map(|(name, values)| {
            (
                name.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

fn forced() -> InvocationOptions {
    InvocationOptions {
        force: true,
        ..InvocationOptions::default()
    }
}

fn completed(invocation: Invocation) -> OutputEnvelope {
    match invocation {
        Invocation::Completed(envelope) => envelope,
        other => panic!("expected completed invocation, got {:?}", other),
    }
}

#[test]
fn test_describe_adjustment_types_sends_empty_request() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("autoscaling", "describe-adjustment-types").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let client = RecordingClient::returning(json!({
        "AdjustmentTypes": [{"AdjustmentType": "ChangeInCapacity"}],
        "ResponseMetadata": {"RequestId": "r-1"}
    }));

    let invocation = adapter
        .run(
            &BoundParameters::new(),
            &InvocationOptions::default(),
            client.as_ref(),
            &AutoConfirm(false),
        )
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].is_empty());
    assert_eq!(calls[0].operation, "DescribeAdjustmentTypes");
    assert_eq!(
        completed(invocation).payload(),
        Some(&json!([{"AdjustmentType": "ChangeInCapacity"}]))
    );
}

#[test]
fn test_create_customer_gateway_omits_null_public_ip() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "CreateCustomerGateway").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = adapter
        .surface()
        .bind(raw(&[
            ("Type", &["ipsec.1"]),
            ("BgpAsn", &["65000"]),
            ("PublicIp", &[""]),
        ]))
        .unwrap();
    assert_eq!(bound.get("PublicIp"), Some(&Value::Null));

    let client = RecordingClient::returning(json!({
        "CustomerGateway": {"CustomerGatewayId": "cgw-1", "Type": "ipsec.1"}
    }));
    let invocation = adapter
        .run(&bound, &forced(), client.as_ref(), &AutoConfirm(false))
        .unwrap();

    let request = &client.calls()[0];
    assert_eq!(request.get("Type"), Some(&json!("ipsec.1")));
    assert_eq!(request.get("BgpAsn"), Some(&json!(65000)));
    assert!(!request.body.contains_key("PublicIp"));
    assert_eq!(
        completed(invocation).payload(),
        Some(&json!({"CustomerGatewayId": "cgw-1", "Type": "ipsec.1"}))
    );
}

#[test]
fn test_unset_launch_template_is_absent_from_request() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("autoscaling", "CreateAutoScalingGroup").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = adapter
        .surface()
        .bind(raw(&[
            ("AutoScalingGroupName", &["web"]),
            ("MinSize", &["1"]),
            ("MaxSize", &["3"]),
            ("LaunchTemplate_LaunchTemplateId", &[""]),
            (
                "MixedInstancesPolicy_InstancesDistribution_SpotAllocationStrategy",
                &["lowest-price"],
            ),
        ]))
        .unwrap();
    let client = RecordingClient::returning(json!({}));

    adapter
        .run(&bound, &forced(), client.as_ref(), &AutoConfirm(false))
        .unwrap();

    let request = &client.calls()[0];
    assert!(!request.body.contains_key("LaunchTemplate"));
    assert_eq!(
        request.get("MixedInstancesPolicy.InstancesDistribution.SpotAllocationStrategy"),
        Some(&json!("lowest-price"))
    );
    assert!(request.get("MixedInstancesPolicy.LaunchTemplate").is_none());
    assert_eq!(request.get("MinSize"), Some(&json!(1)));
}

#[test]
fn test_select_echo_with_pass_thru_makes_no_call() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "DeleteCustomerGateway").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = BoundParameters::new().with("CustomerGatewayId", json!("cgw-1"));
    let client = RecordingClient::returning(json!({}));
    let confirmer = RecordingConfirmer::answering(true);

    let err = adapter
        .run(
            &bound,
            &InvocationOptions {
                select: Some("^CustomerGatewayId".to_string()),
                pass_thru: true,
                ..InvocationOptions::default()
            },
            client.as_ref(),
            &confirmer,
        )
        .unwrap_err();

    assert!(matches!(err, AdapterError::Selector(_)));
    assert!(err.is_configuration());
    assert_eq!(client.call_count(), 0);
    assert!(confirmer.prompts().is_empty());
}

#[test]
fn test_declined_confirmation_makes_no_call() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "delete-customer-gateway").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = BoundParameters::new().with("CustomerGatewayId", json!("cgw-9"));
    let client = RecordingClient::returning(json!({}));
    let confirmer = RecordingConfirmer::answering(false);

    let invocation = adapter
        .run(&bound, &InvocationOptions::default(), client.as_ref(), &confirmer)
        .unwrap();

    assert_eq!(invocation, Invocation::Declined);
    assert_eq!(client.call_count(), 0);
    assert_eq!(
        confirmer.prompts(),
        vec!["Performing ec2:DeleteCustomerGateway on target \"cgw-9\". Continue?".to_string()]
    );
}

#[test]
fn test_force_skips_confirmation() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "DeleteCustomerGateway").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = BoundParameters::new().with("CustomerGatewayId", json!("cgw-9"));
    let client = RecordingClient::returning(json!({}));
    let confirmer = RecordingConfirmer::answering(false);

    let invocation = adapter
        .run(&bound, &forced(), client.as_ref(), &confirmer)
        .unwrap();

    assert!(confirmer.prompts().is_empty());
    assert_eq!(client.call_count(), 1);
    // Void operation: nothing is emitted
    assert_eq!(completed(invocation), OutputEnvelope::Success(None));
}

#[test]
fn test_read_only_operation_never_prompts() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "DescribeCustomerGateways").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let client = RecordingClient::returning(json!({"CustomerGateways": []}));
    let confirmer = RecordingConfirmer::answering(false);

    let invocation = adapter
        .run(
            &BoundParameters::new(),
            &InvocationOptions::default(),
            client.as_ref(),
            &confirmer,
        )
        .unwrap();

    assert!(confirmer.prompts().is_empty());
    assert_eq!(completed(invocation).payload(), Some(&json!([])));
}

#[test]
fn test_what_if_previews_without_calling() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("autoscaling", "SetDesiredCapacity").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = adapter
        .surface()
        .bind(raw(&[
            ("AutoScalingGroupName", &["web"]),
            ("DesiredCapacity", &["4"]),
        ]))
        .unwrap();
    let client = RecordingClient::returning(json!({}));
    let confirmer = RecordingConfirmer::answering(false);

    let invocation = adapter
        .run(
            &bound,
            &InvocationOptions {
                what_if: true,
                ..InvocationOptions::default()
            },
            client.as_ref(),
            &confirmer,
        )
        .unwrap();

    match invocation {
        Invocation::Previewed(request) => {
            assert_eq!(request.operation, "SetDesiredCapacity");
            assert_eq!(request.get("DesiredCapacity"), Some(&json!(4)));
            // Default applied for the unbound flag
            assert_eq!(request.get("HonorCooldown"), Some(&json!(false)));
        }
        other => panic!("expected preview, got {:?}", other),
    }
    assert_eq!(client.call_count(), 0);
    assert!(confirmer.prompts().is_empty());
}

#[test]
fn test_default_selectors_follow_operation_defaults() {
    let catalog = Catalog::builtin();
    let response = json!({
        "CustomerGateway": {"CustomerGatewayId": "cgw-1"},
        "CustomerGateways": [{"CustomerGatewayId": "cgw-1"}],
        "AutoScalingGroups": [{"AutoScalingGroupName": "web"}],
        "AdjustmentTypes": []
    });
    let cases: &[(&str, &str, Option<Value>)] = &[
        ("ec2", "CreateCustomerGateway", Some(json!({"CustomerGatewayId": "cgw-1"}))),
        ("ec2", "DescribeCustomerGateways", Some(json!([{"CustomerGatewayId": "cgw-1"}]))),
        ("ec2", "DeleteCustomerGateway", None),
        ("autoscaling", "DescribeAutoScalingGroups", Some(json!([{"AutoScalingGroupName": "web"}]))),
        ("autoscaling", "DeleteAutoScalingGroup", None),
    ];

    for (service, operation, expected) in cases {
        let (svc, op) = catalog.resolve(service, operation).unwrap();
        let adapter = CommandAdapter::new(svc, op).unwrap();
        let client = RecordingClient::returning(response.clone());
        let envelope = completed(
            adapter
                .run(&BoundParameters::new(), &forced(), client.as_ref(), &AutoConfirm(true))
                .unwrap(),
        );
        assert_eq!(envelope.payload(), expected.as_ref(), "{}:{}", service, operation);
    }
}

#[test]
fn test_pass_thru_echoes_parameter_instead_of_response() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("autoscaling", "DeleteAutoScalingGroup").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = BoundParameters::new().with("AutoScalingGroupName", json!("web"));
    let client = RecordingClient::returning(json!({"ResponseMetadata": {}}));

    let envelope = completed(
        adapter
            .run(
                &bound,
                &InvocationOptions {
                    pass_thru: true,
                    force: true,
                    ..InvocationOptions::default()
                },
                client.as_ref(),
                &AutoConfirm(false),
            )
            .unwrap(),
    );

    assert_eq!(envelope.payload(), Some(&json!("web")));
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_full_response_and_named_field_selectors() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "CreateCustomerGateway").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = BoundParameters::new().with("Type", json!("ipsec.1"));
    let response = json!({"CustomerGateway": {"CustomerGatewayId": "cgw-7", "State": "pending"}});

    let run = |select: &str| {
        let client = RecordingClient::returning(response.clone());
        completed(
            adapter
                .run(
                    &bound,
                    &InvocationOptions {
                        select: Some(select.to_string()),
                        force: true,
                        ..InvocationOptions::default()
                    },
                    client.as_ref(),
                    &AutoConfirm(false),
                )
                .unwrap(),
        )
    };

    assert_eq!(run("*").payload(), Some(&response));
    assert_eq!(
        run("CustomerGateway.CustomerGatewayId").payload(),
        Some(&json!("cgw-7"))
    );
    assert_eq!(run("^Type").payload(), Some(&json!("ipsec.1")));
}

#[test]
fn test_service_failure_is_captured() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "DeleteCustomerGateway").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let bound = BoundParameters::new().with("CustomerGatewayId", json!("cgw-404"));
    let client = RecordingClient::failing(ClientError::Service {
        code: "InvalidCustomerGatewayID.NotFound".to_string(),
        message: "The customerGateway ID 'cgw-404' does not exist".to_string(),
        status: 400,
    });

    let envelope = completed(
        adapter
            .run(&bound, &forced(), client.as_ref(), &AutoConfirm(false))
            .unwrap(),
    );

    let error = envelope.error().unwrap();
    assert!(!envelope.is_success());
    assert_eq!(error.kind, "service");
    assert_eq!(error.code.as_deref(), Some("InvalidCustomerGatewayID.NotFound"));
    assert_eq!(error.operation, "DeleteCustomerGateway");
}

#[test]
fn test_network_failure_names_endpoint_and_region() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "DescribeCustomerGateways").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let client = RecordingClient::failing(ClientError::Network {
        message: "connection refused".to_string(),
    });

    let envelope = completed(
        adapter
            .run(&BoundParameters::new(), &forced(), client.as_ref(), &AutoConfirm(false))
            .unwrap(),
    );

    let error = envelope.error().unwrap();
    assert_eq!(error.kind, "endpoint");
    assert!(error.message.contains("http://mock.invalid"));
    assert!(error.message.contains("us-east-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pipeline_runs_inside_async_host() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("autoscaling", "DescribeAdjustmentTypes").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let client = RecordingClient::returning(json!({"AdjustmentTypes": ["ExactCapacity"]}));

    let envelope = completed(
        adapter
            .run(&BoundParameters::new(), &forced(), client.as_ref(), &AutoConfirm(false))
            .unwrap(),
    );
    assert_eq!(envelope.payload(), Some(&json!(["ExactCapacity"])));
}

#[test]
fn test_all_null_filters_never_reach_the_client() {
    let catalog = Catalog::builtin();
    let (svc, op) = catalog.resolve("ec2", "describe-customer-gateways").unwrap();
    let adapter = CommandAdapter::new(svc, op).unwrap();
    let client = RecordingClient::returning(json!({"CustomerGateways": []}));
    let bound = adapter
        .surface()
        .bind(raw(&[
            ("Filters", &[r#"[{"Name":null,"Values":null}]"#]),
            ("CustomerGatewayIds", &["cgw-1"]),
        ]))
        .unwrap();

    adapter
        .run(
            &bound,
            &InvocationOptions::default(),
            client.as_ref(),
            &AutoConfirm(false),
        )
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].get("Filters").is_none());
    assert_eq!(calls[0].get("CustomerGatewayIds"), Some(&json!(["cgw-1"])));
}
