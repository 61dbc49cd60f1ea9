//! Built-in service definitions shipped with the binary.

use super::{Member, OperationSchema, ServiceSchema, Shape};
use serde_json::json;

pub fn services() -> Vec<ServiceSchema> {
    vec![autoscaling(), ec2()]
}

fn launch_template_specification() -> Shape {
    Shape::structure(vec![
        Member::string("LaunchTemplateId"),
        Member::string("LaunchTemplateName"),
        Member::string("Version"),
    ])
}

fn tag_list() -> Shape {
    Shape::list(Shape::structure(vec![
        Member::string("Key"),
        Member::string("Value"),
        Member::string("ResourceId"),
        Member::string("ResourceType"),
        Member::boolean("PropagateAtLaunch"),
    ]))
}

fn autoscaling() -> ServiceSchema {
    ServiceSchema {
        name: "autoscaling".to_string(),
        endpoint_prefix: "autoscaling".to_string(),
        target_prefix: "AutoScaling_2011_01_01".to_string(),
        json_version: "1.1".to_string(),
        operations: vec![
            OperationSchema::new("DescribeAdjustmentTypes")
                .doc("Describes the available adjustment types for step scaling and simple scaling policies.")
                .output("AdjustmentTypes"),
            OperationSchema::new("DescribeAutoScalingGroups")
                .doc("Gets information about the Auto Scaling groups in the account and Region.")
                .output("AutoScalingGroups")
                .member(
                    Member::new("AutoScalingGroupNames", Shape::list(Shape::String))
                        .alias("AutoScalingGroupName"),
                )
                .member(Member::integer("MaxRecords"))
                .member(Member::string("NextToken")),
            OperationSchema::new("CreateAutoScalingGroup")
                .doc("Creates an Auto Scaling group with the specified name and attributes.")
                .mutating()
                .pass_thru("AutoScalingGroupName")
                .member(Member::string("AutoScalingGroupName").required())
                .member(Member::integer("MinSize").required())
                .member(Member::integer("MaxSize").required())
                .member(Member::integer("DesiredCapacity"))
                .member(Member::string("LaunchConfigurationName"))
                .member(
                    Member::new("LaunchTemplate", launch_template_specification())
                        .doc("Launch template used to launch instances."),
                )
                .member(Member::new(
                    "MixedInstancesPolicy",
                    Shape::structure(vec![
                        Member::new(
                            "LaunchTemplate",
                            Shape::structure(vec![
                                Member::new(
                                    "LaunchTemplateSpecification",
                                    launch_template_specification(),
                                ),
                                Member::new(
                                    "Overrides",
                                    Shape::list(Shape::structure(vec![
                                        Member::string("InstanceType"),
                                        Member::string("WeightedCapacity"),
                                    ])),
                                ),
                            ]),
                        ),
                        Member::new(
                            "InstancesDistribution",
                            Shape::structure(vec![
                                Member::string("OnDemandAllocationStrategy")
                                    .one_of(&["lowest-price", "prioritized"]),
                                Member::integer("OnDemandBaseCapacity"),
                                Member::integer("OnDemandPercentageAboveBaseCapacity"),
                                Member::string("SpotAllocationStrategy"),
                                Member::integer("SpotInstancePools"),
                                Member::string("SpotMaxPrice").allow_empty(),
                            ]),
                        ),
                    ]),
                ))
                .member(Member::new("AvailabilityZones", Shape::list(Shape::String)))
                .member(Member::new("LoadBalancerNames", Shape::list(Shape::String)))
                .member(Member::integer("HealthCheckGracePeriod"))
                .member(Member::string("HealthCheckType").one_of(&["EC2", "ELB"]))
                .member(Member::string("VPCZoneIdentifier"))
                .member(Member::boolean("NewInstancesProtectedFromScaleIn"))
                .member(Member::new("Tags", tag_list()).alias("Tag")),
            OperationSchema::new("DeleteAutoScalingGroup")
                .doc("Deletes the specified Auto Scaling group.")
                .mutating()
                .pass_thru("AutoScalingGroupName")
                .member(Member::string("AutoScalingGroupName").required())
                .member(Member::boolean("ForceDelete")),
            OperationSchema::new("SetDesiredCapacity")
                .doc("Sets the size of the specified Auto Scaling group.")
                .mutating()
                .pass_thru("AutoScalingGroupName")
                .member(Member::string("AutoScalingGroupName").required())
                .member(Member::integer("DesiredCapacity").required())
                .member(Member::boolean("HonorCooldown").default_value(json!(false))),
        ],
    }
}

fn ec2() -> ServiceSchema {
    ServiceSchema {
        name: "ec2".to_string(),
        endpoint_prefix: "ec2".to_string(),
        target_prefix: "AmazonEC2".to_string(),
        json_version: "1.1".to_string(),
        operations: vec![
            OperationSchema::new("CreateCustomerGateway")
                .doc("Provides information to AWS about your customer gateway device.")
                .mutating()
                .output("CustomerGateway")
                .member(Member::string("Type").required().one_of(&["ipsec.1"]))
                .member(Member::integer("BgpAsn").alias("BGPASN"))
                .member(Member::string("PublicIp"))
                .member(Member::string("CertificateArn"))
                .member(Member::string("DeviceName"))
                .member(Member::string("IpAddress").alias("PrivateIpAddress").allow_empty())
                .member(Member::boolean("DryRun")),
            OperationSchema::new("DeleteCustomerGateway")
                .doc("Deletes the specified customer gateway.")
                .mutating()
                .pass_thru("CustomerGatewayId")
                .member(Member::string("CustomerGatewayId").required())
                .member(Member::boolean("DryRun")),
            OperationSchema::new("DescribeCustomerGateways")
                .doc("Describes one or more of your VPN customer gateways.")
                .output("CustomerGateways")
                .member(
                    Member::new("CustomerGatewayIds", Shape::list(Shape::String))
                        .alias("CustomerGatewayId"),
                )
                .member(
                    Member::new(
                        "Filters",
                        Shape::list(Shape::structure(vec![
                            Member::string("Name"),
                            Member::new("Values", Shape::list(Shape::String)),
                        ])),
                    )
                    .alias("Filter"),
                )
                .member(Member::boolean("DryRun")),
        ],
    }
}
