//! Typed resource declarations, grouped by service.
//!
//! Adding a resource type means declaring it with `resource_type!` in its
//! service module and listing it in `REGISTRATIONS`.

pub mod autoscaling;
pub mod cloudformation;
pub mod ec2;
pub mod eks;
pub mod iam;
pub mod kms;
pub mod lambda;
pub mod logs;
pub mod s3;
pub mod sns;
pub mod sqs;

use crate::properties::{decode_resource, property_type, ResourceType};
use crate::registry::Registration;
use crate::value::Value;

property_type! {
    /// The `Key`/`Value` pair most services use for tagging.
    pub struct Tag {
        "Key" => key: Value,
        "Value" => value: Value,
    }
}

impl Tag {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Tag {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

macro_rules! registrations {
    ($($ty:ty),* $(,)?) => {
        &[
            $(
                Registration {
                    type_name: <$ty as ResourceType>::TYPE_NAME,
                    decode: decode_resource::<$ty>,
                },
            )*
        ]
    };
}

pub(crate) static REGISTRATIONS: &[Registration] = registrations![
    autoscaling::AutoScalingGroup,
    autoscaling::LaunchConfiguration,
    autoscaling::LifecycleHook,
    cloudformation::Stack,
    cloudformation::WaitCondition,
    cloudformation::WaitConditionHandle,
    ec2::Eip,
    ec2::InternetGateway,
    ec2::LaunchTemplate,
    ec2::NatGateway,
    ec2::Route,
    ec2::RouteTable,
    ec2::SecurityGroup,
    ec2::SecurityGroupEgress,
    ec2::SecurityGroupIngress,
    ec2::Subnet,
    ec2::SubnetRouteTableAssociation,
    ec2::Vpc,
    ec2::VpcCidrBlock,
    ec2::VpcEndpoint,
    ec2::VpcGatewayAttachment,
    eks::AccessEntry,
    eks::Addon,
    eks::Cluster,
    eks::FargateProfile,
    eks::Nodegroup,
    eks::PodIdentityAssociation,
    iam::InstanceProfile,
    iam::ManagedPolicy,
    iam::OidcProvider,
    iam::Policy,
    iam::Role,
    iam::ServiceLinkedRole,
    kms::Alias,
    kms::Key,
    lambda::EventSourceMapping,
    lambda::Function,
    lambda::Permission,
    logs::LogGroup,
    s3::Bucket,
    s3::BucketPolicy,
    sns::Subscription,
    sns::Topic,
    sns::TopicPolicy,
    sqs::Queue,
    sqs::QueuePolicy,
];
