//! Amazon SNS.

use super::Tag;
use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    pub struct Topic = "AWS::SNS::Topic" {
        "ArchivePolicy" => archive_policy: Value,
        "ContentBasedDeduplication" => content_based_deduplication: Value,
        "DataProtectionPolicy" => data_protection_policy: Value,
        "DeliveryStatusLogging" => delivery_status_logging: Vec<LoggingConfig>,
        "DisplayName" => display_name: Value,
        "FifoThroughputScope" => fifo_throughput_scope: Value,
        "FifoTopic" => fifo_topic: Value,
        "KmsMasterKeyId" => kms_master_key_id: Value,
        "SignatureVersion" => signature_version: Value,
        /// Inline subscriptions. Prefer [`Subscription`] resources for anything
        /// that needs a filter policy.
        "Subscription" => subscription: Vec<TopicSubscription>,
        "Tags" => tags: Vec<Tag>,
        "TopicName" => topic_name: Value,
        "TracingConfig" => tracing_config: Value,
    }
}

property_type! {
    pub struct TopicSubscription {
        "Endpoint" => endpoint: Value,
        "Protocol" => protocol: Value,
    }
}

property_type! {
    pub struct LoggingConfig {
        "FailureFeedbackRoleArn" => failure_feedback_role_arn: Value,
        "Protocol" => protocol: Value,
        "SuccessFeedbackRoleArn" => success_feedback_role_arn: Value,
        "SuccessFeedbackSampleRate" => success_feedback_sample_rate: Value,
    }
}

resource_type! {
    pub struct Subscription = "AWS::SNS::Subscription" {
        "DeliveryPolicy" => delivery_policy: Value,
        "Endpoint" => endpoint: Value,
        "FilterPolicy" => filter_policy: Value,
        "FilterPolicyScope" => filter_policy_scope: Value,
        "Protocol" => protocol: Value,
        "RawMessageDelivery" => raw_message_delivery: Value,
        "RedrivePolicy" => redrive_policy: Value,
        "Region" => region: Value,
        "ReplayPolicy" => replay_policy: Value,
        "SubscriptionRoleArn" => subscription_role_arn: Value,
        "TopicArn" => topic_arn: Value,
    }
}

resource_type! {
    pub struct TopicPolicy = "AWS::SNS::TopicPolicy" {
        "PolicyDocument" => policy_document: Value,
        "Topics" => topics: Value,
    }
}
