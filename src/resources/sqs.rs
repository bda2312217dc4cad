//! Amazon SQS.

use super::Tag;
use crate::properties::resource_type;
use crate::value::Value;

resource_type! {
    pub struct Queue = "AWS::SQS::Queue" {
        "ContentBasedDeduplication" => content_based_deduplication: Value,
        "DeduplicationScope" => deduplication_scope: Value,
        "DelaySeconds" => delay_seconds: Value,
        "FifoQueue" => fifo_queue: Value,
        "FifoThroughputLimit" => fifo_throughput_limit: Value,
        "KmsDataKeyReusePeriodSeconds" => kms_data_key_reuse_period_seconds: Value,
        "KmsMasterKeyId" => kms_master_key_id: Value,
        "MaximumMessageSize" => maximum_message_size: Value,
        "MessageRetentionPeriod" => message_retention_period: Value,
        "QueueName" => queue_name: Value,
        "ReceiveMessageWaitTimeSeconds" => receive_message_wait_time_seconds: Value,
        "RedriveAllowPolicy" => redrive_allow_policy: Value,
        "RedrivePolicy" => redrive_policy: Value,
        "SqsManagedSseEnabled" => sqs_managed_sse_enabled: Value,
        "Tags" => tags: Vec<Tag>,
        "VisibilityTimeout" => visibility_timeout: Value,
    }
}

resource_type! {
    pub struct QueuePolicy = "AWS::SQS::QueuePolicy" {
        "PolicyDocument" => policy_document: Value,
        "Queues" => queues: Value,
    }
}
