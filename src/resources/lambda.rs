//! AWS Lambda.

use super::Tag;
use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    pub struct Function = "AWS::Lambda::Function" {
        "Architectures" => architectures: Value,
        "Code" => code: Code,
        "CodeSigningConfigArn" => code_signing_config_arn: Value,
        "DeadLetterConfig" => dead_letter_config: Value,
        "Description" => description: Value,
        "Environment" => environment: Environment,
        "EphemeralStorage" => ephemeral_storage: Value,
        "FileSystemConfigs" => file_system_configs: Value,
        "FunctionName" => function_name: Value,
        "Handler" => handler: Value,
        "ImageConfig" => image_config: Value,
        "KmsKeyArn" => kms_key_arn: Value,
        "Layers" => layers: Value,
        "LoggingConfig" => logging_config: Value,
        "MemorySize" => memory_size: Value,
        "PackageType" => package_type: Value,
        "RecursiveLoop" => recursive_loop: Value,
        "ReservedConcurrentExecutions" => reserved_concurrent_executions: Value,
        "Role" => role: Value,
        "Runtime" => runtime: Value,
        "RuntimeManagementConfig" => runtime_management_config: Value,
        "SnapStart" => snap_start: Value,
        "Tags" => tags: Vec<Tag>,
        "Timeout" => timeout: Value,
        "TracingConfig" => tracing_config: Value,
        "VpcConfig" => vpc_config: VpcConfig,
    }
}

property_type! {
    pub struct Code {
        "ImageUri" => image_uri: Value,
        "S3Bucket" => s3_bucket: Value,
        "S3Key" => s3_key: Value,
        "S3ObjectVersion" => s3_object_version: Value,
        "SourceKMSKeyArn" => source_kms_key_arn: Value,
        "ZipFile" => zip_file: Value,
    }
}

property_type! {
    pub struct Environment {
        "Variables" => variables: Value,
    }
}

property_type! {
    pub struct VpcConfig {
        "Ipv6AllowedForDualStack" => ipv6_allowed_for_dual_stack: Value,
        "SecurityGroupIds" => security_group_ids: Value,
        "SubnetIds" => subnet_ids: Value,
    }
}

resource_type! {
    pub struct Permission = "AWS::Lambda::Permission" {
        "Action" => action: Value,
        "EventSourceToken" => event_source_token: Value,
        "FunctionName" => function_name: Value,
        "FunctionUrlAuthType" => function_url_auth_type: Value,
        "Principal" => principal: Value,
        "PrincipalOrgID" => principal_org_id: Value,
        "SourceAccount" => source_account: Value,
        "SourceArn" => source_arn: Value,
    }
}

resource_type! {
    pub struct EventSourceMapping = "AWS::Lambda::EventSourceMapping" {
        "AmazonManagedKafkaEventSourceConfig" => amazon_managed_kafka_event_source_config: Value,
        "BatchSize" => batch_size: Value,
        "BisectBatchOnFunctionError" => bisect_batch_on_function_error: Value,
        "DestinationConfig" => destination_config: Value,
        "DocumentDBEventSourceConfig" => document_db_event_source_config: Value,
        "Enabled" => enabled: Value,
        "EventSourceArn" => event_source_arn: Value,
        "FilterCriteria" => filter_criteria: Value,
        "FunctionName" => function_name: Value,
        "FunctionResponseTypes" => function_response_types: Value,
        "KmsKeyArn" => kms_key_arn: Value,
        "MaximumBatchingWindowInSeconds" => maximum_batching_window_in_seconds: Value,
        "MaximumRecordAgeInSeconds" => maximum_record_age_in_seconds: Value,
        "MaximumRetryAttempts" => maximum_retry_attempts: Value,
        "MetricsConfig" => metrics_config: Value,
        "ParallelizationFactor" => parallelization_factor: Value,
        "ProvisionedPollerConfig" => provisioned_poller_config: Value,
        "Queues" => queues: Value,
        "ScalingConfig" => scaling_config: Value,
        "SelfManagedEventSource" => self_managed_event_source: Value,
        "SelfManagedKafkaEventSourceConfig" => self_managed_kafka_event_source_config: Value,
        "SourceAccessConfigurations" => source_access_configurations: Value,
        "StartingPosition" => starting_position: Value,
        "StartingPositionTimestamp" => starting_position_timestamp: Value,
        "Tags" => tags: Vec<Tag>,
        "Topics" => topics: Value,
        "TumblingWindowInSeconds" => tumbling_window_in_seconds: Value,
    }
}
