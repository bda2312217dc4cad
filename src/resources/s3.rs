//! Amazon S3.

use super::Tag;
use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    /// Most nested configuration blocks are kept as [`Value`].
    pub struct Bucket = "AWS::S3::Bucket" {
        "AccelerateConfiguration" => accelerate_configuration: Value,
        "AccessControl" => access_control: Value,
        "AnalyticsConfigurations" => analytics_configurations: Value,
        "BucketEncryption" => bucket_encryption: Value,
        "BucketName" => bucket_name: Value,
        "CorsConfiguration" => cors_configuration: Value,
        "IntelligentTieringConfigurations" => intelligent_tiering_configurations: Value,
        "InventoryConfigurations" => inventory_configurations: Value,
        "LifecycleConfiguration" => lifecycle_configuration: Value,
        "LoggingConfiguration" => logging_configuration: Value,
        "MetadataTableConfiguration" => metadata_table_configuration: Value,
        "MetricsConfigurations" => metrics_configurations: Value,
        "NotificationConfiguration" => notification_configuration: Value,
        "ObjectLockConfiguration" => object_lock_configuration: Value,
        "ObjectLockEnabled" => object_lock_enabled: Value,
        "OwnershipControls" => ownership_controls: Value,
        "PublicAccessBlockConfiguration" => public_access_block_configuration: PublicAccessBlockConfiguration,
        "ReplicationConfiguration" => replication_configuration: Value,
        "Tags" => tags: Vec<Tag>,
        "VersioningConfiguration" => versioning_configuration: VersioningConfiguration,
        "WebsiteConfiguration" => website_configuration: Value,
    }
}

property_type! {
    pub struct PublicAccessBlockConfiguration {
        "BlockPublicAcls" => block_public_acls: Value,
        "BlockPublicPolicy" => block_public_policy: Value,
        "IgnorePublicAcls" => ignore_public_acls: Value,
        "RestrictPublicBuckets" => restrict_public_buckets: Value,
    }
}

property_type! {
    pub struct VersioningConfiguration {
        "Status" => status: Value,
    }
}

resource_type! {
    pub struct BucketPolicy = "AWS::S3::BucketPolicy" {
        "Bucket" => bucket: Value,
        "PolicyDocument" => policy_document: Value,
    }
}
