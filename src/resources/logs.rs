//! Amazon CloudWatch Logs.

use super::Tag;
use crate::properties::resource_type;
use crate::value::Value;

resource_type! {
    pub struct LogGroup = "AWS::Logs::LogGroup" {
        "DataProtectionPolicy" => data_protection_policy: Value,
        "FieldIndexPolicies" => field_index_policies: Value,
        "KmsKeyId" => kms_key_id: Value,
        "LogGroupClass" => log_group_class: Value,
        "LogGroupName" => log_group_name: Value,
        "RetentionInDays" => retention_in_days: Value,
        "Tags" => tags: Vec<Tag>,
    }
}
