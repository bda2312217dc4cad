//! AWS KMS.

use super::Tag;
use crate::properties::resource_type;
use crate::value::Value;

resource_type! {
    pub struct Key = "AWS::KMS::Key" {
        "BypassPolicyLockoutSafetyCheck" => bypass_policy_lockout_safety_check: Value,
        "Description" => description: Value,
        "EnableKeyRotation" => enable_key_rotation: Value,
        "Enabled" => enabled: Value,
        "KeyPolicy" => key_policy: Value,
        "KeySpec" => key_spec: Value,
        "KeyUsage" => key_usage: Value,
        "MultiRegion" => multi_region: Value,
        "Origin" => origin: Value,
        "PendingWindowInDays" => pending_window_in_days: Value,
        "RotationPeriodInDays" => rotation_period_in_days: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

resource_type! {
    pub struct Alias = "AWS::KMS::Alias" {
        "AliasName" => alias_name: Value,
        "TargetKeyId" => target_key_id: Value,
    }
}
