//! Resource lifecycle policies.

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::properties::property_type;
use crate::value::Value;

/// What CloudFormation does with a resource when it leaves the stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum DeletionPolicy {
    #[default]
    Delete,
    Retain,
    RetainExceptOnCreate,
    Snapshot,
}

/// What CloudFormation does with the old physical resource on replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum UpdateReplacePolicy {
    #[default]
    Delete,
    Retain,
    Snapshot,
}

property_type! {
    /// The `UpdatePolicy` resource attribute.
    pub struct UpdatePolicy {
        "AutoScalingReplacingUpdate" => auto_scaling_replacing_update: AutoScalingReplacingUpdate,
        "AutoScalingRollingUpdate" => auto_scaling_rolling_update: AutoScalingRollingUpdate,
        "AutoScalingScheduledAction" => auto_scaling_scheduled_action: AutoScalingScheduledAction,
        "CodeDeployLambdaAliasUpdate" => code_deploy_lambda_alias_update: CodeDeployLambdaAliasUpdate,
        /// OpenSearch and Elasticsearch domains.
        "EnableVersionUpgrade" => enable_version_upgrade: Value,
        /// ElastiCache replication groups.
        "UseOnlineResharding" => use_online_resharding: Value,
    }
}

property_type! {
    pub struct AutoScalingReplacingUpdate {
        "WillReplace" => will_replace: Value,
    }
}

property_type! {
    pub struct AutoScalingRollingUpdate {
        "MaxBatchSize" => max_batch_size: Value,
        "MinActiveInstancesPercent" => min_active_instances_percent: Value,
        "MinInstancesInService" => min_instances_in_service: Value,
        "MinSuccessfulInstancesPercent" => min_successful_instances_percent: Value,
        "PauseTime" => pause_time: Value,
        "SuspendProcesses" => suspend_processes: Value,
        "WaitOnResourceSignals" => wait_on_resource_signals: Value,
    }
}

property_type! {
    pub struct AutoScalingScheduledAction {
        "IgnoreUnmodifiedGroupSizeProperties" => ignore_unmodified_group_size_properties: Value,
    }
}

property_type! {
    pub struct CodeDeployLambdaAliasUpdate {
        "AfterAllowTrafficHook" => after_allow_traffic_hook: Value,
        "ApplicationName" => application_name: Value,
        "BeforeAllowTrafficHook" => before_allow_traffic_hook: Value,
        "DeploymentGroupName" => deployment_group_name: Value,
    }
}

property_type! {
    /// The `CreationPolicy` resource attribute.
    pub struct CreationPolicy {
        "AutoScalingCreationPolicy" => auto_scaling_creation_policy: AutoScalingCreationPolicy,
        "ResourceSignal" => resource_signal: ResourceSignal,
        /// AppStream 2.0 fleets.
        "StartFleet" => start_fleet: Value,
    }
}

property_type! {
    pub struct AutoScalingCreationPolicy {
        "MinSuccessfulInstancesPercent" => min_successful_instances_percent: Value,
    }
}

property_type! {
    pub struct ResourceSignal {
        "Count" => count: Value,
        "Timeout" => timeout: Value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{PropertyError, PropertyMap, PropertyType};
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn raw(json: serde_json::Value) -> PropertyMap {
        match Value::from_json(json).unwrap() {
            Value::Map(map) => map,
            other => panic!("expected a map, got {other:?}"),
        }
    }

    #[test]
    fn test_wire_names_round_trip() {
        for policy in DeletionPolicy::iter() {
            assert_eq!(DeletionPolicy::from_str(policy.as_ref()).unwrap(), policy);
        }
        for policy in UpdateReplacePolicy::iter() {
            assert_eq!(UpdateReplacePolicy::from_str(&policy.to_string()).unwrap(), policy);
        }
    }

    #[test]
    fn test_parsing_is_case_sensitive() {
        assert!(DeletionPolicy::from_str("retain").is_err());
        assert!(UpdateReplacePolicy::from_str("RetainExceptOnCreate").is_err());
        assert_eq!(
            DeletionPolicy::from_str("RetainExceptOnCreate").unwrap(),
            DeletionPolicy::RetainExceptOnCreate
        );
    }

    #[test]
    fn test_default_is_delete() {
        assert_eq!(DeletionPolicy::default(), DeletionPolicy::Delete);
        assert_eq!(UpdateReplacePolicy::default(), UpdateReplacePolicy::Delete);
    }

    #[test]
    fn test_update_policy_decodes_typed_blocks() {
        let policy = UpdatePolicy::decode_properties(
            raw(json!({
                "AutoScalingRollingUpdate": {
                    "MaxBatchSize": 2,
                    "MinInstancesInService": {"Ref": "MinSize"},
                    "PauseTime": "PT5M",
                    "SuspendProcesses": ["HealthCheck", "ReplaceUnhealthy"],
                    "WaitOnResourceSignals": true
                },
                "AutoScalingScheduledAction": {"IgnoreUnmodifiedGroupSizeProperties": true}
            })),
            "UpdatePolicy",
        )
        .unwrap();
        let rolling = policy.auto_scaling_rolling_update.as_ref().unwrap();
        assert_eq!(rolling.max_batch_size, Some(Value::from(2)));
        assert_eq!(rolling.min_instances_in_service, Some(Value::reference("MinSize")));
        assert_eq!(rolling.wait_on_resource_signals, Some(Value::from(true)));
        assert!(policy.auto_scaling_replacing_update.is_none());

        let keys: Vec<_> = policy.encode_properties().into_keys().collect();
        assert_eq!(keys, vec!["AutoScalingRollingUpdate", "AutoScalingScheduledAction"]);
    }

    #[test]
    fn test_update_policy_rejects_misspelled_keys() {
        let err = UpdatePolicy::decode_properties(
            raw(json!({"AutoScalingRollingUpdate": {"MinInstancesInServce": 1}})),
            "UpdatePolicy",
        )
        .unwrap_err();
        assert_eq!(
            err,
            PropertyError::Unknown {
                path: "UpdatePolicy.AutoScalingRollingUpdate.MinInstancesInServce".to_string()
            }
        );
    }

    #[test]
    fn test_creation_policy_blocks_must_be_objects() {
        let err = CreationPolicy::decode_properties(
            raw(json!({"ResourceSignal": "PT15M"})),
            "CreationPolicy",
        )
        .unwrap_err();
        assert_eq!(
            err,
            PropertyError::InvalidType {
                path: "CreationPolicy.ResourceSignal".to_string(),
                expected: "an object"
            }
        );
    }
}
