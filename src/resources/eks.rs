//! Amazon EKS.

use super::Tag;
use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    pub struct Cluster = "AWS::EKS::Cluster" {
        "AccessConfig" => access_config: AccessConfig,
        "BootstrapSelfManagedAddons" => bootstrap_self_managed_addons: Value,
        "ComputeConfig" => compute_config: Value,
        "EncryptionConfig" => encryption_config: Vec<EncryptionConfig>,
        "KubernetesNetworkConfig" => kubernetes_network_config: KubernetesNetworkConfig,
        "Logging" => logging: Value,
        "Name" => name: Value,
        "OutpostConfig" => outpost_config: Value,
        "RemoteNetworkConfig" => remote_network_config: Value,
        "ResourcesVpcConfig" => resources_vpc_config: ResourcesVpcConfig,
        "RoleArn" => role_arn: Value,
        "StorageConfig" => storage_config: Value,
        "Tags" => tags: Vec<Tag>,
        "UpgradePolicy" => upgrade_policy: Value,
        "Version" => version: Value,
        "ZonalShiftConfig" => zonal_shift_config: Value,
    }
}

property_type! {
    pub struct AccessConfig {
        "AuthenticationMode" => authentication_mode: Value,
        "BootstrapClusterCreatorAdminPermissions" => bootstrap_cluster_creator_admin_permissions: Value,
    }
}

property_type! {
    pub struct EncryptionConfig {
        "Provider" => provider: Value,
        "Resources" => resources: Value,
    }
}

property_type! {
    pub struct KubernetesNetworkConfig {
        "ElasticLoadBalancing" => elastic_load_balancing: Value,
        "IpFamily" => ip_family: Value,
        "ServiceIpv4Cidr" => service_ipv4_cidr: Value,
        "ServiceIpv6Cidr" => service_ipv6_cidr: Value,
    }
}

property_type! {
    pub struct ResourcesVpcConfig {
        "EndpointPrivateAccess" => endpoint_private_access: Value,
        "EndpointPublicAccess" => endpoint_public_access: Value,
        "PublicAccessCidrs" => public_access_cidrs: Value,
        "SecurityGroupIds" => security_group_ids: Value,
        "SubnetIds" => subnet_ids: Value,
    }
}

resource_type! {
    /// A managed node group.
    pub struct Nodegroup = "AWS::EKS::Nodegroup" {
        "AmiType" => ami_type: Value,
        "CapacityType" => capacity_type: Value,
        "ClusterName" => cluster_name: Value,
        "DiskSize" => disk_size: Value,
        "ForceUpdateEnabled" => force_update_enabled: Value,
        "InstanceTypes" => instance_types: Value,
        /// A map of Kubernetes label names to values.
        "Labels" => labels: Value,
        "LaunchTemplate" => launch_template: LaunchTemplateSpecification,
        "NodeRepairConfig" => node_repair_config: Value,
        "NodeRole" => node_role: Value,
        "NodegroupName" => nodegroup_name: Value,
        "ReleaseVersion" => release_version: Value,
        "RemoteAccess" => remote_access: RemoteAccess,
        "ScalingConfig" => scaling_config: ScalingConfig,
        "Subnets" => subnets: Value,
        /// Unlike most resources, node group tags are a plain map.
        "Tags" => tags: Value,
        "Taints" => taints: Vec<Taint>,
        "UpdateConfig" => update_config: UpdateConfig,
        "Version" => version: Value,
    }
}

property_type! {
    pub struct LaunchTemplateSpecification {
        "Id" => id: Value,
        "Name" => name: Value,
        "Version" => version: Value,
    }
}

property_type! {
    pub struct RemoteAccess {
        "Ec2SshKey" => ec2_ssh_key: Value,
        "SourceSecurityGroups" => source_security_groups: Value,
    }
}

property_type! {
    pub struct ScalingConfig {
        "DesiredSize" => desired_size: Value,
        "MaxSize" => max_size: Value,
        "MinSize" => min_size: Value,
    }
}

property_type! {
    pub struct Taint {
        "Effect" => effect: Value,
        "Key" => key: Value,
        "Value" => value: Value,
    }
}

property_type! {
    pub struct UpdateConfig {
        "MaxUnavailable" => max_unavailable: Value,
        "MaxUnavailablePercentage" => max_unavailable_percentage: Value,
        "UpdateStrategy" => update_strategy: Value,
    }
}

resource_type! {
    pub struct FargateProfile = "AWS::EKS::FargateProfile" {
        "ClusterName" => cluster_name: Value,
        "FargateProfileName" => fargate_profile_name: Value,
        "PodExecutionRoleArn" => pod_execution_role_arn: Value,
        "Selectors" => selectors: Vec<Selector>,
        "Subnets" => subnets: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

property_type! {
    pub struct Selector {
        "Labels" => labels: Value,
        "Namespace" => namespace: Value,
    }
}

resource_type! {
    pub struct Addon = "AWS::EKS::Addon" {
        "AddonName" => addon_name: Value,
        "AddonVersion" => addon_version: Value,
        "ClusterName" => cluster_name: Value,
        "ConfigurationValues" => configuration_values: Value,
        "PodIdentityAssociations" => pod_identity_associations: Value,
        "PreserveOnDelete" => preserve_on_delete: Value,
        "ResolveConflicts" => resolve_conflicts: Value,
        "ServiceAccountRoleArn" => service_account_role_arn: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

resource_type! {
    pub struct AccessEntry = "AWS::EKS::AccessEntry" {
        "AccessPolicies" => access_policies: Value,
        "ClusterName" => cluster_name: Value,
        "KubernetesGroups" => kubernetes_groups: Value,
        "PrincipalArn" => principal_arn: Value,
        "Tags" => tags: Vec<Tag>,
        "Type" => access_entry_type: Value,
        "Username" => username: Value,
    }
}

resource_type! {
    pub struct PodIdentityAssociation = "AWS::EKS::PodIdentityAssociation" {
        "ClusterName" => cluster_name: Value,
        "Namespace" => namespace: Value,
        "RoleArn" => role_arn: Value,
        "ServiceAccount" => service_account: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{PropertyError, PropertyMap, PropertyType};
    use serde_json::json;

    fn raw(json: serde_json::Value) -> PropertyMap {
        Value::from_json(json)
            .unwrap()
            .as_map()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_nodegroup_decodes_nested_types() {
        let nodegroup = Nodegroup::decode_properties(
            raw(json!({
                "ClusterName": {"Ref": "ControlPlane"},
                "NodeRole": {"Fn::GetAtt": ["NodeInstanceRole", "Arn"]},
                "ScalingConfig": {"DesiredSize": 2, "MaxSize": 4, "MinSize": 1},
                "Taints": [{"Effect": "NO_SCHEDULE", "Key": "dedicated", "Value": "gpu"}],
                "Labels": {"alpha.eksctl.io/cluster-name": "demo"},
                "Tags": {"team": "platform"},
            })),
            "",
        )
        .unwrap();
        let scaling = nodegroup.scaling_config.unwrap();
        assert_eq!(scaling.max_size, Some(Value::from(4)));
        assert_eq!(nodegroup.taints.unwrap()[0].effect, Some(Value::from("NO_SCHEDULE")));
        assert_eq!(nodegroup.cluster_name, Some(Value::reference("ControlPlane")));
    }

    #[test]
    fn test_nodegroup_rejects_unknown_scaling_key() {
        let err = Nodegroup::decode_properties(
            raw(json!({"ScalingConfig": {"DesiredSize": 2, "Bogus": 1}})),
            "",
        )
        .unwrap_err();
        assert_eq!(
            err,
            PropertyError::Unknown {
                path: "ScalingConfig.Bogus".to_string()
            }
        );
    }

    #[test]
    fn test_cluster_encodes_declared_order() {
        let cluster = Cluster {
            version: Some(Value::from("1.31")),
            name: Some(Value::from("demo")),
            resources_vpc_config: Some(ResourcesVpcConfig {
                subnet_ids: Some(Value::from(vec![Value::reference("SubnetA")])),
                ..Default::default()
            }),
            ..Default::default()
        };
        let encoded = Value::Map(cluster.encode_properties()).to_json().unwrap();
        assert_eq!(
            serde_json::to_string(&encoded).unwrap(),
            r#"{"Name":"demo","ResourcesVpcConfig":{"SubnetIds":[{"Ref":"SubnetA"}]},"Version":"1.31"}"#
        );
    }
}
