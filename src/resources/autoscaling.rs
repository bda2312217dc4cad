//! Amazon EC2 Auto Scaling.

use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    pub struct AutoScalingGroup = "AWS::AutoScaling::AutoScalingGroup" {
        "AutoScalingGroupName" => auto_scaling_group_name: Value,
        "AvailabilityZoneDistribution" => availability_zone_distribution: Value,
        "AvailabilityZoneImpairmentPolicy" => availability_zone_impairment_policy: Value,
        "AvailabilityZones" => availability_zones: Value,
        "CapacityRebalance" => capacity_rebalance: Value,
        "CapacityReservationSpecification" => capacity_reservation_specification: Value,
        "Context" => context: Value,
        "Cooldown" => cooldown: Value,
        "DefaultInstanceWarmup" => default_instance_warmup: Value,
        "DesiredCapacity" => desired_capacity: Value,
        "DesiredCapacityType" => desired_capacity_type: Value,
        "HealthCheckGracePeriod" => health_check_grace_period: Value,
        "HealthCheckType" => health_check_type: Value,
        "InstanceId" => instance_id: Value,
        "InstanceMaintenancePolicy" => instance_maintenance_policy: Value,
        "LaunchConfigurationName" => launch_configuration_name: Value,
        "LaunchTemplate" => launch_template: LaunchTemplateSpecification,
        "LifecycleHookSpecificationList" => lifecycle_hook_specification_list: Value,
        "LoadBalancerNames" => load_balancer_names: Value,
        "MaxInstanceLifetime" => max_instance_lifetime: Value,
        "MaxSize" => max_size: Value,
        "MetricsCollection" => metrics_collection: Value,
        "MinSize" => min_size: Value,
        /// Instance requirements and overrides nest several levels deep and stay untyped.
        "MixedInstancesPolicy" => mixed_instances_policy: Value,
        "NewInstancesProtectedFromScaleIn" => new_instances_protected_from_scale_in: Value,
        "NotificationConfigurations" => notification_configurations: Value,
        "PlacementGroup" => placement_group: Value,
        "ServiceLinkedRoleARN" => service_linked_role_arn: Value,
        "SkipZonalShiftValidation" => skip_zonal_shift_validation: Value,
        "Tags" => tags: Vec<TagProperty>,
        "TargetGroupARNs" => target_group_arns: Value,
        "TerminationPolicies" => termination_policies: Value,
        "TrafficSources" => traffic_sources: Value,
        "VPCZoneIdentifier" => vpc_zone_identifier: Value,
    }
}

property_type! {
    pub struct LaunchTemplateSpecification {
        "LaunchTemplateId" => launch_template_id: Value,
        "LaunchTemplateName" => launch_template_name: Value,
        "Version" => version: Value,
    }
}

property_type! {
    /// Auto Scaling tags carry an extra `PropagateAtLaunch` flag.
    pub struct TagProperty {
        "Key" => key: Value,
        "PropagateAtLaunch" => propagate_at_launch: Value,
        "Value" => value: Value,
    }
}

resource_type! {
    pub struct LaunchConfiguration = "AWS::AutoScaling::LaunchConfiguration" {
        "AssociatePublicIpAddress" => associate_public_ip_address: Value,
        "BlockDeviceMappings" => block_device_mappings: Value,
        "ClassicLinkVPCId" => classic_link_vpc_id: Value,
        "ClassicLinkVPCSecurityGroups" => classic_link_vpc_security_groups: Value,
        "EbsOptimized" => ebs_optimized: Value,
        "IamInstanceProfile" => iam_instance_profile: Value,
        "ImageId" => image_id: Value,
        "InstanceId" => instance_id: Value,
        "InstanceMonitoring" => instance_monitoring: Value,
        "InstanceType" => instance_type: Value,
        "KernelId" => kernel_id: Value,
        "KeyName" => key_name: Value,
        "LaunchConfigurationName" => launch_configuration_name: Value,
        "MetadataOptions" => metadata_options: Value,
        "PlacementTenancy" => placement_tenancy: Value,
        "RamDiskId" => ram_disk_id: Value,
        "SecurityGroups" => security_groups: Value,
        "SpotPrice" => spot_price: Value,
        "UserData" => user_data: Value,
    }
}

resource_type! {
    pub struct LifecycleHook = "AWS::AutoScaling::LifecycleHook" {
        "AutoScalingGroupName" => auto_scaling_group_name: Value,
        "DefaultResult" => default_result: Value,
        "HeartbeatTimeout" => heartbeat_timeout: Value,
        "LifecycleHookName" => lifecycle_hook_name: Value,
        "LifecycleTransition" => lifecycle_transition: Value,
        "NotificationMetadata" => notification_metadata: Value,
        "NotificationTargetARN" => notification_target_arn: Value,
        "RoleARN" => role_arn: Value,
    }
}
