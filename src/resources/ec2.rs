//! Amazon EC2 and VPC networking.

use super::Tag;
use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    pub struct Vpc = "AWS::EC2::VPC" {
        "CidrBlock" => cidr_block: Value,
        "EnableDnsHostnames" => enable_dns_hostnames: Value,
        "EnableDnsSupport" => enable_dns_support: Value,
        "InstanceTenancy" => instance_tenancy: Value,
        "Ipv4IpamPoolId" => ipv4_ipam_pool_id: Value,
        "Ipv4NetmaskLength" => ipv4_netmask_length: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

resource_type! {
    /// Associates an additional IPv4 or IPv6 CIDR block with a VPC.
    pub struct VpcCidrBlock = "AWS::EC2::VPCCidrBlock" {
        "AmazonProvidedIpv6CidrBlock" => amazon_provided_ipv6_cidr_block: Value,
        "CidrBlock" => cidr_block: Value,
        "Ipv4IpamPoolId" => ipv4_ipam_pool_id: Value,
        "Ipv4NetmaskLength" => ipv4_netmask_length: Value,
        "Ipv6CidrBlock" => ipv6_cidr_block: Value,
        "Ipv6CidrBlockNetworkBorderGroup" => ipv6_cidr_block_network_border_group: Value,
        "Ipv6IpamPoolId" => ipv6_ipam_pool_id: Value,
        "Ipv6NetmaskLength" => ipv6_netmask_length: Value,
        "Ipv6Pool" => ipv6_pool: Value,
        "VpcId" => vpc_id: Value,
    }
}

resource_type! {
    pub struct Subnet = "AWS::EC2::Subnet" {
        "AssignIpv6AddressOnCreation" => assign_ipv6_address_on_creation: Value,
        "AvailabilityZone" => availability_zone: Value,
        "AvailabilityZoneId" => availability_zone_id: Value,
        "CidrBlock" => cidr_block: Value,
        "EnableDns64" => enable_dns64: Value,
        "EnableLniAtDeviceIndex" => enable_lni_at_device_index: Value,
        "Ipv4IpamPoolId" => ipv4_ipam_pool_id: Value,
        "Ipv4NetmaskLength" => ipv4_netmask_length: Value,
        "Ipv6CidrBlock" => ipv6_cidr_block: Value,
        "Ipv6IpamPoolId" => ipv6_ipam_pool_id: Value,
        "Ipv6Native" => ipv6_native: Value,
        "Ipv6NetmaskLength" => ipv6_netmask_length: Value,
        "MapPublicIpOnLaunch" => map_public_ip_on_launch: Value,
        "OutpostArn" => outpost_arn: Value,
        "PrivateDnsNameOptionsOnLaunch" => private_dns_name_options_on_launch: Value,
        "Tags" => tags: Vec<Tag>,
        "VpcId" => vpc_id: Value,
    }
}

resource_type! {
    pub struct InternetGateway = "AWS::EC2::InternetGateway" {
        "Tags" => tags: Vec<Tag>,
    }
}

resource_type! {
    pub struct VpcGatewayAttachment = "AWS::EC2::VPCGatewayAttachment" {
        "InternetGatewayId" => internet_gateway_id: Value,
        "VpcId" => vpc_id: Value,
        "VpnGatewayId" => vpn_gateway_id: Value,
    }
}

resource_type! {
    pub struct RouteTable = "AWS::EC2::RouteTable" {
        "Tags" => tags: Vec<Tag>,
        "VpcId" => vpc_id: Value,
    }
}

resource_type! {
    pub struct Route = "AWS::EC2::Route" {
        "CarrierGatewayId" => carrier_gateway_id: Value,
        "CoreNetworkArn" => core_network_arn: Value,
        "DestinationCidrBlock" => destination_cidr_block: Value,
        "DestinationIpv6CidrBlock" => destination_ipv6_cidr_block: Value,
        "DestinationPrefixListId" => destination_prefix_list_id: Value,
        "EgressOnlyInternetGatewayId" => egress_only_internet_gateway_id: Value,
        "GatewayId" => gateway_id: Value,
        "InstanceId" => instance_id: Value,
        "LocalGatewayId" => local_gateway_id: Value,
        "NatGatewayId" => nat_gateway_id: Value,
        "NetworkInterfaceId" => network_interface_id: Value,
        "RouteTableId" => route_table_id: Value,
        "TransitGatewayId" => transit_gateway_id: Value,
        "VpcEndpointId" => vpc_endpoint_id: Value,
        "VpcPeeringConnectionId" => vpc_peering_connection_id: Value,
    }
}

resource_type! {
    pub struct SubnetRouteTableAssociation = "AWS::EC2::SubnetRouteTableAssociation" {
        "RouteTableId" => route_table_id: Value,
        "SubnetId" => subnet_id: Value,
    }
}

resource_type! {
    pub struct NatGateway = "AWS::EC2::NatGateway" {
        "AllocationId" => allocation_id: Value,
        "ConnectivityType" => connectivity_type: Value,
        "MaxDrainDurationSeconds" => max_drain_duration_seconds: Value,
        "PrivateIpAddress" => private_ip_address: Value,
        "SecondaryAllocationIds" => secondary_allocation_ids: Value,
        "SecondaryPrivateIpAddressCount" => secondary_private_ip_address_count: Value,
        "SecondaryPrivateIpAddresses" => secondary_private_ip_addresses: Value,
        "SubnetId" => subnet_id: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

resource_type! {
    /// An Elastic IP address.
    pub struct Eip = "AWS::EC2::EIP" {
        "Address" => address: Value,
        "Domain" => domain: Value,
        "InstanceId" => instance_id: Value,
        "IpamPoolId" => ipam_pool_id: Value,
        "NetworkBorderGroup" => network_border_group: Value,
        "PublicIpv4Pool" => public_ipv4_pool: Value,
        "Tags" => tags: Vec<Tag>,
        "TransferAddress" => transfer_address: Value,
    }
}

resource_type! {
    pub struct SecurityGroup = "AWS::EC2::SecurityGroup" {
        "GroupDescription" => group_description: Value,
        "GroupName" => group_name: Value,
        "SecurityGroupEgress" => security_group_egress: Vec<EgressRule>,
        "SecurityGroupIngress" => security_group_ingress: Vec<IngressRule>,
        "Tags" => tags: Vec<Tag>,
        "VpcId" => vpc_id: Value,
    }
}

property_type! {
    pub struct IngressRule {
        "CidrIp" => cidr_ip: Value,
        "CidrIpv6" => cidr_ipv6: Value,
        "Description" => description: Value,
        "FromPort" => from_port: Value,
        "IpProtocol" => ip_protocol: Value,
        "SourcePrefixListId" => source_prefix_list_id: Value,
        "SourceSecurityGroupId" => source_security_group_id: Value,
        "SourceSecurityGroupName" => source_security_group_name: Value,
        "SourceSecurityGroupOwnerId" => source_security_group_owner_id: Value,
        "ToPort" => to_port: Value,
    }
}

property_type! {
    pub struct EgressRule {
        "CidrIp" => cidr_ip: Value,
        "CidrIpv6" => cidr_ipv6: Value,
        "Description" => description: Value,
        "DestinationPrefixListId" => destination_prefix_list_id: Value,
        "DestinationSecurityGroupId" => destination_security_group_id: Value,
        "FromPort" => from_port: Value,
        "IpProtocol" => ip_protocol: Value,
        "ToPort" => to_port: Value,
    }
}

resource_type! {
    /// A standalone ingress rule, used to break security group reference cycles.
    pub struct SecurityGroupIngress = "AWS::EC2::SecurityGroupIngress" {
        "CidrIp" => cidr_ip: Value,
        "CidrIpv6" => cidr_ipv6: Value,
        "Description" => description: Value,
        "FromPort" => from_port: Value,
        "GroupId" => group_id: Value,
        "GroupName" => group_name: Value,
        "IpProtocol" => ip_protocol: Value,
        "SourcePrefixListId" => source_prefix_list_id: Value,
        "SourceSecurityGroupId" => source_security_group_id: Value,
        "SourceSecurityGroupName" => source_security_group_name: Value,
        "SourceSecurityGroupOwnerId" => source_security_group_owner_id: Value,
        "ToPort" => to_port: Value,
    }
}

resource_type! {
    pub struct SecurityGroupEgress = "AWS::EC2::SecurityGroupEgress" {
        "CidrIp" => cidr_ip: Value,
        "CidrIpv6" => cidr_ipv6: Value,
        "Description" => description: Value,
        "DestinationPrefixListId" => destination_prefix_list_id: Value,
        "DestinationSecurityGroupId" => destination_security_group_id: Value,
        "FromPort" => from_port: Value,
        "GroupId" => group_id: Value,
        "IpProtocol" => ip_protocol: Value,
        "ToPort" => to_port: Value,
    }
}

resource_type! {
    pub struct LaunchTemplate = "AWS::EC2::LaunchTemplate" {
        "LaunchTemplateData" => launch_template_data: LaunchTemplateData,
        "LaunchTemplateName" => launch_template_name: Value,
        "TagSpecifications" => tag_specifications: Vec<TagSpecification>,
        "VersionDescription" => version_description: Value,
    }
}

property_type! {
    /// Deeply nested blocks such as block device mappings and network
    /// interfaces are kept as [`Value`].
    pub struct LaunchTemplateData {
        "BlockDeviceMappings" => block_device_mappings: Value,
        "CapacityReservationSpecification" => capacity_reservation_specification: Value,
        "CpuOptions" => cpu_options: Value,
        "CreditSpecification" => credit_specification: Value,
        "DisableApiStop" => disable_api_stop: Value,
        "DisableApiTermination" => disable_api_termination: Value,
        "EbsOptimized" => ebs_optimized: Value,
        "ElasticGpuSpecifications" => elastic_gpu_specifications: Value,
        "ElasticInferenceAccelerators" => elastic_inference_accelerators: Value,
        "EnclaveOptions" => enclave_options: Value,
        "HibernationOptions" => hibernation_options: Value,
        "IamInstanceProfile" => iam_instance_profile: IamInstanceProfile,
        "ImageId" => image_id: Value,
        "InstanceInitiatedShutdownBehavior" => instance_initiated_shutdown_behavior: Value,
        "InstanceMarketOptions" => instance_market_options: Value,
        "InstanceRequirements" => instance_requirements: Value,
        "InstanceType" => instance_type: Value,
        "KernelId" => kernel_id: Value,
        "KeyName" => key_name: Value,
        "LicenseSpecifications" => license_specifications: Value,
        "MaintenanceOptions" => maintenance_options: Value,
        "MetadataOptions" => metadata_options: MetadataOptions,
        "Monitoring" => monitoring: Value,
        "NetworkInterfaces" => network_interfaces: Value,
        "Placement" => placement: Value,
        "PrivateDnsNameOptions" => private_dns_name_options: Value,
        "RamDiskId" => ram_disk_id: Value,
        "SecurityGroupIds" => security_group_ids: Value,
        "SecurityGroups" => security_groups: Value,
        "TagSpecifications" => tag_specifications: Vec<TagSpecification>,
        "UserData" => user_data: Value,
    }
}

property_type! {
    pub struct IamInstanceProfile {
        "Arn" => arn: Value,
        "Name" => name: Value,
    }
}

property_type! {
    pub struct MetadataOptions {
        "HttpEndpoint" => http_endpoint: Value,
        "HttpProtocolIpv6" => http_protocol_ipv6: Value,
        "HttpPutResponseHopLimit" => http_put_response_hop_limit: Value,
        "HttpTokens" => http_tokens: Value,
        "InstanceMetadataTags" => instance_metadata_tags: Value,
    }
}

property_type! {
    pub struct TagSpecification {
        "ResourceType" => resource_type: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

resource_type! {
    pub struct VpcEndpoint = "AWS::EC2::VPCEndpoint" {
        "DnsOptions" => dns_options: Value,
        "IpAddressType" => ip_address_type: Value,
        "PolicyDocument" => policy_document: Value,
        "PrivateDnsEnabled" => private_dns_enabled: Value,
        "ResourceConfigurationArn" => resource_configuration_arn: Value,
        "RouteTableIds" => route_table_ids: Value,
        "SecurityGroupIds" => security_group_ids: Value,
        "ServiceName" => service_name: Value,
        "ServiceNetworkArn" => service_network_arn: Value,
        "SubnetIds" => subnet_ids: Value,
        "Tags" => tags: Vec<Tag>,
        "VpcEndpointType" => vpc_endpoint_type: Value,
        "VpcId" => vpc_id: Value,
    }
}
