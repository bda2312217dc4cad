//! AWS Identity and Access Management.
//!
//! Policy documents are free-form JSON and are kept as [`Value`], so
//! statement-level `Condition` blocks stay ordinary maps.

use super::Tag;
use crate::properties::{property_type, resource_type};
use crate::value::Value;

resource_type! {
    pub struct Role = "AWS::IAM::Role" {
        "AssumeRolePolicyDocument" => assume_role_policy_document: Value,
        "Description" => description: Value,
        "ManagedPolicyArns" => managed_policy_arns: Value,
        "MaxSessionDuration" => max_session_duration: Value,
        "Path" => path: Value,
        "PermissionsBoundary" => permissions_boundary: Value,
        "Policies" => policies: Vec<InlinePolicy>,
        "RoleName" => role_name: Value,
        "Tags" => tags: Vec<Tag>,
    }
}

property_type! {
    /// An inline policy embedded in a role.
    pub struct InlinePolicy {
        "PolicyDocument" => policy_document: Value,
        "PolicyName" => policy_name: Value,
    }
}

resource_type! {
    pub struct Policy = "AWS::IAM::Policy" {
        "Groups" => groups: Value,
        "PolicyDocument" => policy_document: Value,
        "PolicyName" => policy_name: Value,
        "Roles" => roles: Value,
        "Users" => users: Value,
    }
}

resource_type! {
    pub struct ManagedPolicy = "AWS::IAM::ManagedPolicy" {
        "Description" => description: Value,
        "Groups" => groups: Value,
        "ManagedPolicyName" => managed_policy_name: Value,
        "Path" => path: Value,
        "PolicyDocument" => policy_document: Value,
        "Roles" => roles: Value,
        "Users" => users: Value,
    }
}

resource_type! {
    pub struct InstanceProfile = "AWS::IAM::InstanceProfile" {
        "InstanceProfileName" => instance_profile_name: Value,
        "Path" => path: Value,
        "Roles" => roles: Value,
    }
}

resource_type! {
    /// An OpenID Connect identity provider, e.g. for EKS service accounts.
    pub struct OidcProvider = "AWS::IAM::OIDCProvider" {
        "ClientIdList" => client_id_list: Value,
        "Tags" => tags: Vec<Tag>,
        "ThumbprintList" => thumbprint_list: Value,
        "Url" => url: Value,
    }
}

resource_type! {
    pub struct ServiceLinkedRole = "AWS::IAM::ServiceLinkedRole" {
        "AWSServiceName" => aws_service_name: Value,
        "CustomSuffix" => custom_suffix: Value,
        "Description" => description: Value,
    }
}
