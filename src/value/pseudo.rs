//! Pseudo parameters, resolvable with `Ref` in every template.

pub const ACCOUNT_ID: &str = "AWS::AccountId";
pub const NOTIFICATION_ARNS: &str = "AWS::NotificationARNs";
/// Removes the enclosing property when returned from `Fn::If`.
pub const NO_VALUE: &str = "AWS::NoValue";
pub const PARTITION: &str = "AWS::Partition";
pub const REGION: &str = "AWS::Region";
pub const STACK_ID: &str = "AWS::StackId";
pub const STACK_NAME: &str = "AWS::StackName";
pub const URL_SUFFIX: &str = "AWS::URLSuffix";

pub const ALL: &[&str] = &[
    ACCOUNT_ID,
    NOTIFICATION_ARNS,
    NO_VALUE,
    PARTITION,
    REGION,
    STACK_ID,
    STACK_NAME,
    URL_SUFFIX,
];

/// Checks if a name refers to a pseudo parameter rather than a declared entity.
pub fn is_pseudo_parameter(name: &str) -> bool {
    name.starts_with("AWS::")
}
