//! AWS CloudFormation's own resource types.

use super::Tag;
use crate::properties::resource_type;
use crate::value::Value;

resource_type! {
    /// A nested stack.
    pub struct Stack = "AWS::CloudFormation::Stack" {
        "NotificationARNs" => notification_arns: Value,
        "Parameters" => parameters: Value,
        "Tags" => tags: Vec<Tag>,
        "TemplateURL" => template_url: Value,
        "TimeoutInMinutes" => timeout_in_minutes: Value,
    }
}

resource_type! {
    pub struct WaitCondition = "AWS::CloudFormation::WaitCondition" {
        "Count" => count: Value,
        "Handle" => handle: Value,
        "Timeout" => timeout: Value,
    }
}

resource_type! {
    /// Takes no properties.
    pub struct WaitConditionHandle = "AWS::CloudFormation::WaitConditionHandle" {}
}
