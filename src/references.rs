//! Dependency discovery and logical ID renaming over a decoded template.

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::properties::PropertyType;
use crate::template::{Resource, Template};
use crate::value::pseudo::is_pseudo_parameter;
use crate::value::{Function, Value};

const RESOURCES: &str = "Resources";

/// Key under which references made by outputs are reported.
pub const OUTPUTS: &str = "Outputs";

/// Finds all logical ID references in a template.
///
/// Returns a map where:
/// - Key: the resource ID, or `Outputs`, that contains the reference
/// - Value: the logical IDs it refers to through `Ref`, `Fn::GetAtt`,
///   `Fn::Sub` placeholders or `DependsOn`
///
/// Entries with no references are left out. Pseudo parameters are never
/// reported.
pub fn find_all_references(template: &Template) -> IndexMap<String, IndexSet<String>> {
    let mut references = IndexMap::new();

    for (logical_id, resource) in &template.resources {
        let mut found = IndexSet::new();
        for_each_resource_value(resource, &mut |value| collect_references(value, &mut found));
        found.extend(resource.depends_on.iter().cloned());
        if !found.is_empty() {
            references.insert(logical_id.clone(), found);
        }
    }

    let mut in_outputs = IndexSet::new();
    for output in template.outputs.values() {
        collect_references(&output.value, &mut in_outputs);
        if let Some(export) = &output.export {
            collect_references(&export.name, &mut in_outputs);
        }
    }
    if !in_outputs.is_empty() {
        references.insert(OUTPUTS.to_string(), in_outputs);
    }

    references
}

/// Logical IDs referenced anywhere in `value`.
pub fn value_references(value: &Value) -> IndexSet<String> {
    let mut found = IndexSet::new();
    collect_references(value, &mut found);
    found
}

fn collect_references(value: &Value, references: &mut IndexSet<String>) {
    value.walk(&mut |value| match value {
        Value::Ref(target) if !is_pseudo_parameter(target) => {
            references.insert(target.clone());
        }
        Value::Fn(function) => match &**function {
            Function::GetAtt { logical_id, .. } => {
                references.insert(logical_id.clone());
            }
            Function::Sub {
                template,
                variables,
            } => {
                let is_local = |name: &str| {
                    variables
                        .as_ref()
                        .is_some_and(|variables| variables.contains_key(name))
                };
                for name in sub_placeholders(template) {
                    if !is_local(name) && !is_pseudo_parameter(name) {
                        references.insert(name.to_string());
                    }
                }
            }
            _ => {}
        },
        _ => {}
    });
}

/// Names used by `${Name}` and `${Name.Attribute}` placeholders. `${!Literal}`
/// escapes are skipped.
fn sub_placeholders(template: &str) -> impl Iterator<Item = &str> {
    template.split("${").skip(1).filter_map(|rest| {
        let (body, _) = rest.split_once('}')?;
        if body.starts_with('!') {
            return None;
        }
        let name = body.split_once('.').map_or(body, |(name, _)| name);
        (!name.is_empty()).then_some(name)
    })
}

/// Renames resource `old_id` to `new_id`, keeping its position, and updates
/// every `Ref`, `Fn::GetAtt`, `Fn::Sub` placeholder and `DependsOn` entry
/// that pointed at it.
pub fn rename_resource(template: &mut Template, old_id: &str, new_id: &str) -> Result<()> {
    if new_id.is_empty() {
        return Err(Error::EmptyLogicalId { section: RESOURCES });
    }
    if !template.resources.contains_key(old_id) {
        return Err(Error::InvalidEntry {
            section: RESOURCES,
            logical_id: old_id.to_string(),
            reason: "no resource with this logical ID".to_string(),
        });
    }
    if old_id == new_id {
        return Ok(());
    }
    if template.resources.contains_key(new_id)
        || template.parameters.contains_key(new_id)
        || template.conditions.contains_key(new_id)
    {
        return Err(Error::InvalidEntry {
            section: RESOURCES,
            logical_id: new_id.to_string(),
            reason: "logical ID is already declared".to_string(),
        });
    }

    template.resources = std::mem::take(&mut template.resources)
        .into_iter()
        .map(|(logical_id, resource)| {
            if logical_id == old_id {
                (new_id.to_string(), resource)
            } else {
                (logical_id, resource)
            }
        })
        .collect();

    let mut rename = |value: &mut Value| update_references(value, old_id, new_id);
    for resource in template.resources.values_mut() {
        for_each_resource_value_mut(resource, &mut rename);
        for dependency in resource.depends_on.iter_mut() {
            if *dependency == old_id {
                *dependency = new_id.to_string();
            }
        }
    }
    for output in template.outputs.values_mut() {
        rename(&mut output.value);
        if let Some(export) = &mut output.export {
            rename(&mut export.name);
        }
    }
    template.conditions.values_mut().for_each(&mut rename);
    template.metadata.values_mut().for_each(&mut rename);

    tracing::info!(old_id, new_id, "renamed resource");
    Ok(())
}

/// Rewrites references to `old_id` anywhere in `value`.
fn update_references(value: &mut Value, old_id: &str, new_id: &str) {
    value.walk_mut(&mut |value| match value {
        Value::Ref(target) if *target == old_id && !is_pseudo_parameter(target) => {
            *target = new_id.to_string();
        }
        Value::Fn(function) => match &mut **function {
            Function::GetAtt { logical_id, .. } if *logical_id == old_id => {
                *logical_id = new_id.to_string();
            }
            Function::Sub {
                template,
                variables,
            } => {
                *template = update_sub_template(template, old_id, new_id);
                // a variable named after the resource is renamed along with it
                if let Some(variables) = variables {
                    if variables.contains_key(old_id) {
                        *variables = std::mem::take(variables)
                            .into_iter()
                            .map(|(name, value)| {
                                if name == old_id {
                                    (new_id.to_string(), value)
                                } else {
                                    (name, value)
                                }
                            })
                            .collect();
                    }
                }
            }
            _ => {}
        },
        _ => {}
    });
}

fn update_sub_template(template: &str, old_id: &str, new_id: &str) -> String {
    template
        .replace(&format!("${{{}}}", old_id), &format!("${{{}}}", new_id))
        .replace(&format!("${{{}.", old_id), &format!("${{{}.", new_id))
}

fn for_each_resource_value(resource: &Resource, visit: &mut dyn FnMut(&Value)) {
    resource.properties.for_each_value(visit);
    resource.metadata.values().for_each(&mut *visit);
    if let Some(policy) = &resource.update_policy {
        policy.visit_property_values(visit);
    }
    if let Some(policy) = &resource.creation_policy {
        policy.visit_property_values(visit);
    }
}

fn for_each_resource_value_mut(resource: &mut Resource, visit: &mut dyn FnMut(&mut Value)) {
    resource.properties.for_each_value_mut(visit);
    resource.metadata.values_mut().for_each(&mut *visit);
    if let Some(policy) = &mut resource.update_policy {
        policy.visit_property_values_mut(visit);
    }
    if let Some(policy) = &mut resource.creation_policy {
        policy.visit_property_values_mut(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_tree;
    use crate::resources::sns::Topic;
    use serde_json::json;

    fn template(tree: serde_json::Value) -> Template {
        decode_tree(tree).unwrap()
    }

    fn ids(references: &IndexSet<String>) -> Vec<&str> {
        references.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_find_all_references_ref() {
        let template = template(json!({
            "Resources": {
                "Bucket": {"Type": "AWS::S3::Bucket"},
                "Policy": {
                    "Type": "AWS::S3::BucketPolicy",
                    "Properties": {"Bucket": {"Ref": "Bucket"}, "PolicyDocument": {}}
                }
            }
        }));
        let references = find_all_references(&template);
        assert_eq!(references.len(), 1);
        assert_eq!(ids(&references["Policy"]), vec!["Bucket"]);
    }

    #[test]
    fn test_find_all_references_getatt() {
        let template = template(json!({
            "Resources": {
                "Key": {"Type": "AWS::KMS::Key"},
                "Topic": {
                    "Type": "AWS::SNS::Topic",
                    "Properties": {"KmsMasterKeyId": {"Fn::GetAtt": "Key.Arn"}}
                },
                "Queue": {
                    "Type": "AWS::SQS::Queue",
                    "Properties": {"KmsMasterKeyId": {"Fn::GetAtt": ["Key", "KeyId"]}}
                }
            }
        }));
        let references = find_all_references(&template);
        assert_eq!(ids(&references["Topic"]), vec!["Key"]);
        assert_eq!(ids(&references["Queue"]), vec!["Key"]);
    }

    #[test]
    fn test_find_all_references_dependson() {
        let template = template(json!({
            "Resources": {
                "Instance": {
                    "Type": "AWS::EC2::Instance",
                    "DependsOn": ["Gateway", "Route"]
                }
            }
        }));
        assert_eq!(
            ids(&find_all_references(&template)["Instance"]),
            vec!["Gateway", "Route"]
        );
    }

    #[test]
    fn test_find_all_references_sub() {
        let template = template(json!({
            "Resources": {
                "Topic": {
                    "Type": "AWS::SNS::Topic",
                    "Properties": {
                        "DisplayName": {"Fn::Sub": "${Bucket}-${Queue.Arn}-${!Literal}-${AWS::Region}"},
                        "TopicName": {"Fn::Sub": ["${Local}-${Other}", {"Local": {"Ref": "Param"}}]}
                    }
                }
            }
        }));
        assert_eq!(
            ids(&find_all_references(&template)["Topic"]),
            vec!["Bucket", "Queue", "Other", "Param"]
        );
    }

    #[test]
    fn test_find_all_references_outputs() {
        let template = template(json!({
            "Resources": {"Topic": {"Type": "AWS::SNS::Topic"}},
            "Outputs": {
                "TopicArn": {
                    "Value": {"Ref": "Topic"},
                    "Export": {"Name": {"Fn::Sub": "${Prefix}-topic"}}
                },
                "TopicName": {"Value": {"Fn::GetAtt": ["Topic", "TopicName"]}}
            }
        }));
        let references = find_all_references(&template);
        assert!(!references.contains_key("Topic"));
        assert_eq!(ids(&references[OUTPUTS]), vec!["Topic", "Prefix"]);
    }

    #[test]
    fn test_find_all_references_ignores_pseudo_parameters() {
        let template = template(json!({
            "Resources": {
                "Topic": {
                    "Type": "AWS::SNS::Topic",
                    "Properties": {"TopicName": {"Fn::Join": ["-", [{"Ref": "AWS::StackName"}, {"Ref": "AWS::Region"}]]}}
                }
            }
        }));
        assert!(find_all_references(&template).is_empty());
    }

    #[test]
    fn test_nested_typed_properties_are_scanned() {
        let template = template(json!({
            "Resources": {
                "Topic": {
                    "Type": "AWS::SNS::Topic",
                    "Properties": {
                        "Subscription": [{"Endpoint": {"Fn::GetAtt": ["Queue", "Arn"]}, "Protocol": "sqs"}],
                        "Tags": [{"Key": "owner", "Value": {"Ref": "Owner"}}]
                    }
                }
            }
        }));
        assert_eq!(
            ids(&find_all_references(&template)["Topic"]),
            vec!["Queue", "Owner"]
        );
    }

    #[test]
    fn test_policy_attributes_are_scanned_and_renamed() {
        let mut template = template(json!({
            "Resources": {
                "Group": {
                    "Type": "AWS::AutoScaling::AutoScalingGroup",
                    "Properties": {"MaxSize": "4", "MinSize": "1"},
                    "UpdatePolicy": {
                        "AutoScalingRollingUpdate": {"MinInstancesInService": {"Ref": "Floor"}}
                    },
                    "CreationPolicy": {"ResourceSignal": {"Count": {"Ref": "Floor"}}}
                }
            }
        }));
        assert_eq!(ids(&find_all_references(&template)["Group"]), vec!["Floor"]);

        template.add("Floor", Topic::default()).unwrap();
        rename_resource(&mut template, "Floor", "Minimum").unwrap();
        let group = template.resource("Group").unwrap();
        let rolling = group
            .update_policy
            .as_ref()
            .and_then(|policy| policy.auto_scaling_rolling_update.as_ref())
            .unwrap();
        assert_eq!(rolling.min_instances_in_service, Some(Value::reference("Minimum")));
        let signal = group
            .creation_policy
            .as_ref()
            .and_then(|policy| policy.resource_signal.as_ref())
            .unwrap();
        assert_eq!(signal.count, Some(Value::reference("Minimum")));
    }

    #[test]
    fn test_sub_placeholders() {
        let names: Vec<_> = sub_placeholders("a${One}b${Two.Attr}${!Three}${}${Four").collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[test]
    fn test_update_sub_no_partial_match() {
        assert_eq!(
            update_sub_template("${Bucket}-${BucketPolicy}-${Bucket.Arn}-${!Bucket}", "Bucket", "Store"),
            "${Store}-${BucketPolicy}-${Store.Arn}-${!Bucket}"
        );
    }

    #[test]
    fn test_rename_rewrites_every_reference() {
        let mut template = template(json!({
            "Resources": {
                "First": {"Type": "AWS::SQS::Queue"},
                "OldQueue": {"Type": "AWS::SQS::Queue", "Metadata": {"Note": {"Ref": "OldQueue"}}},
                "Policy": {
                    "Type": "AWS::SQS::QueuePolicy",
                    "DependsOn": ["OldQueue", "First"],
                    "Properties": {
                        "Queues": [{"Ref": "OldQueue"}],
                        "PolicyDocument": {
                            "Resource": {"Fn::GetAtt": ["OldQueue", "Arn"]},
                            "Sid": {"Fn::Sub": ["${OldQueue}-${OldQueue.QueueName}", {"OldQueue": {"Ref": "OldQueue"}}]}
                        }
                    }
                }
            },
            "Outputs": {"QueueUrl": {"Value": {"Ref": "OldQueue"}}}
        }));

        rename_resource(&mut template, "OldQueue", "NewQueue").unwrap();

        let ids: Vec<_> = template.resources.keys().cloned().collect();
        assert_eq!(ids, vec!["First", "NewQueue", "Policy"]);
        assert_eq!(
            template.to_json_value().unwrap(),
            json!({
                "Resources": {
                    "First": {"Type": "AWS::SQS::Queue", "Properties": {}},
                    "NewQueue": {
                        "Type": "AWS::SQS::Queue",
                        "Properties": {},
                        "Metadata": {"Note": {"Ref": "NewQueue"}}
                    },
                    "Policy": {
                        "Type": "AWS::SQS::QueuePolicy",
                        "Properties": {
                            "PolicyDocument": {
                                "Resource": {"Fn::GetAtt": ["NewQueue", "Arn"]},
                                "Sid": {"Fn::Sub": ["${NewQueue}-${NewQueue.QueueName}", {"NewQueue": {"Ref": "NewQueue"}}]}
                            },
                            "Queues": [{"Ref": "NewQueue"}]
                        },
                        "DependsOn": ["NewQueue", "First"]
                    }
                },
                "Outputs": {"QueueUrl": {"Value": {"Ref": "NewQueue"}}}
            })
        );
    }

    #[test]
    fn test_rename_typed_resource_keeps_type() {
        let mut template = Template::new();
        template.add("Alerts", Topic::default()).unwrap();
        template.rename_resource("Alerts", "Alarms").unwrap();
        assert!(template.resource_of::<Topic>("Alarms").is_ok());
        assert!(template.resource("Alerts").is_none());
    }

    #[test]
    fn test_rename_errors() {
        let mut template = template(json!({
            "Parameters": {"Env": {"Type": "String"}},
            "Resources": {
                "A": {"Type": "AWS::SNS::Topic"},
                "B": {"Type": "AWS::SNS::Topic"}
            }
        }));
        assert!(matches!(
            rename_resource(&mut template, "Missing", "C"),
            Err(Error::InvalidEntry { ref logical_id, .. }) if logical_id == "Missing"
        ));
        assert!(matches!(
            rename_resource(&mut template, "A", "B"),
            Err(Error::InvalidEntry { ref logical_id, .. }) if logical_id == "B"
        ));
        assert!(matches!(
            rename_resource(&mut template, "A", "Env"),
            Err(Error::InvalidEntry { .. })
        ));
        assert!(matches!(
            rename_resource(&mut template, "A", ""),
            Err(Error::EmptyLogicalId { section: "Resources" })
        ));
        rename_resource(&mut template, "A", "A").unwrap();
        let ids: Vec<_> = template.resources.keys().cloned().collect();
        assert_eq!(ids, vec!["A", "B"]);
    }
}
