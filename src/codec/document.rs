//! Top-level template sections.

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as Json};

use super::envelope;
use crate::error::{Error, Result};
use crate::template::{Export, Output, Parameter, Template};
use crate::value::{kind, Value};

const FORMAT_VERSION: &str = "AWSTemplateFormatVersion";
const DESCRIPTION: &str = "Description";
const METADATA: &str = "Metadata";
const TRANSFORM: &str = "Transform";
const PARAMETERS: &str = "Parameters";
const RULES: &str = "Rules";
const MAPPINGS: &str = "Mappings";
const CONDITIONS: &str = "Conditions";
const HOOKS: &str = "Hooks";
const GLOBALS: &str = "Globals";
const RESOURCES: &str = "Resources";
const OUTPUTS: &str = "Outputs";

/// Known sections, in the order they are written.
const SECTIONS: &[&str] = &[
    FORMAT_VERSION,
    DESCRIPTION,
    METADATA,
    TRANSFORM,
    PARAMETERS,
    RULES,
    MAPPINGS,
    CONDITIONS,
    HOOKS,
    GLOBALS,
    RESOURCES,
    OUTPUTS,
];

const PARAMETER_ATTRIBUTES: &[&str] = &[
    "Type",
    "Description",
    "Default",
    "AllowedPattern",
    "AllowedValues",
    "ConstraintDescription",
    "MaxLength",
    "MinLength",
    "MaxValue",
    "MinValue",
    "NoEcho",
];

const OUTPUT_ATTRIBUTES: &[&str] = &["Value", "Description", "Export", "Condition"];

pub(crate) fn decode_template(tree: Json) -> Result<Template> {
    let mut sections = match tree {
        Json::Object(sections) => sections,
        other => {
            return Err(Error::InvalidEntry {
                section: "Template",
                logical_id: String::new(),
                reason: format!("a template must be an object, found {}", kind(&other)),
            })
        }
    };
    if let Some(section) = sections
        .keys()
        .find(|key| !SECTIONS.contains(&key.as_str()))
    {
        return Err(Error::UnknownSection {
            section: section.clone(),
        });
    }

    let mut template = Template::new();
    template.format_version = take_string(&mut sections, FORMAT_VERSION)?;
    template.description = take_string(&mut sections, DESCRIPTION)?;
    template.transform = match sections.remove(TRANSFORM) {
        Some(transform) => Some(Value::from_json(transform).map_err(|err| err.in_section(TRANSFORM, ""))?),
        None => None,
    };
    template.metadata = decode_values(METADATA, sections.remove(METADATA))?;
    template.rules = decode_values(RULES, sections.remove(RULES))?;
    template.mappings = decode_values(MAPPINGS, sections.remove(MAPPINGS))?;
    template.conditions = decode_values(CONDITIONS, sections.remove(CONDITIONS))?;
    template.hooks = decode_values(HOOKS, sections.remove(HOOKS))?;
    template.globals = decode_values(GLOBALS, sections.remove(GLOBALS))?;

    for (logical_id, json) in entries(PARAMETERS, sections.remove(PARAMETERS))? {
        let parameter = decode_parameter(&logical_id, json)?;
        template.parameters.insert(logical_id, parameter);
    }
    for (logical_id, json) in entries(RESOURCES, sections.remove(RESOURCES))? {
        let resource = envelope::decode_resource(&logical_id, json)?;
        template.resources.insert(logical_id, resource);
    }
    for (logical_id, json) in entries(OUTPUTS, sections.remove(OUTPUTS))? {
        let output = decode_output(&logical_id, json)?;
        template.outputs.insert(logical_id, output);
    }

    tracing::debug!(
        parameters = template.parameters.len(),
        resources = template.resources.len(),
        outputs = template.outputs.len(),
        "decoded template"
    );
    Ok(template)
}

pub(crate) fn encode_template(template: &Template) -> Result<Json> {
    let mut sections = JsonMap::new();
    if let Some(version) = &template.format_version {
        sections.insert(FORMAT_VERSION.to_string(), Json::String(version.clone()));
    }
    if let Some(description) = &template.description {
        sections.insert(DESCRIPTION.to_string(), Json::String(description.clone()));
    }
    insert_values(&mut sections, METADATA, &template.metadata)?;
    if let Some(transform) = &template.transform {
        sections.insert(
            TRANSFORM.to_string(),
            transform.to_json().map_err(|err| err.in_section(TRANSFORM, ""))?,
        );
    }
    if !template.parameters.is_empty() {
        let mut parameters = JsonMap::new();
        for (logical_id, parameter) in &template.parameters {
            let encoded = encode_parameter(parameter).map_err(|err| err.in_section(PARAMETERS, logical_id))?;
            parameters.insert(logical_id.clone(), encoded);
        }
        sections.insert(PARAMETERS.to_string(), Json::Object(parameters));
    }
    insert_values(&mut sections, RULES, &template.rules)?;
    insert_values(&mut sections, MAPPINGS, &template.mappings)?;
    insert_values(&mut sections, CONDITIONS, &template.conditions)?;
    insert_values(&mut sections, HOOKS, &template.hooks)?;
    insert_values(&mut sections, GLOBALS, &template.globals)?;
    if !template.resources.is_empty() {
        let mut resources = JsonMap::new();
        for (logical_id, resource) in &template.resources {
            resources.insert(
                logical_id.clone(),
                envelope::encode_resource(logical_id, resource)?,
            );
        }
        sections.insert(RESOURCES.to_string(), Json::Object(resources));
    }
    if !template.outputs.is_empty() {
        let mut outputs = JsonMap::new();
        for (logical_id, output) in &template.outputs {
            let encoded = encode_output(output).map_err(|err| err.in_section(OUTPUTS, logical_id))?;
            outputs.insert(logical_id.clone(), encoded);
        }
        sections.insert(OUTPUTS.to_string(), Json::Object(outputs));
    }
    Ok(Json::Object(sections))
}

/// Splits a named section into its entries, rejecting empty logical IDs.
fn entries(section: &'static str, json: Option<Json>) -> Result<Vec<(String, Json)>> {
    match json {
        None | Some(Json::Null) => Ok(Vec::new()),
        Some(Json::Object(map)) => {
            if map.keys().any(String::is_empty) {
                return Err(Error::EmptyLogicalId { section });
            }
            Ok(map.into_iter().collect())
        }
        Some(other) => Err(Error::InvalidEntry {
            section,
            logical_id: String::new(),
            reason: format!("the section must be an object, found {}", kind(&other)),
        }),
    }
}

fn decode_values(section: &'static str, json: Option<Json>) -> Result<IndexMap<String, Value>> {
    entries(section, json)?
        .into_iter()
        .map(|(logical_id, json)| {
            let value = Value::from_json(json).map_err(|err| err.in_section(section, &logical_id))?;
            Ok((logical_id, value))
        })
        .collect()
}

fn insert_values(
    sections: &mut JsonMap<String, Json>,
    section: &'static str,
    values: &IndexMap<String, Value>,
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    let mut encoded = JsonMap::new();
    for (logical_id, value) in values {
        encoded.insert(
            logical_id.clone(),
            value.to_json().map_err(|err| err.in_section(section, logical_id))?,
        );
    }
    sections.insert(section.to_string(), Json::Object(encoded));
    Ok(())
}

fn take_string(sections: &mut JsonMap<String, Json>, section: &'static str) -> Result<Option<String>> {
    match sections.remove(section) {
        None => Ok(None),
        Some(Json::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::InvalidEntry {
            section,
            logical_id: String::new(),
            reason: format!("expected a string, found {}", kind(&other)),
        }),
    }
}

/// Attribute access for parameter and output entries.
struct Attributes<'a> {
    section: &'static str,
    logical_id: &'a str,
    map: JsonMap<String, Json>,
}

impl<'a> Attributes<'a> {
    fn new(section: &'static str, logical_id: &'a str, json: Json, allowed: &[&str]) -> Result<Self> {
        let map = match json {
            Json::Object(map) => map,
            other => {
                return Err(Error::InvalidEntry {
                    section,
                    logical_id: logical_id.to_string(),
                    reason: format!("expected an object, found {}", kind(&other)),
                })
            }
        };
        if let Some(attribute) = map.keys().find(|key| !allowed.contains(&key.as_str())) {
            return Err(Error::UnknownAttribute {
                section,
                logical_id: logical_id.to_string(),
                attribute: attribute.clone(),
            });
        }
        Ok(Attributes {
            section,
            logical_id,
            map,
        })
    }

    fn value(&mut self, attribute: &str) -> Result<Option<Value>> {
        self.map
            .remove(attribute)
            .map(Value::from_json)
            .transpose()
            .map_err(|err| err.in_section(self.section, self.logical_id))
    }

    fn string(&mut self, attribute: &str) -> Result<Option<String>> {
        match self.map.remove(attribute) {
            None => Ok(None),
            Some(Json::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.invalid(format!(
                "{} must be a string, found {}",
                attribute,
                kind(&other)
            ))),
        }
    }

    fn required<T>(&self, attribute: &str, value: Option<T>) -> Result<T> {
        value.ok_or_else(|| self.invalid(format!("{} is required", attribute)))
    }

    fn invalid(&self, reason: String) -> Error {
        Error::InvalidEntry {
            section: self.section,
            logical_id: self.logical_id.to_string(),
            reason,
        }
    }
}

fn decode_parameter(logical_id: &str, json: Json) -> Result<Parameter> {
    let mut attributes = Attributes::new(PARAMETERS, logical_id, json, PARAMETER_ATTRIBUTES)?;
    let parameter_type = attributes.string("Type")?;
    let allowed_values = match attributes.value("AllowedValues")? {
        None => None,
        Some(Value::List(values)) => Some(values),
        Some(_) => return Err(attributes.invalid("AllowedValues must be a list".to_string())),
    };
    Ok(Parameter {
        parameter_type: attributes.required("Type", parameter_type)?,
        description: attributes.string("Description")?,
        default: attributes.value("Default")?,
        allowed_pattern: attributes.string("AllowedPattern")?,
        allowed_values,
        constraint_description: attributes.string("ConstraintDescription")?,
        max_length: attributes.value("MaxLength")?,
        min_length: attributes.value("MinLength")?,
        max_value: attributes.value("MaxValue")?,
        min_value: attributes.value("MinValue")?,
        no_echo: attributes.value("NoEcho")?,
    })
}

fn encode_parameter(parameter: &Parameter) -> Result<Json> {
    let mut attributes = JsonMap::new();
    attributes.insert("Type".to_string(), Json::String(parameter.parameter_type.clone()));
    insert_string(&mut attributes, "Description", &parameter.description);
    insert_value(&mut attributes, "Default", &parameter.default)?;
    insert_string(&mut attributes, "AllowedPattern", &parameter.allowed_pattern);
    if let Some(values) = &parameter.allowed_values {
        attributes.insert(
            "AllowedValues".to_string(),
            Json::Array(values.iter().map(Value::to_json).collect::<Result<_>>()?),
        );
    }
    insert_string(&mut attributes, "ConstraintDescription", &parameter.constraint_description);
    insert_value(&mut attributes, "MaxLength", &parameter.max_length)?;
    insert_value(&mut attributes, "MinLength", &parameter.min_length)?;
    insert_value(&mut attributes, "MaxValue", &parameter.max_value)?;
    insert_value(&mut attributes, "MinValue", &parameter.min_value)?;
    insert_value(&mut attributes, "NoEcho", &parameter.no_echo)?;
    Ok(Json::Object(attributes))
}

fn decode_output(logical_id: &str, json: Json) -> Result<Output> {
    let mut attributes = Attributes::new(OUTPUTS, logical_id, json, OUTPUT_ATTRIBUTES)?;
    let value = attributes.value("Value")?;
    let export = match attributes.map.remove("Export") {
        None => None,
        Some(Json::Object(mut export)) => {
            let name = export.remove("Name");
            if let Some(attribute) = export.keys().next() {
                return Err(Error::UnknownAttribute {
                    section: OUTPUTS,
                    logical_id: logical_id.to_string(),
                    attribute: format!("Export.{}", attribute),
                });
            }
            let name = attributes.required("Export.Name", name)?;
            Some(Export {
                name: Value::from_json(name).map_err(|err| err.in_section(OUTPUTS, logical_id))?,
            })
        }
        Some(_) => return Err(attributes.invalid("Export must be an object".to_string())),
    };
    Ok(Output {
        value: attributes.required("Value", value)?,
        description: attributes.string("Description")?,
        export,
        condition: attributes.string("Condition")?,
    })
}

fn encode_output(output: &Output) -> Result<Json> {
    let mut attributes = JsonMap::new();
    insert_string(&mut attributes, "Description", &output.description);
    attributes.insert("Value".to_string(), output.value.to_json()?);
    if let Some(export) = &output.export {
        let mut encoded = JsonMap::new();
        encoded.insert("Name".to_string(), export.name.to_json()?);
        attributes.insert("Export".to_string(), Json::Object(encoded));
    }
    insert_string(&mut attributes, "Condition", &output.condition);
    Ok(Json::Object(attributes))
}

fn insert_string(attributes: &mut JsonMap<String, Json>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        attributes.insert(key.to_string(), Json::String(value.clone()));
    }
}

fn insert_value(attributes: &mut JsonMap<String, Json>, key: &str, value: &Option<Value>) -> Result<()> {
    if let Some(value) = value {
        attributes.insert(key.to_string(), value.to_json()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sections_are_written_in_canonical_order() {
        let tree = json!({
            "Outputs": {"TopicArn": {"Value": {"Ref": "Topic"}}},
            "Resources": {"Topic": {"Type": "AWS::SNS::Topic", "Properties": {}}},
            "Conditions": {"IsProd": {"Fn::Equals": [{"Ref": "Env"}, "prod"]}},
            "Parameters": {"Env": {"Type": "String", "AllowedValues": ["dev", "prod"]}},
            "Description": "demo",
            "AWSTemplateFormatVersion": "2010-09-09"
        });
        let template = decode_template(tree.clone()).unwrap();
        let encoded = encode_template(&template).unwrap();
        let keys: Vec<_> = encoded.as_object().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "AWSTemplateFormatVersion",
                "Description",
                "Parameters",
                "Conditions",
                "Resources",
                "Outputs"
            ]
        );
        assert_eq!(encoded, tree);
    }

    #[test]
    fn test_unknown_section() {
        let err = decode_template(json!({"Resources": {}, "Resource": {}})).unwrap_err();
        assert!(matches!(err, Error::UnknownSection { ref section } if section == "Resource"));
    }

    #[test]
    fn test_empty_logical_id() {
        let err = decode_template(json!({"Resources": {"": {"Type": "AWS::SNS::Topic"}}})).unwrap_err();
        assert!(matches!(err, Error::EmptyLogicalId { section: "Resources" }));
    }

    #[test]
    fn test_template_must_be_an_object() {
        assert!(matches!(
            decode_template(json!(["Resources"])),
            Err(Error::InvalidEntry { section: "Template", .. })
        ));
    }

    #[test]
    fn test_parameter_attributes_are_strict() {
        let err = decode_template(json!({
            "Parameters": {"Env": {"Type": "String", "Defualt": "dev"}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownAttribute { section: "Parameters", ref attribute, .. } if attribute == "Defualt"
        ));
    }

    #[test]
    fn test_parameter_type_is_required() {
        let err = decode_template(json!({"Parameters": {"Env": {"Default": "dev"}}})).unwrap_err();
        assert!(matches!(err, Error::InvalidEntry { section: "Parameters", .. }));
    }

    #[test]
    fn test_parameter_round_trip() {
        let tree = json!({
            "Parameters": {
                "Size": {
                    "Type": "Number",
                    "Description": "node count",
                    "Default": 3,
                    "MinValue": 1,
                    "MaxValue": 10,
                    "NoEcho": false
                }
            }
        });
        let template = decode_template(tree.clone()).unwrap();
        let size = &template.parameters["Size"];
        assert_eq!(size.parameter_type, "Number");
        assert_eq!(size.default, Some(Value::from(3)));
        assert_eq!(encode_template(&template).unwrap(), tree);
    }

    #[test]
    fn test_output_with_export() {
        let tree = json!({
            "Outputs": {
                "VpcId": {
                    "Description": "the VPC",
                    "Value": {"Ref": "Vpc"},
                    "Export": {"Name": {"Fn::Sub": "${AWS::StackName}-VpcId"}},
                    "Condition": "CreateVpc"
                }
            }
        });
        let template = decode_template(tree.clone()).unwrap();
        let output = &template.outputs["VpcId"];
        assert_eq!(output.value, Value::reference("Vpc"));
        assert_eq!(output.condition.as_deref(), Some("CreateVpc"));
        assert!(output.export.as_ref().unwrap().name.is_intrinsic());
        assert_eq!(encode_template(&template).unwrap(), tree);
    }

    #[test]
    fn test_output_requires_value_and_strict_export() {
        assert!(matches!(
            decode_template(json!({"Outputs": {"A": {"Description": "x"}}})),
            Err(Error::InvalidEntry { section: "Outputs", .. })
        ));
        assert!(matches!(
            decode_template(json!({"Outputs": {"A": {"Value": 1, "Export": {"Name": "n", "Extra": 1}}}})),
            Err(Error::UnknownAttribute { ref attribute, .. }) if attribute == "Export.Extra"
        ));
    }

    #[test]
    fn test_opaque_sections_decode_intrinsics() {
        let template = decode_template(json!({
            "Transform": ["AWS::Serverless-2016-10-31"],
            "Mappings": {"RegionMap": {"us-east-1": {"AMI": "ami-123"}}},
            "Conditions": {"IsProd": {"Fn::Equals": [{"Ref": "Env"}, "prod"]}},
            "Globals": {"Function": {"Timeout": 30}}
        }))
        .unwrap();
        assert!(template.conditions["IsProd"].is_intrinsic());
        assert!(!template.mappings["RegionMap"].is_intrinsic());
        assert_eq!(
            template.transform,
            Some(Value::from(vec!["AWS::Serverless-2016-10-31"]))
        );
    }

    #[test]
    fn test_empty_template() {
        let template = decode_template(json!({})).unwrap();
        assert_eq!(template, Template::new());
        assert_eq!(encode_template(&template).unwrap(), json!({}));
    }
}
