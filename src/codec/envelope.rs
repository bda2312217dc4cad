//! The per-resource envelope: `Type`, `Properties` and the resource attributes.

use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as Json};

use crate::error::{Error, Result};
use crate::properties::{PropertyMap, PropertyType};
use crate::registry;
use crate::template::Resource;
use crate::value::{kind, Value};

const SECTION: &str = "Resources";

const TYPE: &str = "Type";
const PROPERTIES: &str = "Properties";
const DEPENDS_ON: &str = "DependsOn";
const METADATA: &str = "Metadata";
const DELETION_POLICY: &str = "DeletionPolicy";
const UPDATE_REPLACE_POLICY: &str = "UpdateReplacePolicy";
const UPDATE_POLICY: &str = "UpdatePolicy";
const CREATION_POLICY: &str = "CreationPolicy";
const CONDITION: &str = "Condition";

/// Every key a resource may carry, in the order they are written.
const ENVELOPE_FIELDS: &[&str] = &[
    TYPE,
    PROPERTIES,
    DEPENDS_ON,
    METADATA,
    DELETION_POLICY,
    UPDATE_REPLACE_POLICY,
    UPDATE_POLICY,
    CREATION_POLICY,
    CONDITION,
];

pub(crate) fn decode_resource(logical_id: &str, json: Json) -> Result<Resource> {
    let mut fields = match json {
        Json::Object(fields) => fields,
        other => {
            return Err(Error::InvalidEntry {
                section: SECTION,
                logical_id: logical_id.to_string(),
                reason: format!("expected an object, found {}", kind(&other)),
            })
        }
    };

    let type_name = match fields.remove(TYPE) {
        Some(Json::String(type_name)) if !type_name.is_empty() => type_name,
        _ => {
            return Err(Error::MissingResourceType {
                logical_id: logical_id.to_string(),
            })
        }
    };

    if let Some(field) = fields
        .keys()
        .find(|key| !ENVELOPE_FIELDS.contains(&key.as_str()))
    {
        return Err(Error::UnknownField {
            logical_id: logical_id.to_string(),
            resource_type: type_name,
            field: field.clone(),
        });
    }

    let raw = match fields.remove(PROPERTIES) {
        None | Some(Json::Null) => PropertyMap::new(),
        Some(Json::Object(properties)) => decode_map(logical_id, properties)?,
        Some(_) => return Err(invalid_field(logical_id, PROPERTIES, "an object")),
    };
    let properties = registry::decode_properties(&type_name, raw)
        .map_err(|err| err.into_error(logical_id, &type_name))?;
    let mut resource = Resource::from_boxed(properties);

    resource.depends_on = match fields.remove(DEPENDS_ON) {
        None => Vec::new(),
        Some(Json::String(dependency)) => vec![dependency],
        Some(Json::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Json::String(dependency) => Ok(dependency),
                _ => Err(invalid_field(logical_id, DEPENDS_ON, "a logical ID or a list of them")),
            })
            .collect::<Result<_>>()?,
        Some(_) => {
            return Err(invalid_field(
                logical_id,
                DEPENDS_ON,
                "a logical ID or a list of them",
            ))
        }
    };

    resource.metadata = match fields.remove(METADATA) {
        None => IndexMap::new(),
        Some(Json::Object(metadata)) => decode_map(logical_id, metadata)?,
        Some(_) => return Err(invalid_field(logical_id, METADATA, "an object")),
    };

    resource.condition = match fields.remove(CONDITION) {
        None => None,
        Some(Json::String(condition)) => Some(condition),
        Some(_) => return Err(invalid_field(logical_id, CONDITION, "a condition name")),
    };

    resource.deletion_policy = decode_policy(logical_id, DELETION_POLICY, fields.remove(DELETION_POLICY))?;
    resource.update_replace_policy =
        decode_policy(logical_id, UPDATE_REPLACE_POLICY, fields.remove(UPDATE_REPLACE_POLICY))?;
    resource.update_policy =
        decode_attribute(logical_id, &type_name, UPDATE_POLICY, fields.remove(UPDATE_POLICY))?;
    resource.creation_policy =
        decode_attribute(logical_id, &type_name, CREATION_POLICY, fields.remove(CREATION_POLICY))?;

    tracing::debug!(logical_id, resource_type = %resource.type_name(), "decoded resource");
    Ok(resource)
}

pub(crate) fn encode_resource(logical_id: &str, resource: &Resource) -> Result<Json> {
    let in_context = |err: Error| err.in_section(SECTION, logical_id);
    let mut fields = JsonMap::new();
    fields.insert(TYPE.to_string(), Json::String(resource.type_name().to_string()));
    fields.insert(
        PROPERTIES.to_string(),
        encode_map(&resource.properties.to_properties()).map_err(in_context)?,
    );
    if !resource.depends_on.is_empty() {
        fields.insert(
            DEPENDS_ON.to_string(),
            Json::Array(
                resource
                    .depends_on
                    .iter()
                    .cloned()
                    .map(Json::String)
                    .collect(),
            ),
        );
    }
    if !resource.metadata.is_empty() {
        fields.insert(
            METADATA.to_string(),
            encode_map(&resource.metadata).map_err(in_context)?,
        );
    }
    if let Some(policy) = resource.deletion_policy {
        fields.insert(DELETION_POLICY.to_string(), Json::String(policy.to_string()));
    }
    if let Some(policy) = resource.update_replace_policy {
        fields.insert(
            UPDATE_REPLACE_POLICY.to_string(),
            Json::String(policy.to_string()),
        );
    }
    if let Some(policy) = &resource.update_policy {
        fields.insert(
            UPDATE_POLICY.to_string(),
            encode_map(&policy.encode_properties()).map_err(in_context)?,
        );
    }
    if let Some(policy) = &resource.creation_policy {
        fields.insert(
            CREATION_POLICY.to_string(),
            encode_map(&policy.encode_properties()).map_err(in_context)?,
        );
    }
    if let Some(condition) = &resource.condition {
        fields.insert(CONDITION.to_string(), Json::String(condition.clone()));
    }
    Ok(Json::Object(fields))
}

fn decode_policy<P: FromStr>(
    logical_id: &str,
    field: &'static str,
    json: Option<Json>,
) -> Result<Option<P>> {
    match json {
        None => Ok(None),
        Some(Json::String(policy)) => P::from_str(&policy).map(Some).map_err(|_| Error::InvalidPolicy {
            logical_id: logical_id.to_string(),
            field,
            value: policy,
        }),
        Some(other) => Err(Error::InvalidPolicy {
            logical_id: logical_id.to_string(),
            field,
            value: other.to_string(),
        }),
    }
}

/// Decodes `UpdatePolicy` or `CreationPolicy` strictly. Unknown keys are
/// reported with the attribute name as the first path segment.
fn decode_attribute<P: PropertyType>(
    logical_id: &str,
    type_name: &str,
    field: &'static str,
    json: Option<Json>,
) -> Result<Option<P>> {
    let raw = match json {
        None => return Ok(None),
        Some(Json::Object(attribute)) => decode_map(logical_id, attribute)?,
        Some(_) => return Err(invalid_field(logical_id, field, "an object")),
    };
    P::decode_properties(raw, field)
        .map(Some)
        .map_err(|err| err.into_error(logical_id, type_name))
}

fn decode_map(logical_id: &str, map: JsonMap<String, Json>) -> Result<IndexMap<String, Value>> {
    map.into_iter()
        .map(|(key, value)| Ok((key, Value::from_json(value)?)))
        .collect::<Result<_>>()
        .map_err(|err| err.in_section(SECTION, logical_id))
}

fn encode_map(map: &IndexMap<String, Value>) -> Result<Json> {
    let mut object = JsonMap::new();
    for (key, value) in map {
        object.insert(key.clone(), value.to_json()?);
    }
    Ok(Json::Object(object))
}

fn invalid_field(logical_id: &str, field: &'static str, expected: &'static str) -> Error {
    Error::InvalidField {
        logical_id: logical_id.to_string(),
        field,
        expected,
    }
}
