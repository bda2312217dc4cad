//! The template document model.

mod resource;
mod sections;

use std::path::Path;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{self, Format};
use crate::error::{Error, Result};
use crate::properties::ResourceType;
use crate::references;
use crate::value::Value;

pub use resource::Resource;
pub use sections::{Export, Output, Parameter};

/// The version string CloudFormation currently accepts.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// A CloudFormation template.
///
/// Every section is an ordered map, so logical IDs keep their declaration
/// order through a decode/encode round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub format_version: Option<String>,
    pub description: Option<String>,
    pub metadata: IndexMap<String, Value>,
    /// A macro name or a list of them, e.g. `AWS::Serverless-2016-10-31`.
    pub transform: Option<Value>,
    pub parameters: IndexMap<String, Parameter>,
    pub rules: IndexMap<String, Value>,
    pub mappings: IndexMap<String, Value>,
    pub conditions: IndexMap<String, Value>,
    pub hooks: IndexMap<String, Value>,
    /// SAM `Globals`.
    pub globals: IndexMap<String, Value>,
    pub resources: IndexMap<String, Resource>,
    pub outputs: IndexMap<String, Output>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(input: &str) -> Result<Self> {
        codec::decode(input.as_bytes(), Format::Json)
    }

    /// Decodes YAML, accepting both short-form tags and long-form functions.
    pub fn from_yaml(input: &str) -> Result<Self> {
        codec::decode(input.as_bytes(), Format::Yaml)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        codec::open(path)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        self.to_format(Format::Json)
    }

    /// Long-form YAML.
    pub fn to_yaml(&self) -> Result<String> {
        self.to_format(Format::Yaml)
    }

    fn to_format(&self, format: Format) -> Result<String> {
        let bytes = codec::encode(self, format)?;
        String::from_utf8(bytes).map_err(|err| Error::Format {
            format,
            line: None,
            column: None,
            source: Box::new(err),
        })
    }

    /// The document as a JSON tree, for comparison or further processing.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        codec::encode_tree(self)
    }

    /// Adds or replaces a resource. Returns the resource previously stored
    /// under `logical_id`, which keeps its position.
    pub fn add_resource(
        &mut self,
        logical_id: impl Into<String>,
        resource: Resource,
    ) -> Result<Option<Resource>> {
        let logical_id = logical_id.into();
        if logical_id.is_empty() {
            return Err(Error::EmptyLogicalId {
                section: "Resources",
            });
        }
        Ok(self.resources.insert(logical_id, resource))
    }

    /// Adds typed properties as a resource and returns it for further
    /// envelope changes. An existing resource with the same logical ID is
    /// replaced in place.
    pub fn add<T: ResourceType>(
        &mut self,
        logical_id: impl Into<String>,
        properties: T,
    ) -> Result<&mut Resource> {
        let logical_id = logical_id.into();
        if logical_id.is_empty() {
            return Err(Error::EmptyLogicalId {
                section: "Resources",
            });
        }
        let resource = Resource::new(properties);
        Ok(match self.resources.entry(logical_id) {
            Entry::Occupied(mut entry) => {
                entry.insert(resource);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(resource),
        })
    }

    /// Removes a resource, keeping the order of the remaining ones.
    pub fn remove_resource(&mut self, logical_id: &str) -> Option<Resource> {
        self.resources.shift_remove(logical_id)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn resource_mut(&mut self, logical_id: &str) -> Option<&mut Resource> {
        self.resources.get_mut(logical_id)
    }

    /// All resources of type `T`, in declaration order.
    pub fn resources_of<T: ResourceType>(&self) -> Vec<(&str, &T)> {
        self.resources
            .iter()
            .filter_map(|(id, resource)| Some((id.as_str(), resource.downcast_ref::<T>()?)))
            .collect()
    }

    /// The resource `logical_id`, which must be of type `T`.
    pub fn resource_of<T: ResourceType>(&self, logical_id: &str) -> Result<&T> {
        self.resources
            .get(logical_id)
            .and_then(Resource::downcast_ref::<T>)
            .ok_or_else(|| missing::<T>(logical_id))
    }

    pub fn resource_of_mut<T: ResourceType>(&mut self, logical_id: &str) -> Result<&mut T> {
        self.resources
            .get_mut(logical_id)
            .and_then(Resource::downcast_mut::<T>)
            .ok_or_else(|| missing::<T>(logical_id))
    }

    /// The only resource of type `T`.
    pub fn single_resource_of<T: ResourceType>(&self) -> Result<(&str, &T)> {
        exactly_one(T::TYPE_NAME, self.resources_of::<T>())
    }

    /// Resources whose `Type` is `type_name`, typed or not.
    pub fn resources_by_type(&self, type_name: &str) -> Vec<(&str, &Resource)> {
        self.resources
            .iter()
            .filter(|(_, resource)| resource.type_name() == type_name)
            .map(|(id, resource)| (id.as_str(), resource))
            .collect()
    }

    pub fn single_resource_by_type(&self, type_name: &str) -> Result<(&str, &Resource)> {
        exactly_one(type_name, self.resources_by_type(type_name))
    }

    /// Custom resources in declaration order. See [`Resource::is_custom`].
    pub fn custom_resources(&self) -> Vec<(&str, &Resource)> {
        self.resources
            .iter()
            .filter(|(_, resource)| resource.is_custom())
            .map(|(id, resource)| (id.as_str(), resource))
            .collect()
    }

    /// Logical IDs declared in more than one of Parameters, Resources and
    /// Conditions. CloudFormation rejects such templates, the model does not.
    pub fn logical_id_conflicts(&self) -> Vec<String> {
        let mut seen = IndexSet::new();
        let mut conflicts = IndexSet::new();
        let ids = self
            .parameters
            .keys()
            .chain(self.resources.keys())
            .chain(self.conditions.keys());
        for id in ids {
            if !seen.insert(id.as_str()) {
                conflicts.insert(id.clone());
            }
        }
        conflicts.into_iter().collect()
    }

    /// Maps each resource, and `Outputs` as a whole, to the logical IDs it
    /// refers to through `Ref`, `Fn::GetAtt`, `Fn::Sub` and `DependsOn`.
    pub fn references(&self) -> IndexMap<String, IndexSet<String>> {
        references::find_all_references(self)
    }

    /// Renames a resource in place and rewrites every reference to it.
    pub fn rename_resource(&mut self, old_id: &str, new_id: &str) -> Result<()> {
        references::rename_resource(self, old_id, new_id)
    }
}

fn missing<T: ResourceType>(logical_id: &str) -> Error {
    Error::AmbiguousLookup {
        resource_type: T::TYPE_NAME.to_string(),
        logical_id: Some(logical_id.to_string()),
        matches: 0,
    }
}

fn exactly_one<T>(resource_type: &str, matches: Vec<T>) -> Result<T> {
    let found = matches.len();
    let mut matches = matches.into_iter();
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(only),
        _ => Err(Error::AmbiguousLookup {
            resource_type: resource_type.to_string(),
            logical_id: None,
            matches: found,
        }),
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::Error as _;
        self.to_json_value()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error as _;
        let tree = serde_json::Value::deserialize(deserializer)?;
        codec::decode_tree(tree).map_err(D::Error::custom)
    }
}
