//! Typed resource properties.
//!
//! Resource and nested property structs are declared with [`resource_type!`]
//! and [`property_type!`]. A declaration is a table of wire name to field, and
//! the macros generate strict decoding, encoding and the trait object glue the
//! registry dispatches through.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::error::Error;
use crate::value::Value;

/// Decoded `Properties` of a resource, in document order.
pub type PropertyMap = IndexMap<String, Value>;

/// A strict decoding failure, located by the dotted path of the offending key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("unknown property `{path}`")]
    Unknown { path: String },
    #[error("property `{path}` must be {expected}")]
    InvalidType { path: String, expected: &'static str },
}

impl PropertyError {
    pub(crate) fn into_error(self, logical_id: &str, resource_type: &str) -> Error {
        match self {
            PropertyError::Unknown { path } => Error::UnknownProperty {
                logical_id: logical_id.to_string(),
                resource_type: resource_type.to_string(),
                property: path,
            },
            PropertyError::InvalidType { path, expected } => Error::InvalidPropertyType {
                logical_id: logical_id.to_string(),
                resource_type: resource_type.to_string(),
                property: path,
                expected,
            },
        }
    }
}

/// A single property slot: a free-form [`Value`], a nested property type, or a
/// list of nested property types.
pub trait PropertyField: Sized {
    fn decode_field(value: Value, path: &str) -> Result<Self, PropertyError>;
    fn encode_field(&self) -> Value;
    fn visit_values(&self, visit: &mut dyn FnMut(&Value));
    fn visit_values_mut(&mut self, visit: &mut dyn FnMut(&mut Value));
}

impl PropertyField for Value {
    fn decode_field(value: Value, _path: &str) -> Result<Self, PropertyError> {
        Ok(value)
    }

    fn encode_field(&self) -> Value {
        self.clone()
    }

    fn visit_values(&self, visit: &mut dyn FnMut(&Value)) {
        visit(self)
    }

    fn visit_values_mut(&mut self, visit: &mut dyn FnMut(&mut Value)) {
        visit(self)
    }
}

impl<T: PropertyType> PropertyField for Vec<T> {
    fn decode_field(value: Value, path: &str) -> Result<Self, PropertyError> {
        match value {
            Value::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| decode_nested(item, &format!("{}[{}]", path, index)))
                .collect(),
            _ => Err(PropertyError::InvalidType {
                path: path.to_string(),
                expected: "a list",
            }),
        }
    }

    fn encode_field(&self) -> Value {
        Value::List(
            self.iter()
                .map(|item| Value::Map(item.encode_properties()))
                .collect(),
        )
    }

    fn visit_values(&self, visit: &mut dyn FnMut(&Value)) {
        self.iter().for_each(|item| item.visit_property_values(visit))
    }

    fn visit_values_mut(&mut self, visit: &mut dyn FnMut(&mut Value)) {
        self.iter_mut()
            .for_each(|item| item.visit_property_values_mut(visit))
    }
}

/// A struct generated by [`property_type!`].
pub trait PropertyType: Sized + Default {
    /// Wire names accepted by [`PropertyType::decode_properties`].
    const PROPERTY_NAMES: &'static [&'static str];

    /// Decodes strictly: every key must be one of [`PropertyType::PROPERTY_NAMES`].
    fn decode_properties(raw: PropertyMap, path: &str) -> Result<Self, PropertyError>;

    /// Encodes the set fields, in declaration order.
    fn encode_properties(&self) -> PropertyMap;

    fn visit_property_values(&self, visit: &mut dyn FnMut(&Value));

    fn visit_property_values_mut(&mut self, visit: &mut dyn FnMut(&mut Value));
}

/// Object-safe view of a resource's properties, typed or generic.
pub trait ResourceProperties: fmt::Debug + Send + Sync + 'static {
    /// The `AWS::Service::Resource` type string.
    fn type_name(&self) -> &str;
    fn to_properties(&self) -> PropertyMap;
    /// Visits every property value, descending through nested property types.
    fn for_each_value(&self, visit: &mut dyn FnMut(&Value));
    fn for_each_value_mut(&mut self, visit: &mut dyn FnMut(&mut Value));
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_boxed(&self) -> Box<dyn ResourceProperties>;
    fn eq_dyn(&self, other: &dyn ResourceProperties) -> bool;
}

/// A resource struct generated by [`resource_type!`].
pub trait ResourceType: ResourceProperties + PropertyType + Clone + PartialEq {
    const TYPE_NAME: &'static str;
}

/// Properties of a resource type the registry does not know, kept as an open map.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericResource {
    pub type_name: String,
    pub properties: PropertyMap,
}

impl GenericResource {
    pub fn new(type_name: impl Into<String>) -> Self {
        GenericResource {
            type_name: type_name.into(),
            properties: PropertyMap::new(),
        }
    }
}

impl ResourceProperties for GenericResource {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn to_properties(&self) -> PropertyMap {
        self.properties.clone()
    }

    fn for_each_value(&self, visit: &mut dyn FnMut(&Value)) {
        self.properties.values().for_each(|value| visit(value))
    }

    fn for_each_value_mut(&mut self, visit: &mut dyn FnMut(&mut Value)) {
        self.properties.values_mut().for_each(|value| visit(value))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_boxed(&self) -> Box<dyn ResourceProperties> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn ResourceProperties) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }
}

pub(crate) fn decode_nested<T: PropertyType>(value: Value, path: &str) -> Result<T, PropertyError> {
    match value {
        Value::Map(raw) => T::decode_properties(raw, path),
        _ => Err(PropertyError::InvalidType {
            path: path.to_string(),
            expected: "an object",
        }),
    }
}

pub(crate) fn reject_unknown(
    raw: &PropertyMap,
    allowed: &[&str],
    path: &str,
) -> Result<(), PropertyError> {
    match raw.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(PropertyError::Unknown {
            path: child_path(path, key),
        }),
        None => Ok(()),
    }
}

pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

pub(crate) fn decode_resource<T: ResourceType>(
    raw: PropertyMap,
) -> Result<Box<dyn ResourceProperties>, PropertyError> {
    Ok(Box::new(T::decode_properties(raw, "")?))
}

/// Declares a nested property type.
///
/// ```ignore
/// property_type! {
///     pub struct ScalingConfig {
///         "DesiredSize" => desired_size: Value,
///         "MaxSize" => max_size: Value,
///     }
/// }
/// ```
///
/// Every field becomes `Option<T>` where `T` is [`Value`], another property
/// type, or a `Vec` of one.
macro_rules! property_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $wire:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::properties::PropertyType for $name {
            const PROPERTY_NAMES: &'static [&'static str] = &[$($wire),*];

            #[allow(unused_mut)]
            fn decode_properties(
                mut raw: $crate::properties::PropertyMap,
                path: &str,
            ) -> ::std::result::Result<Self, $crate::properties::PropertyError> {
                $crate::properties::reject_unknown(&raw, Self::PROPERTY_NAMES, path)?;
                Ok(Self {
                    $(
                        $field: raw
                            .shift_remove($wire)
                            .map(|value| {
                                <$ty as $crate::properties::PropertyField>::decode_field(
                                    value,
                                    &$crate::properties::child_path(path, $wire),
                                )
                            })
                            .transpose()?,
                    )*
                })
            }

            fn encode_properties(&self) -> $crate::properties::PropertyMap {
                #[allow(unused_mut)]
                let mut properties = $crate::properties::PropertyMap::new();
                $(
                    if let Some(value) = &self.$field {
                        properties.insert(
                            $wire.to_string(),
                            $crate::properties::PropertyField::encode_field(value),
                        );
                    }
                )*
                properties
            }

            #[allow(unused_variables)]
            fn visit_property_values(&self, visit: &mut dyn FnMut(&$crate::value::Value)) {
                $(
                    if let Some(value) = &self.$field {
                        $crate::properties::PropertyField::visit_values(value, visit);
                    }
                )*
            }

            #[allow(unused_variables)]
            fn visit_property_values_mut(&mut self, visit: &mut dyn FnMut(&mut $crate::value::Value)) {
                $(
                    if let Some(value) = &mut self.$field {
                        $crate::properties::PropertyField::visit_values_mut(value, visit);
                    }
                )*
            }
        }

        impl $crate::properties::PropertyField for $name {
            fn decode_field(
                value: $crate::value::Value,
                path: &str,
            ) -> ::std::result::Result<Self, $crate::properties::PropertyError> {
                $crate::properties::decode_nested(value, path)
            }

            fn encode_field(&self) -> $crate::value::Value {
                $crate::value::Value::Map(
                    $crate::properties::PropertyType::encode_properties(self),
                )
            }

            fn visit_values(&self, visit: &mut dyn FnMut(&$crate::value::Value)) {
                $crate::properties::PropertyType::visit_property_values(self, visit)
            }

            fn visit_values_mut(&mut self, visit: &mut dyn FnMut(&mut $crate::value::Value)) {
                $crate::properties::PropertyType::visit_property_values_mut(self, visit)
            }
        }
    };
}

/// Declares a resource type: a [`property_type!`] struct bound to its
/// `AWS::Service::Resource` name.
macro_rules! resource_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident = $type_name:literal {
            $(
                $(#[$field_meta:meta])*
                $wire:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $crate::properties::property_type! {
            $(#[$meta])*
            $vis struct $name {
                $(
                    $(#[$field_meta])*
                    $wire => $field : $ty
                ),*
            }
        }

        impl $crate::properties::ResourceType for $name {
            const TYPE_NAME: &'static str = $type_name;
        }

        impl $crate::properties::ResourceProperties for $name {
            fn type_name(&self) -> &str {
                $type_name
            }

            fn to_properties(&self) -> $crate::properties::PropertyMap {
                $crate::properties::PropertyType::encode_properties(self)
            }

            fn for_each_value(&self, visit: &mut dyn FnMut(&$crate::value::Value)) {
                $crate::properties::PropertyType::visit_property_values(self, visit)
            }

            fn for_each_value_mut(&mut self, visit: &mut dyn FnMut(&mut $crate::value::Value)) {
                $crate::properties::PropertyType::visit_property_values_mut(self, visit)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn clone_boxed(&self) -> Box<dyn $crate::properties::ResourceProperties> {
                Box::new(self.clone())
            }

            fn eq_dyn(&self, other: &dyn $crate::properties::ResourceProperties) -> bool {
                other
                    .as_any()
                    .downcast_ref::<Self>()
                    .is_some_and(|other| self == other)
            }
        }
    };
}

pub(crate) use property_type;
pub(crate) use resource_type;
