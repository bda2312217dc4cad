//! Maps `AWS::Service::Resource` type strings to property decoders.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::properties::{GenericResource, PropertyError, PropertyMap, ResourceProperties};
use crate::resources::REGISTRATIONS;

/// Strict decoder for one resource type's `Properties`.
pub type DecodeFn = fn(PropertyMap) -> Result<Box<dyn ResourceProperties>, PropertyError>;

/// One entry of the static resource table.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub type_name: &'static str,
    pub decode: DecodeFn,
}

lazy_static! {
    static ref REGISTRY: HashMap<&'static str, DecodeFn> = REGISTRATIONS
        .iter()
        .map(|registration| (registration.type_name, registration.decode))
        .collect();
}

pub fn lookup(type_name: &str) -> Option<DecodeFn> {
    REGISTRY.get(type_name).copied()
}

pub fn is_registered(type_name: &str) -> bool {
    REGISTRY.contains_key(type_name)
}

/// Registered type names, in table order.
pub fn registered_types() -> impl Iterator<Item = &'static str> {
    REGISTRATIONS.iter().map(|registration| registration.type_name)
}

/// Decodes `raw` with the registered decoder, or keeps it as a
/// [`GenericResource`] when the type is unknown.
pub fn decode_properties(
    type_name: &str,
    raw: PropertyMap,
) -> Result<Box<dyn ResourceProperties>, PropertyError> {
    match lookup(type_name) {
        Some(decode) => decode(raw),
        None => {
            tracing::warn!(resource_type = type_name, "unregistered resource type, keeping properties untyped");
            Ok(Box::new(GenericResource {
                type_name: type_name.to_string(),
                properties: raw,
            }))
        }
    }
}
