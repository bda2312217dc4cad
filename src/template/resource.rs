use std::fmt;

use indexmap::IndexMap;

use crate::policies::{CreationPolicy, DeletionPolicy, UpdatePolicy, UpdateReplacePolicy};
use crate::properties::{GenericResource, PropertyMap, ResourceProperties, ResourceType};
use crate::value::Value;

const CUSTOM_TYPE_PREFIX: &str = "Custom::";
const CUSTOM_RESOURCE_TYPE: &str = "AWS::CloudFormation::CustomResource";

/// A resource declaration: typed properties plus the envelope fields
/// CloudFormation accepts on every resource.
pub struct Resource {
    pub properties: Box<dyn ResourceProperties>,
    pub depends_on: Vec<String>,
    pub metadata: IndexMap<String, Value>,
    pub condition: Option<String>,
    /// `None` leaves the key out of the document, which CloudFormation treats
    /// as [`DeletionPolicy::Delete`].
    pub deletion_policy: Option<DeletionPolicy>,
    pub update_replace_policy: Option<UpdateReplacePolicy>,
    pub update_policy: Option<UpdatePolicy>,
    pub creation_policy: Option<CreationPolicy>,
}

impl Resource {
    pub fn new<T: ResourceType>(properties: T) -> Self {
        Self::from_boxed(Box::new(properties))
    }

    /// A resource of a type with no typed declaration.
    pub fn generic(type_name: impl Into<String>, properties: PropertyMap) -> Self {
        Self::from_boxed(Box::new(GenericResource {
            type_name: type_name.into(),
            properties,
        }))
    }

    pub fn from_boxed(properties: Box<dyn ResourceProperties>) -> Self {
        Resource {
            properties,
            depends_on: Vec::new(),
            metadata: IndexMap::new(),
            condition: None,
            deletion_policy: None,
            update_replace_policy: None,
            update_policy: None,
            creation_policy: None,
        }
    }

    pub fn type_name(&self) -> &str {
        self.properties.type_name()
    }

    /// A custom resource, declared as `Custom::<Name>` or
    /// `AWS::CloudFormation::CustomResource`.
    pub fn is_custom(&self) -> bool {
        let type_name = self.type_name();
        type_name == CUSTOM_RESOURCE_TYPE
            || type_name
                .strip_prefix(CUSTOM_TYPE_PREFIX)
                .is_some_and(|name| !name.is_empty())
    }

    pub fn is<T: ResourceType>(&self) -> bool {
        self.properties.as_any().is::<T>()
    }

    pub fn downcast_ref<T: ResourceType>(&self) -> Option<&T> {
        self.properties.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: ResourceType>(&mut self) -> Option<&mut T> {
        self.properties.as_any_mut().downcast_mut()
    }

    /// The DeletionPolicy CloudFormation applies, defaulting to `Delete`.
    pub fn effective_deletion_policy(&self) -> DeletionPolicy {
        self.deletion_policy.unwrap_or_default()
    }

    pub fn with_depends_on<I, S>(mut self, logical_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(logical_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn with_deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self
    }

    pub fn with_update_replace_policy(mut self, policy: UpdateReplacePolicy) -> Self {
        self.update_replace_policy = Some(policy);
        self
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = Some(policy);
        self
    }

    pub fn with_creation_policy(mut self, policy: CreationPolicy) -> Self {
        self.creation_policy = Some(policy);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Clone for Resource {
    fn clone(&self) -> Self {
        Resource {
            properties: self.properties.clone_boxed(),
            depends_on: self.depends_on.clone(),
            metadata: self.metadata.clone(),
            condition: self.condition.clone(),
            deletion_policy: self.deletion_policy,
            update_replace_policy: self.update_replace_policy,
            update_policy: self.update_policy.clone(),
            creation_policy: self.creation_policy.clone(),
        }
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.properties.eq_dyn(other.properties.as_ref())
            && self.depends_on == other.depends_on
            && self.metadata == other.metadata
            && self.condition == other.condition
            && self.deletion_policy == other.deletion_policy
            && self.update_replace_policy == other.update_replace_policy
            && self.update_policy == other.update_policy
            && self.creation_policy == other.creation_policy
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("type", &self.type_name())
            .field("properties", &self.properties)
            .field("depends_on", &self.depends_on)
            .field("metadata", &self.metadata)
            .field("condition", &self.condition)
            .field("deletion_policy", &self.deletion_policy)
            .field("update_replace_policy", &self.update_replace_policy)
            .field("update_policy", &self.update_policy)
            .field("creation_policy", &self.creation_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::sns::{Subscription, Topic};

    #[test]
    fn test_downcast() {
        let mut resource = Resource::new(Topic {
            topic_name: Some(Value::from("t1")),
            ..Default::default()
        });
        assert_eq!(resource.type_name(), "AWS::SNS::Topic");
        assert!(resource.is::<Topic>());
        assert!(resource.downcast_ref::<Subscription>().is_none());

        resource.downcast_mut::<Topic>().unwrap().display_name = Some(Value::from("Alerts"));
        assert_eq!(
            resource.downcast_ref::<Topic>().unwrap().display_name,
            Some(Value::from("Alerts"))
        );
    }

    #[test]
    fn test_equality_compares_properties_across_trait_objects() {
        let topic = Resource::new(Topic::default());
        assert_eq!(topic, topic.clone());
        assert_ne!(topic, Resource::new(Subscription::default()));
        assert_ne!(topic, topic.clone().with_deletion_policy(DeletionPolicy::Retain));
        assert_ne!(
            Resource::generic("AWS::NotReal::Thing", PropertyMap::new()),
            Resource::generic("AWS::NotReal::Other", PropertyMap::new())
        );
    }

    #[test]
    fn test_custom_resource_types() {
        assert!(Resource::generic("Custom::Seeder", PropertyMap::new()).is_custom());
        assert!(Resource::generic("AWS::CloudFormation::CustomResource", PropertyMap::new()).is_custom());
        assert!(!Resource::generic("Custom::", PropertyMap::new()).is_custom());
        assert!(!Resource::generic("AWS::Custom::Thing", PropertyMap::new()).is_custom());
        assert!(!Resource::new(Topic::default()).is_custom());
    }

    #[test]
    fn test_effective_deletion_policy_defaults_to_delete() {
        let resource = Resource::new(Topic::default());
        assert_eq!(resource.deletion_policy, None);
        assert_eq!(resource.effective_deletion_policy(), DeletionPolicy::Delete);
        assert_eq!(
            resource
                .with_deletion_policy(DeletionPolicy::Snapshot)
                .effective_deletion_policy(),
            DeletionPolicy::Snapshot
        );
    }
}
