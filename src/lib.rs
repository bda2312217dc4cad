//! A typed model of AWS CloudFormation templates.
//!
//! Templates decode from JSON or YAML (short-form tags included) into a
//! [`Template`] whose resources carry strongly typed properties, and encode
//! back to either format without losing declaration order.
//!
//! ```
//! use cfn_template::resources::sns::{Subscription, Topic};
//! use cfn_template::{Template, Value};
//!
//! let mut template = Template::new();
//! template
//!     .add("MyTopic", Topic {
//!         topic_name: Some("t1".into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! template
//!     .add("MyTopicSubscription", Subscription {
//!         topic_arn: Some(Value::reference("MyTopic")),
//!         protocol: Some("email".into()),
//!         endpoint: Some("a@b.com".into()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//! let yaml = template.to_yaml().unwrap();
//! assert_eq!(Template::from_yaml(&yaml).unwrap(), template);
//! ```

mod cfn_yaml;
pub mod codec;
pub mod error;
pub mod policies;
pub mod properties;
pub mod references;
pub mod registry;
pub mod resources;
pub mod template;
pub mod value;

pub use codec::{decode, encode, open, parse, Format};
pub use error::{Error, Result};
pub use policies::{CreationPolicy, DeletionPolicy, UpdatePolicy, UpdateReplacePolicy};
pub use properties::{GenericResource, PropertyMap, ResourceProperties, ResourceType};
pub use template::{Export, Output, Parameter, Resource, Template};
pub use value::{Function, Value};
