//! Conversion between [`Value`] and its long-form JSON representation.
//!
//! YAML documents reach this module too, after their short-form tags have
//! been rewritten into long form, so this is the only intrinsic decoder.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as Json};

use super::function::{Function, CONDITION, REF};
use super::{kind, Value};
use crate::error::{Error, Result};

impl Value {
    /// Decodes a long-form JSON tree, recognising intrinsic function objects.
    pub fn from_json(json: Json) -> Result<Value> {
        let value = match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::from_json)
                    .collect::<Result<_>>()?,
            ),
            Json::Object(map) => decode_object(map)?,
        };
        Ok(value)
    }

    /// Encodes to the minimal long-form JSON shape.
    pub fn to_json(&self) -> Result<Json> {
        let json = match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::Number(n.clone()),
            Value::String(s) => Json::String(s.clone()),
            Value::List(items) => Json::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<_>>()?,
            ),
            Value::Map(map) => {
                if let Some(key) = function_key(map) {
                    return Err(Error::malformed(
                        key,
                        "a literal map with this single key would decode as a function call",
                    ));
                }
                let mut object = JsonMap::new();
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json()?);
                }
                Json::Object(object)
            }
            Value::Ref(target) => {
                if target.is_empty() {
                    return Err(Error::malformed(REF, "logical ID must not be empty"));
                }
                let mut object = JsonMap::new();
                object.insert(REF.to_string(), Json::String(target.clone()));
                Json::Object(object)
            }
            Value::Fn(function) => function.to_json()?,
        };
        Ok(json)
    }
}

/// The key of a single-entry map that has the shape of an intrinsic call.
fn function_key(map: &IndexMap<String, Value>) -> Option<&str> {
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.first()?;
    match key.as_str() {
        REF => Some(REF),
        CONDITION if matches!(value, Value::String(_)) => Some(CONDITION),
        name if name.starts_with("Fn::") => Some(name),
        _ => None,
    }
}

fn decode_object(map: JsonMap<String, Json>) -> Result<Value> {
    let mut entries = map.into_iter();
    match (entries.next(), entries.next()) {
        (Some((key, args)), None) => decode_single_entry(key, args),
        (first, second) => first
            .into_iter()
            .chain(second)
            .chain(entries)
            .map(|(key, value)| Ok((key, Value::from_json(value)?)))
            .collect::<Result<_>>()
            .map(Value::Map),
    }
}

fn decode_single_entry(key: String, args: Json) -> Result<Value> {
    match key.as_str() {
        REF => match args {
            Json::String(target) => Ok(Value::Ref(target)),
            other => Err(Error::malformed(
                REF,
                format!("expected a logical ID string, found {}", kind(&other)),
            )),
        },
        // IAM policy documents use `Condition` as an ordinary key with an object value
        CONDITION => match args {
            Json::String(name) => Ok(Function::Condition(name).into()),
            other => {
                let mut map = IndexMap::new();
                map.insert(key, Value::from_json(other)?);
                Ok(Value::Map(map))
            }
        },
        name if name.starts_with("Fn::") => Function::decode(name, args).map(Value::from),
        _ => {
            let mut map = IndexMap::new();
            map.insert(key, Value::from_json(args)?);
            Ok(Value::Map(map))
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Value::from_json(json).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::pseudo;
    use serde_json::json;

    #[test]
    fn test_decode_literals() {
        let value = Value::from_json(json!({"a": [1, 2.5, true, null, "s"]})).unwrap();
        let list = value.as_map().unwrap()["a"].as_list().unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list[0], Value::from(1));
        assert!(list[3].is_null());
    }

    #[test]
    fn test_decode_ref() {
        assert_eq!(
            Value::from_json(json!({"Ref": "AWS::Region"})).unwrap(),
            Value::reference(pseudo::REGION)
        );
    }

    #[test]
    fn test_decode_ref_requires_string() {
        let err = Value::from_json(json!({"Ref": ["A"]})).unwrap_err();
        assert!(matches!(err, Error::MalformedIntrinsic { ref function, .. } if function == "Ref"));
    }

    #[test]
    fn test_condition_with_string_is_a_condition_reference() {
        assert_eq!(
            Value::from_json(json!({"Condition": "IsProd"})).unwrap(),
            Value::condition("IsProd")
        );
    }

    #[test]
    fn test_iam_condition_block_stays_a_map() {
        let statement = json!({
            "Condition": {"StringEquals": {"aws:SourceAccount": {"Ref": "AWS::AccountId"}}}
        });
        let value = Value::from_json(statement.clone()).unwrap();
        let condition = &value.as_map().unwrap()["Condition"];
        let inner = &condition.as_map().unwrap()["StringEquals"].as_map().unwrap()["aws:SourceAccount"];
        assert_eq!(inner, &Value::reference(pseudo::ACCOUNT_ID));
        assert_eq!(value.to_json().unwrap(), statement);
    }

    #[test]
    fn test_multi_key_object_with_function_names_is_literal() {
        let json = json!({"Ref": "A", "Other": 1});
        let value = Value::from_json(json.clone()).unwrap();
        assert!(matches!(value, Value::Map(_)));
        assert_eq!(value.to_json().unwrap(), json);
    }

    #[test]
    fn test_get_att_dotted_form_encodes_as_list() {
        let value = Value::from_json(json!({"Fn::GetAtt": "MyTopic.TopicName"})).unwrap();
        assert_eq!(value, Value::get_att("MyTopic", "TopicName"));
        assert_eq!(
            value.to_json().unwrap(),
            json!({"Fn::GetAtt": ["MyTopic", "TopicName"]})
        );
    }

    #[test]
    fn test_unknown_function_round_trips() {
        let json = json!({"Fn::ForEach::Topics": ["Name", ["A", "B"], {"${Name}": {"Type": "AWS::SNS::Topic"}}]});
        let value = Value::from_json(json.clone()).unwrap();
        assert!(value.has_unknown_function());
        assert_eq!(value.to_json().unwrap(), json);
    }

    #[test]
    fn test_nested_arity_error_fails_whole_value() {
        let err = Value::from_json(json!({
            "Tags": [{"Key": "Name", "Value": {"Fn::Join": ["-"]}}]
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFunctionArity { found: 1, .. }));
    }

    #[test]
    fn test_empty_ref_fails_to_encode() {
        assert!(matches!(
            Value::reference("").to_json(),
            Err(Error::MalformedIntrinsic { .. })
        ));
        assert!(matches!(
            Value::condition("").to_json(),
            Err(Error::MalformedIntrinsic { .. })
        ));
    }

    #[test]
    fn test_function_shaped_literal_map_fails_to_encode() {
        for (key, value) in [
            ("Ref", Value::from("Bucket")),
            ("Fn::GetAtt", Value::from("Bucket.Arn")),
            ("Condition", Value::from("IsProd")),
        ] {
            let literal = Value::from_iter([(key, value)]);
            match literal.to_json() {
                Err(Error::MalformedIntrinsic { function, .. }) => assert_eq!(function, key),
                other => panic!("expected {key} to be rejected, got {other:?}"),
            }
        }

        let nested = Value::List(vec![Value::from_iter([("Fn::Sub", Value::from("${A}"))])]);
        assert!(matches!(nested.to_json(), Err(Error::MalformedIntrinsic { .. })));
    }

    #[test]
    fn test_single_key_literal_maps_that_cannot_be_mistaken_still_encode() {
        let condition_block = Value::from_iter([(
            "Condition",
            Value::from_iter([("Bool", Value::from_iter([("aws:SecureTransport", Value::from("false"))]))]),
        )]);
        assert_eq!(
            condition_block.to_json().unwrap(),
            json!({"Condition": {"Bool": {"aws:SecureTransport": "false"}}})
        );
        assert_eq!(
            Value::from_iter([("Name", Value::from("x"))]).to_json().unwrap(),
            json!({"Name": "x"})
        );
    }

    #[test]
    fn test_serde_delegates_to_wire_format() {
        let value: Value = serde_json::from_str(r#"{"Fn::Select": ["1", {"Ref": "Subnets"}]}"#).unwrap();
        assert_eq!(value, Value::select("1", Value::reference("Subnets")));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"Fn::Select":["1",{"Ref":"Subnets"}]}"#
        );
    }
}
