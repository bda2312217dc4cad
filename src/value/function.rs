//! Intrinsic function applications.

use indexmap::IndexMap;
use serde_json::{json, Map as JsonMap, Value as Json};

use super::Value;
use crate::error::{Error, Result};

pub const REF: &str = "Ref";
pub const CONDITION: &str = "Condition";
pub const FN_AND: &str = "Fn::And";
pub const FN_BASE64: &str = "Fn::Base64";
pub const FN_CIDR: &str = "Fn::Cidr";
pub const FN_EQUALS: &str = "Fn::Equals";
pub const FN_FIND_IN_MAP: &str = "Fn::FindInMap";
pub const FN_GET_ATT: &str = "Fn::GetAtt";
pub const FN_GET_AZS: &str = "Fn::GetAZs";
pub const FN_IF: &str = "Fn::If";
pub const FN_IMPORT_VALUE: &str = "Fn::ImportValue";
pub const FN_JOIN: &str = "Fn::Join";
pub const FN_NOT: &str = "Fn::Not";
pub const FN_OR: &str = "Fn::Or";
pub const FN_SELECT: &str = "Fn::Select";
pub const FN_SPLIT: &str = "Fn::Split";
pub const FN_SUB: &str = "Fn::Sub";

/// Every `Fn::*` name with a dedicated [`Function`] variant.
pub const KNOWN_FUNCTIONS: &[&str] = &[
    FN_AND,
    FN_BASE64,
    FN_CIDR,
    FN_EQUALS,
    FN_FIND_IN_MAP,
    FN_GET_ATT,
    FN_GET_AZS,
    FN_IF,
    FN_IMPORT_VALUE,
    FN_JOIN,
    FN_NOT,
    FN_OR,
    FN_SELECT,
    FN_SPLIT,
    FN_SUB,
];

const CONDITION_LIST_ARITY: &str = "2 to 10";

/// An intrinsic function call other than `Ref`.
#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    GetAtt {
        logical_id: String,
        attribute: Value,
    },
    /// `values` is usually a [`Value::List`], but may be any expression that
    /// yields a list, such as a `Ref` to a `CommaDelimitedList` parameter.
    Join {
        delimiter: String,
        values: Value,
    },
    Sub {
        template: String,
        variables: Option<IndexMap<String, Value>>,
    },
    Select {
        index: Value,
        list: Value,
    },
    Split {
        delimiter: String,
        source: Value,
    },
    FindInMap {
        map_name: Value,
        top_level_key: Value,
        second_level_key: Value,
    },
    ImportValue(Value),
    Base64(Value),
    Cidr {
        ip_block: Value,
        count: Value,
        cidr_bits: Value,
    },
    GetAZs(Value),
    And(Vec<Value>),
    Or(Vec<Value>),
    Not(Value),
    Equals(Value, Value),
    If {
        condition: String,
        value_if_true: Value,
        value_if_false: Value,
    },
    /// A reference to a named condition, `{"Condition": "IsProd"}`.
    Condition(String),
    /// An `Fn::*` call this model has no variant for. The arguments are kept
    /// as decoded so the call re-encodes with the same content.
    Unknown {
        name: String,
        args: Value,
    },
}

impl Function {
    /// The wire name, e.g. `Fn::Join`.
    pub fn name(&self) -> &str {
        match self {
            Function::GetAtt { .. } => FN_GET_ATT,
            Function::Join { .. } => FN_JOIN,
            Function::Sub { .. } => FN_SUB,
            Function::Select { .. } => FN_SELECT,
            Function::Split { .. } => FN_SPLIT,
            Function::FindInMap { .. } => FN_FIND_IN_MAP,
            Function::ImportValue(_) => FN_IMPORT_VALUE,
            Function::Base64(_) => FN_BASE64,
            Function::Cidr { .. } => FN_CIDR,
            Function::GetAZs(_) => FN_GET_AZS,
            Function::And(_) => FN_AND,
            Function::Or(_) => FN_OR,
            Function::Not(_) => FN_NOT,
            Function::Equals(..) => FN_EQUALS,
            Function::If { .. } => FN_IF,
            Function::Condition(_) => CONDITION,
            Function::Unknown { name, .. } => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Function::Unknown { .. })
    }

    /// The nested values this call takes as arguments, in wire order.
    pub fn arguments(&self) -> Vec<&Value> {
        match self {
            Function::GetAtt { attribute, .. } => vec![attribute],
            Function::Join { values, .. } => vec![values],
            Function::Sub { variables, .. } => variables
                .iter()
                .flat_map(|variables| variables.values())
                .collect(),
            Function::Select { index, list } => vec![index, list],
            Function::Split { source, .. } => vec![source],
            Function::FindInMap {
                map_name,
                top_level_key,
                second_level_key,
            } => vec![map_name, top_level_key, second_level_key],
            Function::ImportValue(value)
            | Function::Base64(value)
            | Function::GetAZs(value)
            | Function::Not(value) => vec![value],
            Function::Cidr {
                ip_block,
                count,
                cidr_bits,
            } => vec![ip_block, count, cidr_bits],
            Function::And(conditions) | Function::Or(conditions) => conditions.iter().collect(),
            Function::Equals(left, right) => vec![left, right],
            Function::If {
                value_if_true,
                value_if_false,
                ..
            } => vec![value_if_true, value_if_false],
            Function::Condition(_) => Vec::new(),
            Function::Unknown { args, .. } => vec![args],
        }
    }

    pub fn arguments_mut(&mut self) -> Vec<&mut Value> {
        match self {
            Function::GetAtt { attribute, .. } => vec![attribute],
            Function::Join { values, .. } => vec![values],
            Function::Sub { variables, .. } => variables
                .iter_mut()
                .flat_map(|variables| variables.values_mut())
                .collect(),
            Function::Select { index, list } => vec![index, list],
            Function::Split { source, .. } => vec![source],
            Function::FindInMap {
                map_name,
                top_level_key,
                second_level_key,
            } => vec![map_name, top_level_key, second_level_key],
            Function::ImportValue(value)
            | Function::Base64(value)
            | Function::GetAZs(value)
            | Function::Not(value) => vec![value],
            Function::Cidr {
                ip_block,
                count,
                cidr_bits,
            } => vec![ip_block, count, cidr_bits],
            Function::And(conditions) | Function::Or(conditions) => {
                conditions.iter_mut().collect()
            }
            Function::Equals(left, right) => vec![left, right],
            Function::If {
                value_if_true,
                value_if_false,
                ..
            } => vec![value_if_true, value_if_false],
            Function::Condition(_) => Vec::new(),
            Function::Unknown { args, .. } => vec![args],
        }
    }

    /// Decodes the arguments of an `Fn::*` key.
    pub(crate) fn decode(name: &str, args: Json) -> Result<Function> {
        let function = match name {
            FN_GET_ATT => decode_get_att(args)?,
            FN_JOIN => {
                let [delimiter, values] = fixed_args(name, args, "2")?;
                Function::Join {
                    delimiter: string_arg(name, "delimiter", delimiter)?,
                    values: Value::from_json(values)?,
                }
            }
            FN_SUB => decode_sub(args)?,
            FN_SELECT => {
                let [index, list] = fixed_args(name, args, "2")?;
                Function::Select {
                    index: Value::from_json(index)?,
                    list: Value::from_json(list)?,
                }
            }
            FN_SPLIT => {
                let [delimiter, source] = fixed_args(name, args, "2")?;
                Function::Split {
                    delimiter: string_arg(name, "delimiter", delimiter)?,
                    source: Value::from_json(source)?,
                }
            }
            FN_FIND_IN_MAP => {
                let [map_name, top_level_key, second_level_key] = fixed_args(name, args, "3")?;
                Function::FindInMap {
                    map_name: Value::from_json(map_name)?,
                    top_level_key: Value::from_json(top_level_key)?,
                    second_level_key: Value::from_json(second_level_key)?,
                }
            }
            FN_IMPORT_VALUE => Function::ImportValue(Value::from_json(args)?),
            FN_BASE64 => Function::Base64(Value::from_json(args)?),
            FN_GET_AZS => Function::GetAZs(Value::from_json(args)?),
            FN_CIDR => {
                let [ip_block, count, cidr_bits] = fixed_args(name, args, "3")?;
                Function::Cidr {
                    ip_block: Value::from_json(ip_block)?,
                    count: Value::from_json(count)?,
                    cidr_bits: Value::from_json(cidr_bits)?,
                }
            }
            FN_AND => Function::And(condition_list(name, args)?),
            FN_OR => Function::Or(condition_list(name, args)?),
            FN_NOT => {
                let [condition] = fixed_args(name, args, "1")?;
                Function::Not(Value::from_json(condition)?)
            }
            FN_EQUALS => {
                let [left, right] = fixed_args(name, args, "2")?;
                Function::Equals(Value::from_json(left)?, Value::from_json(right)?)
            }
            FN_IF => {
                let [condition, value_if_true, value_if_false] = fixed_args(name, args, "3")?;
                Function::If {
                    condition: string_arg(name, "condition name", condition)?,
                    value_if_true: Value::from_json(value_if_true)?,
                    value_if_false: Value::from_json(value_if_false)?,
                }
            }
            _ => {
                tracing::warn!(function = name, "unknown intrinsic function, keeping raw arguments");
                Function::Unknown {
                    name: name.to_string(),
                    args: Value::from_json(args)?,
                }
            }
        };
        Ok(function)
    }

    /// Encodes the call as its single-key wire object.
    pub(crate) fn to_json(&self) -> Result<Json> {
        let name = self.name();
        let args = match self {
            Function::GetAtt {
                logical_id,
                attribute,
            } => {
                non_empty(name, "logical ID", logical_id)?;
                json!([logical_id, attribute.to_json()?])
            }
            Function::Join { delimiter, values } => json!([delimiter, values.to_json()?]),
            Function::Sub {
                template,
                variables: None,
            } => json!(template),
            Function::Sub {
                template,
                variables: Some(variables),
            } => {
                let mut encoded = JsonMap::new();
                for (key, value) in variables {
                    encoded.insert(key.clone(), value.to_json()?);
                }
                json!([template, encoded])
            }
            Function::Select { index, list } => json!([index.to_json()?, list.to_json()?]),
            Function::Split { delimiter, source } => json!([delimiter, source.to_json()?]),
            Function::FindInMap {
                map_name,
                top_level_key,
                second_level_key,
            } => json!([
                map_name.to_json()?,
                top_level_key.to_json()?,
                second_level_key.to_json()?
            ]),
            Function::ImportValue(value) | Function::Base64(value) | Function::GetAZs(value) => {
                value.to_json()?
            }
            Function::Cidr {
                ip_block,
                count,
                cidr_bits,
            } => json!([ip_block.to_json()?, count.to_json()?, cidr_bits.to_json()?]),
            Function::And(conditions) | Function::Or(conditions) => {
                if !(2..=10).contains(&conditions.len()) {
                    return Err(Error::arity(name, CONDITION_LIST_ARITY, conditions.len()));
                }
                Json::Array(
                    conditions
                        .iter()
                        .map(Value::to_json)
                        .collect::<Result<Vec<_>>>()?,
                )
            }
            Function::Not(condition) => json!([condition.to_json()?]),
            Function::Equals(left, right) => json!([left.to_json()?, right.to_json()?]),
            Function::If {
                condition,
                value_if_true,
                value_if_false,
            } => {
                non_empty(name, "condition name", condition)?;
                json!([condition, value_if_true.to_json()?, value_if_false.to_json()?])
            }
            Function::Condition(condition) => {
                non_empty(name, "condition name", condition)?;
                json!(condition)
            }
            Function::Unknown { name, args } => {
                if !name.starts_with("Fn::") || KNOWN_FUNCTIONS.contains(&name.as_str()) {
                    return Err(Error::malformed(
                        name,
                        "unknown functions must use an unrecognised `Fn::` name",
                    ));
                }
                args.to_json()?
            }
        };
        let mut object = JsonMap::new();
        object.insert(name.to_string(), args);
        Ok(Json::Object(object))
    }
}

fn decode_get_att(args: Json) -> Result<Function> {
    match args {
        Json::String(dotted) => match dotted.split_once('.') {
            Some((logical_id, attribute)) if !logical_id.is_empty() && !attribute.is_empty() => {
                Ok(Function::GetAtt {
                    logical_id: logical_id.to_string(),
                    attribute: Value::String(attribute.to_string()),
                })
            }
            _ => Err(Error::malformed(
                FN_GET_ATT,
                format!("expected `LogicalId.Attribute`, found `{}`", dotted),
            )),
        },
        args => {
            let [logical_id, attribute] = fixed_args(FN_GET_ATT, args, "2")?;
            Ok(Function::GetAtt {
                logical_id: string_arg(FN_GET_ATT, "logical ID", logical_id)?,
                attribute: Value::from_json(attribute)?,
            })
        }
    }
}

fn decode_sub(args: Json) -> Result<Function> {
    match args {
        Json::String(template) => Ok(Function::Sub {
            template,
            variables: None,
        }),
        // the list form always carries the variable map
        args @ Json::Array(_) => {
            let [template, variables] = fixed_args(FN_SUB, args, "2")?;
            let Json::Object(variables) = variables else {
                return Err(Error::malformed(
                    FN_SUB,
                    format!("expected a variable map, found {}", kind(&variables)),
                ));
            };
            let variables = variables
                .into_iter()
                .map(|(key, value)| Ok((key, Value::from_json(value)?)))
                .collect::<Result<IndexMap<_, _>>>()?;
            Ok(Function::Sub {
                template: string_arg(FN_SUB, "template", template)?,
                variables: Some(variables),
            })
        }
        other => Err(Error::malformed(
            FN_SUB,
            format!("expected a template string or a list, found {}", kind(&other)),
        )),
    }
}

fn fixed_args<const N: usize>(function: &str, args: Json, expected: &'static str) -> Result<[Json; N]> {
    match args {
        Json::Array(items) => {
            let found = items.len();
            <[Json; N]>::try_from(items).map_err(|_| Error::arity(function, expected, found))
        }
        other => Err(Error::malformed(
            function,
            format!("expected a list of {} argument(s), found {}", expected, kind(&other)),
        )),
    }
}

fn condition_list(function: &str, args: Json) -> Result<Vec<Value>> {
    match args {
        Json::Array(items) if (2..=10).contains(&items.len()) => {
            items.into_iter().map(Value::from_json).collect()
        }
        Json::Array(items) => Err(Error::arity(function, CONDITION_LIST_ARITY, items.len())),
        other => Err(Error::malformed(
            function,
            format!("expected a list of conditions, found {}", kind(&other)),
        )),
    }
}

fn string_arg(function: &str, what: &str, arg: Json) -> Result<String> {
    match arg {
        Json::String(s) => Ok(s),
        other => Err(Error::malformed(
            function,
            format!("{} must be a string, found {}", what, kind(&other)),
        )),
    }
}

fn non_empty(function: &str, what: &str, s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(Error::malformed(function, format!("{} must not be empty", what)));
    }
    Ok(())
}

pub(crate) fn kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "a list",
        Json::Object(_) => "an object",
    }
}
