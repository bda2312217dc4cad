//! The leaf type of a template: a literal, a `Ref`, or an intrinsic function call.

mod function;
pub mod pseudo;
mod wire;

use indexmap::IndexMap;
use serde_json::Number;

pub use function::{
    Function, CONDITION, FN_AND, FN_BASE64, FN_CIDR, FN_EQUALS, FN_FIND_IN_MAP, FN_GET_ATT,
    FN_GET_AZS, FN_IF, FN_IMPORT_VALUE, FN_JOIN, FN_NOT, FN_OR, FN_SELECT, FN_SPLIT, FN_SUB,
    KNOWN_FUNCTIONS, REF,
};

pub(crate) use function::kind;

/// A template value.
///
/// Anywhere CloudFormation accepts a literal it also accepts a reference or a
/// function call, so every property, output value and condition is a `Value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    /// `{"Ref": logical_id}`, to a resource, parameter or pseudo parameter.
    Ref(String),
    Fn(Box<Function>),
}

impl Value {
    pub fn reference(logical_id: impl Into<String>) -> Value {
        Value::Ref(logical_id.into())
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<Value>) -> Value {
        Function::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
        .into()
    }

    pub fn join<I, V>(delimiter: impl Into<String>, values: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Function::Join {
            delimiter: delimiter.into(),
            values: Value::List(values.into_iter().map(Into::into).collect()),
        }
        .into()
    }

    pub fn sub(template: impl Into<String>) -> Value {
        Function::Sub {
            template: template.into(),
            variables: None,
        }
        .into()
    }

    pub fn sub_with(template: impl Into<String>, variables: IndexMap<String, Value>) -> Value {
        Function::Sub {
            template: template.into(),
            variables: Some(variables),
        }
        .into()
    }

    pub fn select(index: impl Into<Value>, list: impl Into<Value>) -> Value {
        Function::Select {
            index: index.into(),
            list: list.into(),
        }
        .into()
    }

    pub fn split(delimiter: impl Into<String>, source: impl Into<Value>) -> Value {
        Function::Split {
            delimiter: delimiter.into(),
            source: source.into(),
        }
        .into()
    }

    pub fn find_in_map(
        map_name: impl Into<Value>,
        top_level_key: impl Into<Value>,
        second_level_key: impl Into<Value>,
    ) -> Value {
        Function::FindInMap {
            map_name: map_name.into(),
            top_level_key: top_level_key.into(),
            second_level_key: second_level_key.into(),
        }
        .into()
    }

    pub fn import_value(name: impl Into<Value>) -> Value {
        Function::ImportValue(name.into()).into()
    }

    pub fn base64(value: impl Into<Value>) -> Value {
        Function::Base64(value.into()).into()
    }

    pub fn cidr(ip_block: impl Into<Value>, count: impl Into<Value>, cidr_bits: impl Into<Value>) -> Value {
        Function::Cidr {
            ip_block: ip_block.into(),
            count: count.into(),
            cidr_bits: cidr_bits.into(),
        }
        .into()
    }

    /// `Fn::GetAZs`. An empty string means the stack's own region.
    pub fn get_azs(region: impl Into<Value>) -> Value {
        Function::GetAZs(region.into()).into()
    }

    pub fn and(first: impl Into<Value>, second: impl Into<Value>) -> Value {
        Function::And(vec![first.into(), second.into()]).into()
    }

    pub fn or(first: impl Into<Value>, second: impl Into<Value>) -> Value {
        Function::Or(vec![first.into(), second.into()]).into()
    }

    pub fn not(condition: impl Into<Value>) -> Value {
        Function::Not(condition.into()).into()
    }

    pub fn equals(left: impl Into<Value>, right: impl Into<Value>) -> Value {
        Function::Equals(left.into(), right.into()).into()
    }

    pub fn fn_if(
        condition: impl Into<String>,
        value_if_true: impl Into<Value>,
        value_if_false: impl Into<Value>,
    ) -> Value {
        Function::If {
            condition: condition.into(),
            value_if_true: value_if_true.into(),
            value_if_false: value_if_false.into(),
        }
        .into()
    }

    pub fn condition(name: impl Into<String>) -> Value {
        Function::Condition(name.into()).into()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The literal string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The logical ID a `Ref` points to.
    pub fn as_ref_target(&self) -> Option<&str> {
        match self {
            Value::Ref(target) => Some(target),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Fn(function) => Some(function),
            _ => None,
        }
    }

    /// True for a `Ref` or any function call.
    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Value::Ref(_) | Value::Fn(_))
    }

    /// True if this value or anything nested in it is an unrecognised `Fn::*` call.
    pub fn has_unknown_function(&self) -> bool {
        let mut found = false;
        self.walk(&mut |value| {
            if let Value::Fn(function) = value {
                found |= !function.is_known();
            }
        });
        found
    }

    /// Visits this value and every value nested in it, parents first.
    pub fn walk(&self, visit: &mut dyn FnMut(&Value)) {
        visit(self);
        match self {
            Value::List(items) => items.iter().for_each(|item| item.walk(visit)),
            Value::Map(map) => map.values().for_each(|item| item.walk(visit)),
            Value::Fn(function) => function
                .arguments()
                .into_iter()
                .for_each(|argument| argument.walk(visit)),
            _ => {}
        }
    }

    /// Like [`Value::walk`], but allows rewriting values in place.
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut Value)) {
        visit(self);
        match self {
            Value::List(items) => items.iter_mut().for_each(|item| item.walk_mut(visit)),
            Value::Map(map) => map.values_mut().for_each(|item| item.walk_mut(visit)),
            Value::Fn(function) => function
                .arguments_mut()
                .into_iter()
                .for_each(|argument| argument.walk_mut(visit)),
            _ => {}
        }
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Fn(Box::new(function))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.into())
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for Value {
    /// NaN and infinities have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
