use crate::value::Value;

/// A `Parameters` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// `String`, `Number`, `List<Number>`, `CommaDelimitedList`, an
    /// `AWS::EC2::*::Id` type or an `AWS::SSM::Parameter::Value<...>` type.
    pub parameter_type: String,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub allowed_pattern: Option<String>,
    pub allowed_values: Option<Vec<Value>>,
    pub constraint_description: Option<String>,
    pub max_length: Option<Value>,
    pub min_length: Option<Value>,
    pub max_value: Option<Value>,
    pub min_value: Option<Value>,
    pub no_echo: Option<Value>,
}

impl Parameter {
    pub fn new(parameter_type: impl Into<String>) -> Self {
        Parameter {
            parameter_type: parameter_type.into(),
            description: None,
            default: None,
            allowed_pattern: None,
            allowed_values: None,
            constraint_description: None,
            max_length: None,
            min_length: None,
            max_value: None,
            min_value: None,
            no_echo: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An `Outputs` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub value: Value,
    pub description: Option<String>,
    pub export: Option<Export>,
    pub condition: Option<String>,
}

impl Output {
    pub fn new(value: impl Into<Value>) -> Self {
        Output {
            value: value.into(),
            description: None,
            export: None,
            condition: None,
        }
    }

    /// Exports the output under `name` for `Fn::ImportValue` in other stacks.
    pub fn with_export(mut self, name: impl Into<Value>) -> Self {
        self.export = Some(Export { name: name.into() });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub name: Value,
}
