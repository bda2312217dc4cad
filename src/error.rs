//! Error types for template decoding, encoding and lookup.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::Format;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure the template model can report.
///
/// Decoding is fail-closed: the first error aborts the whole document, so a
/// caller never receives a template that silently lacks part of its input.
#[derive(Debug, Error)]
pub enum Error {
    /// An object shaped like a function call carries arguments of the wrong type.
    #[error("malformed {function}: {reason}")]
    MalformedIntrinsic { function: String, reason: String },

    /// A known intrinsic function received the wrong number of arguments.
    #[error("{function} expects {expected} argument(s), found {found}")]
    InvalidFunctionArity {
        function: String,
        expected: &'static str,
        found: usize,
    },

    /// Strict property decoding found a key that is not in the type's schema.
    #[error("unknown property `{property}` in resource `{logical_id}` ({resource_type})")]
    UnknownProperty {
        logical_id: String,
        resource_type: String,
        property: String,
    },

    /// A nested property type received something other than the expected shape.
    #[error("property `{property}` in resource `{logical_id}` ({resource_type}) must be {expected}")]
    InvalidPropertyType {
        logical_id: String,
        resource_type: String,
        property: String,
        expected: &'static str,
    },

    /// A resource carries a key that is not one of the envelope fields.
    #[error("unknown field `{field}` in resource `{logical_id}` ({resource_type})")]
    UnknownField {
        logical_id: String,
        resource_type: String,
        field: String,
    },

    /// An envelope field has the wrong shape.
    #[error("field `{field}` of resource `{logical_id}` must be {expected}")]
    InvalidField {
        logical_id: String,
        field: &'static str,
        expected: &'static str,
    },

    /// A DeletionPolicy or UpdateReplacePolicy outside the closed set.
    #[error("invalid {field} `{value}` on resource `{logical_id}`")]
    InvalidPolicy {
        logical_id: String,
        field: &'static str,
        value: String,
    },

    #[error("resource `{logical_id}` has no Type")]
    MissingResourceType { logical_id: String },

    /// A parameter or output carries a key outside its schema.
    #[error("unknown attribute `{attribute}` in {section} entry `{logical_id}`")]
    UnknownAttribute {
        section: &'static str,
        logical_id: String,
        attribute: String,
    },

    #[error("{section} entry `{logical_id}` is invalid: {reason}")]
    InvalidEntry {
        section: &'static str,
        logical_id: String,
        reason: String,
    },

    #[error("unknown template section `{section}`")]
    UnknownSection { section: String },

    #[error("{section} contains an empty logical ID")]
    EmptyLogicalId { section: &'static str },

    /// A lookup that expects exactly one match found zero or several.
    #[error("expected exactly one resource of type {resource_type}{}, found {matches}", logical_id_suffix(.logical_id))]
    AmbiguousLookup {
        resource_type: String,
        logical_id: Option<String>,
        matches: usize,
    },

    /// The document is not syntactically valid JSON or YAML.
    #[error("invalid {format} document: {source}")]
    Format {
        format: Format,
        line: Option<usize>,
        column: Option<usize>,
        #[source]
        source: BoxedError,
    },

    /// An integer literal outside the 64-bit range, which both parsers would
    /// round to the nearest float.
    #[error("number `{literal}` at line {line}, column {column} of the {format} document cannot be represented exactly")]
    InexactNumber {
        format: Format,
        literal: String,
        line: usize,
        column: usize,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Locates a value-level error inside a template section.
    #[error("{section} `{logical_id}`: {source}")]
    Context {
        section: &'static str,
        logical_id: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Strips any [`Error::Context`] wrappers and returns the underlying error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn in_section(self, section: &'static str, logical_id: &str) -> Self {
        match self {
            // these already name their resource
            err @ (Error::UnknownProperty { .. }
            | Error::InvalidPropertyType { .. }
            | Error::UnknownField { .. }
            | Error::InvalidField { .. }
            | Error::InvalidPolicy { .. }
            | Error::MissingResourceType { .. }
            | Error::UnknownAttribute { .. }
            | Error::InvalidEntry { .. }) => err,
            err => Error::Context {
                section,
                logical_id: logical_id.to_string(),
                source: Box::new(err),
            },
        }
    }

    pub(crate) fn json(err: serde_json::Error) -> Self {
        let (line, column) = match err.line() {
            0 => (None, None),
            line => (Some(line), Some(err.column())),
        };
        Error::Format {
            format: Format::Json,
            line,
            column,
            source: Box::new(err),
        }
    }

    pub(crate) fn yaml(err: serde_yml::Error) -> Self {
        let location = err.location();
        Error::Format {
            format: Format::Yaml,
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            source: Box::new(err),
        }
    }

    pub(crate) fn yaml_structure(reason: impl Into<String>) -> Self {
        Error::Format {
            format: Format::Yaml,
            line: None,
            column: None,
            source: reason.into().into(),
        }
    }

    pub(crate) fn malformed(function: &str, reason: impl Into<String>) -> Self {
        Error::MalformedIntrinsic {
            function: function.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn arity(function: &str, expected: &'static str, found: usize) -> Self {
        Error::InvalidFunctionArity {
            function: function.to_string(),
            expected,
            found,
        }
    }
}

fn logical_id_suffix(logical_id: &Option<String>) -> String {
    logical_id
        .as_ref()
        .map(|id| format!(" with logical ID `{}`", id))
        .unwrap_or_default()
}
