//! JSON and YAML encoding of whole templates.
//!
//! Both formats are converted to a long-form `serde_json::Value` tree first,
//! so there is a single decoder for intrinsic functions and envelopes.

mod document;
mod envelope;
pub(crate) mod numbers;

use std::fs;
use std::path::Path;

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::cfn_yaml;
use crate::error::{Error, Result};
use crate::template::Template;

/// A template serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Format {
    #[strum(to_string = "JSON", serialize = "json")]
    Json,
    #[strum(to_string = "YAML", serialize = "yaml", serialize = "yml")]
    Yaml,
}

impl Format {
    /// Picks a format from a file extension. `.template` and unknown
    /// extensions return `None`.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Guesses the format from the first non-whitespace byte. JSON templates
    /// are always objects, so anything else is treated as YAML. A leading `{`
    /// may still be flow-style YAML, which [`parse`] falls back to.
    pub fn sniff(input: &[u8]) -> Format {
        match input.iter().find(|byte| !byte.is_ascii_whitespace()) {
            Some(b'{') => Format::Json,
            _ => Format::Yaml,
        }
    }
}

pub fn decode(input: &[u8], format: Format) -> Result<Template> {
    let tree = match format {
        Format::Json => {
            let tree = serde_json::from_slice(input).map_err(Error::json)?;
            numbers::check_json(input)?;
            tree
        }
        Format::Yaml => cfn_yaml::parse_yaml_to_json(input)?,
    };
    decode_tree(tree)
}

/// Decodes an already-parsed long-form JSON tree.
pub fn decode_tree(tree: serde_json::Value) -> Result<Template> {
    document::decode_template(tree)
}

/// Encodes as pretty-printed JSON or long-form YAML.
pub fn encode(template: &Template, format: Format) -> Result<Vec<u8>> {
    let tree = encode_tree(template)?;
    match format {
        Format::Json => serde_json::to_vec_pretty(&tree).map_err(Error::json),
        Format::Yaml => serde_yml::to_string(&tree)
            .map(String::into_bytes)
            .map_err(Error::yaml),
    }
}

pub fn encode_tree(template: &Template) -> Result<serde_json::Value> {
    document::encode_template(template)
}

/// Decodes a template, sniffing the format.
///
/// Input that starts like JSON but does not parse as JSON is retried as
/// YAML, since `{Resources: ...}` is valid flow-style YAML. When both fail
/// to parse, the JSON syntax error is reported.
pub fn parse(input: &[u8]) -> Result<Template> {
    match Format::sniff(input) {
        Format::Json => match decode(input, Format::Json) {
            Err(json_err @ Error::Format { .. }) => {
                tracing::debug!(error = %json_err, "not JSON, retrying as YAML");
                match decode(input, Format::Yaml) {
                    Err(Error::Format { .. }) => Err(json_err),
                    result => result,
                }
            }
            result => result,
        },
        Format::Yaml => decode(input, Format::Yaml),
    }
}

/// Reads and decodes a template file. The format comes from the extension,
/// or is sniffed from the content when the extension is not conclusive.
pub fn open(path: impl AsRef<Path>) -> Result<Template> {
    let path = path.as_ref();
    let input = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match Format::from_path(path) {
        Some(format) => {
            tracing::debug!(path = %path.display(), %format, "reading template");
            decode(&input, format)
        }
        None => {
            tracing::debug!(path = %path.display(), "reading template, sniffing format");
            parse(&input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    const YAML: &str = "Resources:\n  MyTopic:\n    Type: AWS::SNS::Topic\n    Properties:\n      TopicName: !Sub '${AWS::StackName}-alerts'\n";

    #[test]
    fn test_format_names() {
        assert_eq!(Format::Json.to_string(), "JSON");
        assert_eq!(Format::from_str("yml").unwrap(), Format::Yaml);
        assert_eq!(Format::from_str("Json").unwrap(), Format::Json);
        assert!(Format::from_str("toml").is_err());
    }

    #[test]
    fn test_sniff() {
        assert_eq!(Format::sniff(b"  \n{\"Resources\": {}}"), Format::Json);
        assert_eq!(Format::sniff(b"Resources: {}"), Format::Yaml);
        assert_eq!(Format::sniff(b"---\nResources: {}"), Format::Yaml);
        assert_eq!(Format::sniff(b""), Format::Yaml);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("stack.JSON")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("stack.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("stack.template")), None);
        assert_eq!(Format::from_path(Path::new("stack")), None);
    }

    #[test]
    fn test_open_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let template = open(file.path()).unwrap();
        assert_eq!(template.resources.len(), 1);
    }

    #[test]
    fn test_open_sniffs_template_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".template")
            .tempfile()
            .unwrap();
        file.write_all(br#"{"Resources": {"Q": {"Type": "AWS::SQS::Queue"}}}"#)
            .unwrap();

        let template = open(file.path()).unwrap();
        assert!(template.resource("Q").is_some());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        match open(&path) {
            Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_falls_back_to_flow_style_yaml() {
        let template = parse(b"{Resources: {Alerts: {Type: AWS::SNS::Topic}}}").unwrap();
        assert_eq!(template.resource("Alerts").unwrap().type_name(), "AWS::SNS::Topic");

        let flow_with_tag = parse(b"{Outputs: {Region: {Value: !Ref 'AWS::Region'}}}").unwrap();
        assert!(flow_with_tag.outputs["Region"].value.is_intrinsic());
    }

    #[test]
    fn test_parse_reports_json_error_when_neither_format_parses() {
        match parse(b"{\"Resources\": {\"A\": ") {
            Err(Error::Format { format, .. }) => assert_eq!(format, Format::Json),
            other => panic!("expected a JSON syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_json_integer_is_rejected() {
        let input = br#"{"Resources": {"T": {"Type": "AWS::SNS::Topic", "Properties": {"TopicName": 12345678901234567890123}}}}"#;
        match decode(input, Format::Json) {
            Err(Error::InexactNumber { format, literal, line, .. }) => {
                assert_eq!(format, Format::Json);
                assert_eq!(literal, "12345678901234567890123");
                assert_eq!(line, 1);
            }
            other => panic!("expected an inexact number, got {other:?}"),
        }
        let exact = br#"{"Resources": {"T": {"Type": "AWS::SNS::Topic", "Properties": {"TopicName": 18446744073709551615}}}}"#;
        let template = decode(exact, Format::Json).unwrap();
        assert!(template.to_json().unwrap().contains("18446744073709551615"));
    }

    #[test]
    fn test_parse_sniffs_format() {
        let template = parse(YAML.as_bytes()).unwrap();
        let json = template.to_json().unwrap();
        assert_eq!(parse(json.as_bytes()).unwrap(), template);
    }
}
