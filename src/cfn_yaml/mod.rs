// Copyright 2020-2022 Amazon Web Services, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
//
// This module contains code adapted from AWS CloudFormation Guard
// https://github.com/aws-cloudformation/cloudformation-guard
// See README.md for attribution details

mod mappings;

use serde_json::{Map as JsonMap, Number as JsonNumber, Value as Json};
use serde_yml::de::{Event, Progress};
use serde_yml::libyml::parser::ScalarStyle;
use serde_yml::loader::Loader;
use serde_yml::Value as Yaml;

use crate::codec::{numbers, Format};
use crate::error::{Error, Result};

/// Parses a CloudFormation YAML template into a long-form JSON tree.
///
/// Short-form tags such as `!Ref` and `!GetAtt` are rewritten to the
/// single-key objects JSON templates use, so the result decodes exactly like
/// the equivalent JSON document.
pub(crate) fn parse_yaml_to_json(input: &[u8]) -> Result<Json> {
    let text = std::str::from_utf8(input)
        .map_err(|err| Error::yaml_structure(format!("template is not valid UTF-8: {}", err)))?;
    check_integers(input)?;
    let yaml: Yaml = serde_yml::from_str(text).map_err(Error::yaml)?;
    to_json_value(yaml)
}

/// Rejects plain integer scalars outside the 64-bit range before they are
/// rounded to floats. Syntax errors are left for the full parse to report.
fn check_integers(input: &[u8]) -> Result<()> {
    let Ok(mut loader) = Loader::new(Progress::Slice(input)) else {
        return Ok(());
    };
    while let Some(document) = loader.next_document() {
        for (event, mark) in &document.events {
            let Event::Scalar(scalar) = event else {
                continue;
            };
            if scalar.style != ScalarStyle::Plain {
                continue;
            }
            let Ok(text) = std::str::from_utf8(&scalar.value) else {
                continue;
            };
            if is_decimal_integer(text) && !numbers::fits_in_64_bits(text) {
                return Err(numbers::inexact(
                    Format::Yaml,
                    text,
                    mark.line() as usize + 1,
                    mark.column() as usize + 1,
                ));
            }
        }
        if document.error.is_some() {
            break;
        }
    }
    Ok(())
}

// leading zeros make a string, not a number
fn is_decimal_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !(digits.len() > 1 && digits.starts_with('0'))
}

fn to_json_value(yaml: Yaml) -> Result<Json> {
    Ok(match yaml {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => Json::Number(to_json_number(&n)?),
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => Json::Array(
            items
                .into_iter()
                .map(to_json_value)
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = JsonMap::new();
            for (key, value) in mapping {
                object.insert(mapping_key(key)?, to_json_value(value)?);
            }
            Json::Object(object)
        }
        Yaml::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let name = tag.strip_prefix('!').unwrap_or(&tag);
            let mut call = JsonMap::new();
            call.insert(
                mappings::short_form_to_long(name).into_owned(),
                to_json_value(tagged.value)?,
            );
            Json::Object(call)
        }
    })
}

fn to_json_number(n: &serde_yml::Number) -> Result<JsonNumber> {
    if let Some(i) = n.as_i64() {
        Ok(i.into())
    } else if let Some(u) = n.as_u64() {
        Ok(u.into())
    } else {
        n.as_f64()
            .and_then(JsonNumber::from_f64)
            .ok_or_else(|| Error::yaml_structure(format!("number `{}` has no JSON form", n)))
    }
}

fn mapping_key(key: Yaml) -> Result<String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => Err(Error::yaml_structure(
            "mapping keys must be strings, numbers or booleans",
        )),
    }
}
