// Copyright 2020-2022 Amazon Web Services, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
//
// CloudFormation intrinsic function tag mappings from AWS CloudFormation Guard

use std::borrow::Cow;
use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Short-form YAML tag names and the long-form keys they stand for.
    pub(crate) static ref SHORT_FORM_TO_LONG_MAPPING: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("Ref", "Ref");
        m.insert("Condition", "Condition");
        m.insert("GetAtt", "Fn::GetAtt");
        m.insert("Base64", "Fn::Base64");
        m.insert("Sub", "Fn::Sub");
        m.insert("GetAZs", "Fn::GetAZs");
        m.insert("ImportValue", "Fn::ImportValue");
        m.insert("Select", "Fn::Select");
        m.insert("Split", "Fn::Split");
        m.insert("Join", "Fn::Join");
        m.insert("FindInMap", "Fn::FindInMap");
        m.insert("Cidr", "Fn::Cidr");
        m.insert("And", "Fn::And");
        m.insert("Or", "Fn::Or");
        m.insert("Not", "Fn::Not");
        m.insert("Equals", "Fn::Equals");
        m.insert("If", "Fn::If");
        m
    };
}

/// Expands a tag name without its leading `!`. Tags outside the table
/// become `Fn::<Tag>` so that newer functions still reach the decoder.
pub(crate) fn short_form_to_long(tag: &str) -> Cow<'static, str> {
    match SHORT_FORM_TO_LONG_MAPPING.get(tag) {
        Some(long) => Cow::Borrowed(*long),
        None => Cow::Owned(format!("Fn::{}", tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(short_form_to_long("Ref"), "Ref");
        assert_eq!(short_form_to_long("Condition"), "Condition");
        assert_eq!(short_form_to_long("GetAtt"), "Fn::GetAtt");
        assert_eq!(short_form_to_long("Cidr"), "Fn::Cidr");
    }

    #[test]
    fn test_unknown_tag_is_prefixed() {
        assert_eq!(short_form_to_long("ToJsonString"), "Fn::ToJsonString");
    }
}
