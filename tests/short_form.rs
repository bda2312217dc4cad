use cfn_template::{Error, Function, Template, Value};
use rstest::rstest;
use serde_json::json;

fn yaml_output(expression: &str) -> Value {
    let yaml = format!("Outputs:\n  Out:\n    Value: {}\n", expression);
    let template = Template::from_yaml(&yaml).unwrap();
    template.outputs["Out"].value.clone()
}

fn json_output(long_form: serde_json::Value) -> Value {
    let tree = json!({"Outputs": {"Out": {"Value": long_form}}});
    let template = Template::from_json(&tree.to_string()).unwrap();
    template.outputs["Out"].value.clone()
}

#[rstest]
#[case::ref_("!Ref Foo", json!({"Ref": "Foo"}))]
#[case::get_att_dotted("!GetAtt Foo.Arn", json!({"Fn::GetAtt": ["Foo", "Arn"]}))]
#[case::get_att_list("!GetAtt [Foo, Arn]", json!({"Fn::GetAtt": "Foo.Arn"}))]
#[case::base64("!Base64 hello", json!({"Fn::Base64": "hello"}))]
#[case::sub("!Sub '${Foo}-x'", json!({"Fn::Sub": "${Foo}-x"}))]
#[case::sub_with_variables(
    "!Sub ['${A}-x', {A: !Ref Foo}]",
    json!({"Fn::Sub": ["${A}-x", {"A": {"Ref": "Foo"}}]})
)]
#[case::get_azs("!GetAZs ''", json!({"Fn::GetAZs": ""}))]
#[case::import_value("!ImportValue shared-vpc", json!({"Fn::ImportValue": "shared-vpc"}))]
#[case::select("!Select [1, !GetAZs '']", json!({"Fn::Select": [1, {"Fn::GetAZs": ""}]}))]
#[case::split("!Split [',', 'a,b']", json!({"Fn::Split": [",", "a,b"]}))]
#[case::join("!Join ['-', [a, !Ref Foo]]", json!({"Fn::Join": ["-", ["a", {"Ref": "Foo"}]]}))]
#[case::find_in_map(
    "!FindInMap [RegionMap, !Ref 'AWS::Region', AMI]",
    json!({"Fn::FindInMap": ["RegionMap", {"Ref": "AWS::Region"}, "AMI"]})
)]
#[case::cidr("!Cidr [10.0.0.0/16, 4, 8]", json!({"Fn::Cidr": ["10.0.0.0/16", 4, 8]}))]
#[case::and(
    "!And [!Condition A, !Condition B]",
    json!({"Fn::And": [{"Condition": "A"}, {"Condition": "B"}]})
)]
#[case::or(
    "!Or [!Condition A, !Equals [a, b]]",
    json!({"Fn::Or": [{"Condition": "A"}, {"Fn::Equals": ["a", "b"]}]})
)]
#[case::not("!Not [!Condition A]", json!({"Fn::Not": [{"Condition": "A"}]}))]
#[case::equals("!Equals [!Ref Env, prod]", json!({"Fn::Equals": [{"Ref": "Env"}, "prod"]}))]
#[case::if_("!If [IsProd, 3, 1]", json!({"Fn::If": ["IsProd", 3, 1]}))]
#[case::condition("!Condition IsProd", json!({"Condition": "IsProd"}))]
fn test_short_form_matches_long_form(#[case] short: &str, #[case] long: serde_json::Value) {
    let value = yaml_output(short);
    assert!(value.is_intrinsic());
    assert_eq!(value, json_output(long));
}

#[rstest]
#[case("{Ref: Foo}")]
#[case("{'Fn::GetAtt': [Foo, Arn]}")]
#[case("{'Fn::If': [IsProd, !Ref Foo, !Ref 'AWS::NoValue']}")]
fn test_long_form_yaml_is_accepted(#[case] expression: &str) {
    let value = yaml_output(expression);
    assert!(value.is_intrinsic());
    let long = value.to_json().unwrap();
    assert_eq!(json_output(long), value);
}

#[test]
fn test_unknown_tag_is_kept_as_unknown_function() {
    let value = yaml_output("!ToJsonString {a: !Ref Foo}");
    match value.as_function() {
        Some(Function::Unknown { name, args }) => {
            assert_eq!(name, "Fn::ToJsonString");
            assert_eq!(args, &Value::from_iter([("a", Value::reference("Foo"))]));
        }
        other => panic!("expected an unknown function, got {other:?}"),
    }
    assert!(value.has_unknown_function());
    assert_eq!(value.to_json().unwrap(), json!({"Fn::ToJsonString": {"a": {"Ref": "Foo"}}}));
}

#[rstest]
#[case::join_arity("!Join [',']")]
#[case::select_arity("!Select [1, 2, 3]")]
#[case::equals_arity("!Equals [a]")]
#[case::and_arity("!And [!Condition A]")]
fn test_wrong_arity_is_rejected(#[case] expression: &str) {
    let yaml = format!("Outputs:\n  Out:\n    Value: {}\n", expression);
    let err = Template::from_yaml(&yaml).unwrap_err();
    assert!(
        matches!(err.root(), Error::InvalidFunctionArity { .. }),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case::ref_list("!Ref [a, b]")]
#[case::join_delimiter("!Join [[a], [b]]")]
#[case::get_att_no_dot("!GetAtt Foo")]
fn test_wrong_argument_type_is_rejected(#[case] expression: &str) {
    let yaml = format!("Outputs:\n  Out:\n    Value: {}\n", expression);
    let err = Template::from_yaml(&yaml).unwrap_err();
    assert!(
        matches!(err.root(), Error::MalformedIntrinsic { .. }),
        "unexpected error: {err}"
    );
}
