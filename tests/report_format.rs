use serde_json::json;

use recval::prelude::*;

fn input_map(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().unwrap()
}

fn failing_report() -> ValidationReport {
    let schema = recval::record("Sample")
        .field("name", TypeTag::Str, recval::string())
        .field("age", TypeTag::Int, recval::int())
        .build();
    let data = input_map(json!({"name": 1, "age": "x"}));
    validate_and_construct(&schema, &data).unwrap_err()
}

#[test]
fn flatten_groups_messages_by_field() {
    let flat = flatten_report(&failing_report());
    assert!(flat.record_errors.is_empty());
    assert_eq!(flat.field_errors.len(), 2);
    assert_eq!(flat.field_errors["name"].len(), 1);
    assert_eq!(flat.field_errors["age"].len(), 1);
}

#[test]
fn flatten_routes_fieldless_defects_to_record_errors() {
    let report = ValidationReport::parse_failure("Invalid JSON: oops");
    let flat = flatten_report(&report);
    assert_eq!(flat.record_errors, vec!["Invalid JSON: oops"]);
    assert!(flat.field_errors.is_empty());
}

#[test]
fn prettify_annotates_field_value_and_expected_type() {
    let pretty = prettify_report(&failing_report());
    assert!(pretty.contains("✖ Field: age raised ValidationError"));
    assert!(pretty.contains("→ field age, received \"x\", expected <int>"));
}

#[test]
fn display_leads_with_the_kind_label() {
    let rendered = failing_report().to_string();
    assert!(rendered.starts_with("Validation Errors"));

    let schema = recval::record("Broken")
        .push(FieldDescriptor::new(
            "a",
            DeclaredType::Scalar(TypeTag::Int),
        ))
        .build();
    let report = validate_and_construct(&schema, &input_map(json!({"a": 1}))).unwrap_err();
    assert!(report.to_string().starts_with("Formatting Errors"));
}

#[test]
fn defect_codes_have_stable_keys() {
    assert_eq!(DefectCode::MissingValidator.key(), "missing_validator");
    assert_eq!(DefectCode::MissingInputField.key(), "missing_input_field");
    assert_eq!(DefectCode::InvalidValue.key(), "invalid_value");
    assert_eq!(DefectCode::Parse.key(), "parse");
    let mismatch = DefectCode::ValidatorTypeMismatch {
        field_type: "<str>".into(),
        validator_type: "<int>".into(),
    };
    assert_eq!(mismatch.key(), "validator_type_mismatch");
}

#[test]
fn long_received_values_are_truncated() {
    let schema = recval::record("Long")
        .field("blob", TypeTag::Int, recval::int())
        .build();
    let long = "x".repeat(500);
    let data = input_map(json!({ "blob": long }));
    let report = validate_and_construct(&schema, &data).unwrap_err();
    let stored = report.defects[0].received.as_ref().unwrap();
    assert!(stored.as_str().unwrap().len() <= 100);
}
