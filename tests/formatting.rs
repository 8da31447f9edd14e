use serde_json::json;

use recval::prelude::*;

fn input_map(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn misconfigured_fields_are_all_reported() {
    // attr_01: validator present, no input key, but the name is in the input — correct
    // attr_02: validator and explicit input key — correct
    // attr_03: NO validator, explicit input key present in the input — one defect
    // attr_04: validator present, name in the input — correct
    // attr_05: NO validator, no input key, name absent from the input — two defects
    // attr_06: validator present, name in the input — correct
    let schema = recval::record("FormattingErrors")
        .field("attr_01", TypeTag::Str, recval::string())
        .push(
            FieldDescriptor::new("attr_02", DeclaredType::Scalar(TypeTag::Map))
                .with_validator(recval::mapping())
                .with_input_field("attr_01"),
        )
        .push(
            FieldDescriptor::new("attr_03", DeclaredType::Scalar(TypeTag::Int))
                .with_input_field("attr_06"),
        )
        .field("attr_04", TypeTag::Map, recval::mapping())
        .push(FieldDescriptor::new(
            "attr_05",
            DeclaredType::Scalar(TypeTag::Int),
        ))
        .field("attr_06", TypeTag::Map, recval::mapping())
        .build();

    let data = input_map(json!({
        "attr_01": "example string",
        "attr_02": {"example_key": "example_value"},
        "attr_04": {"example_key": "example_value"},
        "attr_07": {"example_key": "example_value"},
        "attr_06": 3,
    }));

    let defects = check_formatting(&schema, &data);
    let messages: Vec<&str> = defects.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Field 'attr_03' has no validator attribute in field metadata",
            "Field 'attr_05' has no validator attribute in field metadata",
            "Field 'attr_05' has no input_field attribute in field metadata and field 'attr_05' not present in input data.",
        ]
    );

    assert_eq!(defects[0].code, DefectCode::MissingValidator);
    assert_eq!(defects[2].code, DefectCode::MissingInputField);
    assert_eq!(defects[0].field.as_deref(), Some("attr_03"));
    assert_eq!(defects[2].field.as_deref(), Some("attr_05"));
}

#[test]
fn correctly_formatted_schema_yields_no_defects() {
    let schema = recval::record("FormattingCorrect")
        .field("attr_01", TypeTag::Str, recval::string())
        .push(
            FieldDescriptor::new("attr_02", DeclaredType::Scalar(TypeTag::Map))
                .with_validator(recval::mapping())
                .with_input_field("attr_01"),
        )
        .push(
            FieldDescriptor::new("attr_03", DeclaredType::Scalar(TypeTag::Int))
                .with_validator(recval::int())
                .with_input_field("attr_06"),
        )
        .field("attr_04", TypeTag::Map, recval::mapping())
        .field("attr_05", TypeTag::Int, recval::int())
        .build();

    let data = input_map(json!({
        "attr_01": "example string",
        "attr_02": {"example_key": "example_value"},
        "attr_04": {"example_key": "example_value"},
        "attr_05": 123,
        "attr_07": {"example_key": "example_value"},
    }));

    assert!(check_formatting(&schema, &data).is_empty());
}

#[test]
fn every_misconfigured_field_contributes_its_own_defect() {
    // Three independently broken leaf fields, names all present in the
    // input, so each contributes exactly the missing-validator defect.
    let schema = recval::record("AllBroken")
        .push(FieldDescriptor::new("a", DeclaredType::Scalar(TypeTag::Int)))
        .push(FieldDescriptor::new("b", DeclaredType::Scalar(TypeTag::Str)))
        .push(FieldDescriptor::new("c", DeclaredType::Scalar(TypeTag::Map)))
        .build();

    let data = input_map(json!({"a": 1, "b": "x", "c": {}}));
    let defects = check_formatting(&schema, &data);
    assert_eq!(defects.len(), 3);
    assert!(defects
        .iter()
        .all(|d| d.code == DefectCode::MissingValidator));
}

#[test]
fn explicit_input_key_resolves_even_when_absent_from_input() {
    let schema = recval::record("ExplicitKey")
        .push(
            FieldDescriptor::new("a", DeclaredType::Scalar(TypeTag::Int))
                .with_validator(recval::int())
                .with_input_field("not_present_anywhere"),
        )
        .build();

    let data = input_map(json!({"unrelated": true}));
    assert!(check_formatting(&schema, &data).is_empty());
}

#[test]
fn formatting_defects_block_value_validation() {
    // attr_06 carries an int where the mapping validator would reject it,
    // but the report must only ever contain formatting defects.
    let schema = recval::record("PhaseSeparation")
        .push(FieldDescriptor::new(
            "attr_05",
            DeclaredType::Scalar(TypeTag::Int),
        ))
        .field("attr_06", TypeTag::Map, recval::mapping())
        .build();

    let data = input_map(json!({"attr_06": 3}));
    let report = validate_and_construct(&schema, &data).unwrap_err();
    assert_eq!(report.kind, ReportKind::Formatting);
    assert!(report
        .defects
        .iter()
        .all(|d| d.code != DefectCode::InvalidValue));
}

#[test]
fn nested_record_fields_need_no_validator_or_input_key() {
    let inner = recval::record("Inner")
        .field("inner_attr", TypeTag::Int, recval::int())
        .build();
    let outer = recval::record("Outer")
        .nested("child", inner)
        .build();

    let data = input_map(json!({"inner_attr": 1}));
    assert!(check_formatting(&outer, &data).is_empty());
}

#[test]
fn nested_defects_flatten_into_one_sequence() {
    let inner = recval::record("Inner")
        .push(FieldDescriptor::new(
            "inner_broken",
            DeclaredType::Scalar(TypeTag::Str),
        ))
        .build();
    let outer = recval::record("Outer")
        .nested("child", inner)
        .push(FieldDescriptor::new(
            "outer_broken",
            DeclaredType::Scalar(TypeTag::Int),
        ))
        .build();

    let data = input_map(json!({"inner_broken": "x", "outer_broken": 2}));
    let defects = check_formatting(&outer, &data);
    let messages: Vec<&str> = defects.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Field 'inner_broken' has no validator attribute in field metadata",
            "Field 'outer_broken' has no validator attribute in field metadata",
        ]
    );
}

#[test]
fn nested_leaves_resolve_keys_against_the_flat_root_mapping() {
    // No namespacing: the nested leaf's own name must be a root-level key.
    let inner = recval::record("Inner")
        .field("inner_attr", TypeTag::Int, recval::int())
        .build();
    let outer = recval::record("Outer").nested("child", inner).build();

    let data = input_map(json!({"child": {"inner_attr": 1}}));
    let defects = check_formatting(&outer, &data);
    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].code, DefectCode::MissingInputField);
    assert_eq!(defects[0].field.as_deref(), Some("inner_attr"));
}
