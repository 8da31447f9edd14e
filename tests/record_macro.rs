use serde_json::json;

use recval::prelude::*;

#[test]
fn record_macro_basic() {
    let schema = recval::record! { "User" {
        name: Str => recval::string(),
        age: Int => recval::int().nullable(),
    }};

    assert_eq!(schema.name(), "User");
    assert_eq!(schema.fields().len(), 2);

    let data = json!({"name": "Alex", "age": 25});
    let user = validate_input(&schema, &data).unwrap();
    assert_eq!(user.export()["name"], json!("Alex"));

    let missing_age = json!({"name": "Bob", "age": null});
    assert!(validate_input(&schema, &missing_age).is_ok());
}

#[test]
fn record_macro_rename() {
    let schema = recval::record! { "Renamed" {
        first_name: Str as "firstName" => recval::string(),
        last_name: Str as "lastName" => recval::string(),
    }};

    let data = json!({"firstName": "John", "lastName": "Doe"});
    let parsed = validate_input(&schema, &data).unwrap();
    assert_eq!(parsed.export()["first_name"], json!("John"));
    assert_eq!(parsed.export()["last_name"], json!("Doe"));
}

#[test]
fn record_macro_nested() {
    let address = recval::record! { "Address" {
        city: Str => recval::string(),
    }};

    let user = recval::record! { "User" {
        name: Str => recval::string(),
        address: record address,
    }};

    let data = json!({"name": "Alex", "city": "Moscow"});
    let parsed = validate_input(&user, &data).unwrap();
    assert_eq!(parsed.export()["address"], json!({"city": "Moscow"}));
}

#[test]
fn record_macro_accumulates_errors() {
    let schema = recval::record! { "Errors" {
        name: Str => recval::string(),
        age: Int => recval::int(),
    }};

    let data = json!({"name": 1, "age": "x"});
    let report = validate_input(&schema, &data).unwrap_err();
    assert_eq!(report.kind, ReportKind::Validation);
    assert_eq!(report.len(), 2);
}

#[test]
fn record_macro_without_trailing_comma() {
    let schema = recval::record! { "NoComma" {
        flag: Bool => recval::boolean()
    }};

    assert_eq!(schema.fields().len(), 1);
    assert!(validate_input(&schema, &json!({"flag": true})).is_ok());
}
