use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Defect, DefectCode, ValidationReport};
use crate::formatting::check_formatting;
use crate::input::RecordInput;
use crate::instance::{FieldValue, RecordInstance};
use crate::schema::RecordSchema;

/// Full pipeline: formatting check first, then value validation.
///
/// Formatting defects short-circuit the whole call — no instance is
/// constructed and a [`Formatting`](crate::error::ReportKind::Formatting)
/// report lists every defect found. Only a clean schema proceeds to the
/// value phase.
///
/// # Example
/// ```
/// use serde_json::json;
///
/// let schema = recval::record("User")
///     .field("name", recval::schema::TypeTag::Str, recval::string())
///     .build();
/// let data = json!({"name": "Alex"});
/// let user = recval::validate_and_construct(&schema, data.as_object().unwrap()).unwrap();
/// assert_eq!(user.export()["name"], json!("Alex"));
/// ```
pub fn validate_and_construct(
    schema: &Arc<RecordSchema>,
    input: &Map<String, Value>,
) -> Result<RecordInstance, ValidationReport> {
    let formatting = check_formatting(schema, input);
    if !formatting.is_empty() {
        return Err(ValidationReport::formatting(formatting));
    }
    validate(schema, input)
}

/// Run the full pipeline on any supported raw input (JSON text, bytes, a
/// `serde_json::Value`, a file path, …).
pub fn validate_input<I: RecordInput + ?Sized>(
    schema: &Arc<RecordSchema>,
    input: &I,
) -> Result<RecordInstance, ValidationReport> {
    let map = input.to_input_map()?;
    validate_and_construct(schema, &map)
}

/// Value phase only. Precondition: [`check_formatting`] already passed for
/// this schema and input.
///
/// Walks the fields in declaration order, resolves each value from the flat
/// input mapping, cross-checks validator and field types, and invokes the
/// validator. Failures never stop the walk; every defect is accumulated and
/// reported together, in declaration order. Record-typed fields recurse into
/// their own schema against the same mapping and attach the nested instance,
/// with nested defects flattened into the same report.
pub fn validate(
    schema: &Arc<RecordSchema>,
    input: &Map<String, Value>,
) -> Result<RecordInstance, ValidationReport> {
    let mut defects = Vec::new();
    let instance = validate_fields(schema, input, &mut defects);
    if defects.is_empty() {
        Ok(instance)
    } else {
        Err(ValidationReport::validation(defects))
    }
}

fn validate_fields(
    schema: &Arc<RecordSchema>,
    input: &Map<String, Value>,
    defects: &mut Vec<Defect>,
) -> RecordInstance {
    let mut instance = RecordInstance::new(Arc::clone(schema));

    for (index, field) in schema.fields().iter().enumerate() {
        if let Some(nested) = field.declared().as_record() {
            let before = defects.len();
            let nested_instance = validate_fields(nested, input, defects);
            if defects.len() == before {
                instance.assign(index, FieldValue::Record(nested_instance));
            }
            continue;
        }

        // Missing keys resolve to null: key *declarations* are enforced by
        // the formatting phase, value presence is the validator's business.
        let value = input
            .get(field.resolve_key())
            .cloned()
            .unwrap_or(Value::Null);

        let Some(validator) = field.validator() else {
            // Unreachable once formatting has passed; the slot stays empty.
            continue;
        };

        if let Some(validator_type) = validator.declared_type() {
            if field.declared().origin() != Some(validator_type) {
                defects.push(Defect {
                    code: DefectCode::ValidatorTypeMismatch {
                        field_type: field.declared().to_string(),
                        validator_type: validator_type.to_string(),
                    },
                    field: Some(field.name().to_string()),
                    message: format!(
                        "Field type: {} does not match custom AttrValidator type: {}",
                        field.declared(),
                        validator_type
                    ),
                    received: None,
                    expected: None,
                });
                continue;
            }
        }

        match validator.check(&value, field.name()) {
            Ok(()) => instance.assign(index, FieldValue::Value(value)),
            Err(failure) => defects.push(Defect::invalid_value(
                field.name(),
                failure.message,
                &value,
                failure.expected,
            )),
        }
    }

    instance
}
