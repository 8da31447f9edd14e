use serde_json::{Map, Value};

use crate::error::{Defect, DefectCode};
use crate::schema::RecordSchema;

/// Walk a record schema and confirm every leaf field carries a validator and
/// an unambiguous input key.
///
/// Record-typed fields are recursed into (against the same flat input
/// mapping) and contribute their own leaf checks, flattened inline at the
/// field's position; they need no validator or input key of their own.
///
/// All defects are collected before returning — never short-circuited on the
/// first one. A non-empty result means the schema itself is misconfigured
/// and value validation must not run.
pub fn check_formatting(schema: &RecordSchema, input: &Map<String, Value>) -> Vec<Defect> {
    let mut defects = Vec::new();
    collect(schema, input, &mut defects);
    defects
}

fn collect(schema: &RecordSchema, input: &Map<String, Value>, out: &mut Vec<Defect>) {
    for field in schema.fields() {
        if let Some(nested) = field.declared().as_record() {
            collect(nested, input, out);
            continue;
        }

        if field.validator().is_none() {
            out.push(Defect::formatting(
                DefectCode::MissingValidator,
                field.name(),
                format!(
                    "Field '{}' has no validator attribute in field metadata",
                    field.name()
                ),
            ));
        }

        // An explicit input key resolves the field even when absent from
        // this particular input; without one the field's own name must be a
        // key of the input mapping.
        if field.input_field().is_none() && !input.contains_key(field.name()) {
            out.push(Defect::formatting(
                DefectCode::MissingInputField,
                field.name(),
                format!(
                    "Field '{}' has no input_field attribute in field metadata \
                     and field '{}' not present in input data.",
                    field.name(),
                    field.name()
                ),
            ));
        }
    }
}
