use serde_json::{Map, Value};

use crate::error::{value_type_name, ValidationReport};

/// Trait for types that can supply the input mapping the engine consumes.
///
/// Implemented for JSON strings (`&str`, `String`), raw bytes (`&[u8]`),
/// file paths (`Path`, `PathBuf` — requires the `std` feature),
/// `serde_json::Value` and ready-made `serde_json::Map`s.
///
/// Malformed JSON and non-object roots yield a
/// [`Validation`](crate::error::ReportKind::Validation) report carrying a
/// single field-less parse defect — bad bytes are bad input, not a schema
/// defect.
pub trait RecordInput {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport>;
}

impl RecordInput for Map<String, Value> {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        Ok(self.clone())
    }
}

impl RecordInput for Value {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        match self {
            Value::Object(map) => Ok(map.clone()),
            other => Err(ValidationReport::parse_failure(format!(
                "Expected object input, received {}",
                value_type_name(other)
            ))),
        }
    }
}

impl RecordInput for str {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        let value: Value = serde_json::from_str(self)
            .map_err(|e| ValidationReport::parse_failure(format!("Invalid JSON: {}", e)))?;
        value.to_input_map()
    }
}

impl RecordInput for String {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        self.as_str().to_input_map()
    }
}

impl RecordInput for [u8] {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        let value: Value = serde_json::from_slice(self)
            .map_err(|e| ValidationReport::parse_failure(format!("Invalid JSON: {}", e)))?;
        value.to_input_map()
    }
}

#[cfg(feature = "std")]
impl RecordInput for std::path::Path {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        let content = std::fs::read_to_string(self)
            .map_err(|e| ValidationReport::parse_failure(format!("Failed to read file: {}", e)))?;
        content.as_str().to_input_map()
    }
}

#[cfg(feature = "std")]
impl RecordInput for std::path::PathBuf {
    fn to_input_map(&self) -> Result<Map<String, Value>, ValidationReport> {
        self.as_path().to_input_map()
    }
}
