use std::fmt;

use serde_json::Value;

use crate::schema::TypeTag;

/// Defect code — describes what went wrong.
///
/// The first two codes only appear in a [`ReportKind::Formatting`] report,
/// the rest only in a [`ReportKind::Validation`] report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum DefectCode {
    /// A leaf field declares no validator.
    MissingValidator,
    /// A leaf field has no explicit input key and its name is absent from the input mapping.
    MissingInputField,
    /// The field's declared type disagrees with its validator's declared type.
    ValidatorTypeMismatch {
        field_type: String,
        validator_type: String,
    },
    /// The field's validator rejected the supplied value.
    InvalidValue,
    /// The raw input could not be turned into an input mapping.
    Parse,
}

impl DefectCode {
    /// Stable string key for this defect code. Useful for error mapping.
    pub fn key(&self) -> &str {
        match self {
            DefectCode::MissingValidator => "missing_validator",
            DefectCode::MissingInputField => "missing_input_field",
            DefectCode::ValidatorTypeMismatch { .. } => "validator_type_mismatch",
            DefectCode::InvalidValue => "invalid_value",
            DefectCode::Parse => "parse",
        }
    }
}

/// A single structured defect with field context and the offending value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct Defect {
    pub code: DefectCode,
    /// Name of the schema field this defect belongs to. `None` for defects
    /// raised before any field was in scope (e.g. unparsable input).
    pub field: Option<String>,
    pub message: String,
    /// The value that was attempted (if any).
    pub received: Option<Value>,
    /// The type the field's validator expected (if it declared one).
    pub expected: Option<TypeTag>,
}

impl Defect {
    /// A schema-misconfiguration defect found by the formatting checker.
    pub fn formatting(
        code: DefectCode,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            field: Some(field.into()),
            message: message.into(),
            received: None,
            expected: None,
        }
    }

    /// A rejected-value defect raised during the validation phase.
    pub fn invalid_value(
        field: impl Into<String>,
        message: impl Into<String>,
        received: &Value,
        expected: Option<TypeTag>,
    ) -> Self {
        Self {
            code: DefectCode::InvalidValue,
            field: Some(field.into()),
            message: message.into(),
            received: Some(truncate_value(received)),
            expected,
        }
    }

    /// A defect with no field context, raised while reading raw input.
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            code: DefectCode::Parse,
            field: None,
            message: message.into(),
            received: None,
            expected: None,
        }
    }
}

/// Which phase of the pipeline a report comes from.
///
/// The two kinds never mix: formatting is checked to completion first, and
/// only if clean does value validation begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum ReportKind {
    /// The schema itself is misconfigured. A programming error to fix at
    /// development time, not something to surface to end users.
    Formatting,
    /// The input data is invalid. Intended for the caller/user to correct.
    Validation,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Formatting => write!(f, "Formatting Errors"),
            ReportKind::Validation => write!(f, "Validation Errors"),
        }
    }
}

/// Aggregated validation outcome: every defect found in one pass.
///
/// Defects are accumulated (not short-circuited) in field-declaration order,
/// so all problems are reported at once.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct ValidationReport {
    pub kind: ReportKind,
    pub defects: Vec<Defect>,
}

impl ValidationReport {
    /// Wrap formatting-phase defects.
    pub fn formatting(defects: Vec<Defect>) -> Self {
        Self {
            kind: ReportKind::Formatting,
            defects,
        }
    }

    /// Wrap validation-phase defects.
    pub fn validation(defects: Vec<Defect>) -> Self {
        Self {
            kind: ReportKind::Validation,
            defects,
        }
    }

    /// A validation report holding a single field-less parse defect.
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::validation(vec![Defect::parse(message)])
    }

    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.defects.len()
    }

    /// Defect messages in report order.
    pub fn messages(&self) -> Vec<&str> {
        self.defects.iter().map(|d| d.message.as_str()).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for defect in &self.defects {
            writeln!(f)?;
            write!(f, "  {}", defect.message)?;
            if let Some(val) = &defect.received {
                write!(f, ", received {}", format_value_short(val))?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Returns the JSON type name for a value.
pub fn value_type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

/// Format a JSON value for display in defect messages (short form).
pub fn format_value_short(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("Array(len={})", arr.len()),
        Value::Object(obj) => format!("Object(keys={})", obj.len()),
        other => other.to_string(),
    }
}

/// Single-quoted value rendering used inside validator failure messages.
///
/// Strings render bare (no JSON quoting), so `"abc"` becomes `'abc'`.
pub fn format_value_quoted(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("'{}...'", head)
        }
        Value::String(s) => format!("'{}'", s),
        other => format!("'{}'", other),
    }
}

/// Truncate large values to avoid storing huge payloads in defects.
pub(crate) fn truncate_value(value: &Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > 100 => {
            let head: String = s.chars().take(97).collect();
            Value::String(format!("{}...", head))
        }
        Value::Array(arr) if arr.len() > 5 => {
            let mut truncated: Vec<Value> = arr[..5].to_vec();
            truncated.push(Value::String(format!("... ({} more)", arr.len() - 5)));
            Value::Array(truncated)
        }
        _ => value.clone(),
    }
}
