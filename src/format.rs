use std::collections::HashMap;

use crate::error::{format_value_short, ValidationReport};

/// Flat report structure, useful for form validation.
///
/// - `record_errors`: defects with no field context (e.g. unparsable input)
/// - `field_errors`: defect messages grouped by field name
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct FlatReport {
    pub record_errors: Vec<String>,
    pub field_errors: HashMap<String, Vec<String>>,
}

/// Flatten a [`ValidationReport`] into a simple field-keyed structure.
///
/// # Example
/// ```
/// use recval::error::ValidationReport;
/// use recval::format::flatten_report;
///
/// let report = ValidationReport::validation(vec![]); // empty for demo
/// let flat = flatten_report(&report);
/// assert!(flat.record_errors.is_empty());
/// ```
pub fn flatten_report(report: &ValidationReport) -> FlatReport {
    let mut record_errors = Vec::new();
    let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();

    for defect in &report.defects {
        match &defect.field {
            Some(field) => field_errors
                .entry(field.clone())
                .or_default()
                .push(defect.message.clone()),
            None => record_errors.push(defect.message.clone()),
        }
    }

    FlatReport {
        record_errors,
        field_errors,
    }
}

/// Format a [`ValidationReport`] into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ Field: age raised ValidationError. Value: 'x' is not of type: <int>
///   → field age, received "x", expected <int>
/// ```
pub fn prettify_report(report: &ValidationReport) -> String {
    let mut lines = Vec::new();

    for defect in &report.defects {
        lines.push(format!("✖ {}", defect.message));
        let mut parts = Vec::new();
        if let Some(field) = &defect.field {
            parts.push(format!("field {}", field));
        }
        if let Some(val) = &defect.received {
            parts.push(format!("received {}", format_value_short(val)));
        }
        if let Some(expected) = defect.expected {
            parts.push(format!("expected {}", expected));
        }
        if !parts.is_empty() {
            lines.push(format!("  → {}", parts.join(", ")));
        }
    }

    lines.join("\n")
}
