//! # recval — non-blocking record validation
//!
//! `recval` validates an untrusted, loosely-typed mapping of string keys to
//! arbitrary values against a statically declared record schema. The result
//! is either a fully populated, type-checked record instance or an
//! aggregated report of **every** violation found — never just the first
//! one — so an API boundary can hand users the complete list of input
//! problems in a single response.
//!
//! Two defect phases are kept strictly apart: schema *formatting* defects
//! (a missing validator or input key — programming errors to fix at
//! development time) and input *validation* defects (bad values — meant for
//! the caller to surface). Formatting is checked to completion first; value
//! validation only runs on a clean schema.
//!
//! ## Quick Start
//!
//! ```rust
//! let schema = recval::record! { "User" {
//!     name: Str => recval::string(),
//!     age: Int as "years" => recval::int().nullable(),
//! }};
//!
//! let data = serde_json::json!({"name": "Alex", "years": 30});
//! let user = recval::validate_input(&schema, &data).unwrap();
//! assert_eq!(user.export()["name"], serde_json::json!("Alex"));
//! assert_eq!(user.export()["age"], serde_json::json!(30));
//! ```
//!
//! ## Aggregated reports
//!
//! ```rust
//! use recval::error::ReportKind;
//!
//! let schema = recval::record! { "Point" {
//!     x: Int => recval::int(),
//!     y: Int => recval::int(),
//! }};
//!
//! let bad = serde_json::json!({"x": "a", "y": true});
//! let report = recval::validate_input(&schema, &bad).unwrap_err();
//! assert_eq!(report.kind, ReportKind::Validation);
//! assert_eq!(report.len(), 2);
//! ```

pub mod engine;
pub mod error;
pub mod format;
pub mod formatting;
pub mod input;
pub mod instance;
mod macros;
pub mod schema;
pub mod validators;

pub use crate::engine::{validate, validate_and_construct, validate_input};
pub use crate::formatting::check_formatting;

use crate::schema::TypeTag;
use crate::validators::{CheckFailure, Custom, TypeCheck};

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Start building a record schema.
pub fn record(name: impl Into<String>) -> schema::SchemaBuilder {
    schema::RecordSchema::builder(name)
}

/// Validator accepting integer values.
pub fn int() -> TypeCheck {
    TypeCheck::new(TypeTag::Int)
}

/// Validator accepting any numeric value.
pub fn float() -> TypeCheck {
    TypeCheck::new(TypeTag::Float)
}

/// Validator accepting string values.
pub fn string() -> TypeCheck {
    TypeCheck::new(TypeTag::Str)
}

/// Validator accepting boolean values.
pub fn boolean() -> TypeCheck {
    TypeCheck::new(TypeTag::Bool)
}

/// Validator accepting object (mapping) values.
pub fn mapping() -> TypeCheck {
    TypeCheck::new(TypeTag::Map)
}

/// Validator accepting array values.
pub fn list() -> TypeCheck {
    TypeCheck::new(TypeTag::List)
}

/// Validator backed by a custom check function.
///
/// The function receives the value and the field name and returns
/// `Ok(())` or a [`CheckFailure`]. Declares no type unless
/// [`with_declared_type`](crate::validators::Custom::with_declared_type)
/// is chained.
///
/// ```
/// use recval::validators::{AttrValidator, CheckFailure};
///
/// let non_empty = recval::custom(|value, field| match value.as_str() {
///     Some(s) if !s.is_empty() => Ok(()),
///     _ => Err(CheckFailure {
///         message: format!("Field: {} must be a non-empty string", field),
///         expected: None,
///     }),
/// });
/// assert!(non_empty.check(&serde_json::json!("ok"), "name").is_ok());
/// assert!(non_empty.check(&serde_json::json!(""), "name").is_err());
/// ```
pub fn custom<F>(check: F) -> Custom<F>
where
    F: Fn(&serde_json::Value, &str) -> Result<(), CheckFailure> + Send + Sync,
{
    Custom::new(check)
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for working with `recval`.
pub mod prelude {
    pub use crate::engine::{validate, validate_and_construct, validate_input};
    pub use crate::error::{Defect, DefectCode, ReportKind, ValidationReport};
    pub use crate::format::{flatten_report, prettify_report, FlatReport};
    pub use crate::formatting::check_formatting;
    pub use crate::input::RecordInput;
    pub use crate::instance::{FieldValue, RecordInstance};
    pub use crate::schema::{
        ComputedField, DeclaredType, FieldDescriptor, RecordSchema, SchemaBuilder, TypeTag,
    };
    pub use crate::validators::{AttrValidator, CheckFailure, Custom, TypeCheck};
}
