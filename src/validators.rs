use serde_json::Value;

use crate::error::format_value_quoted;
use crate::schema::TypeTag;

/// Failure signalled by an attribute validator.
///
/// Carries a human-readable message referencing the field name, the
/// offending value and the expected type; the engine attaches the field and
/// value context when it records the defect.
#[derive(Debug, Clone)]
pub struct CheckFailure {
    pub message: String,
    /// The type the validator expected, when it has one.
    pub expected: Option<TypeTag>,
}

/// The pluggable unit a field may declare.
///
/// Implementations inspect a value for a named field and either accept it
/// silently or return a [`CheckFailure`]. A validator may additionally
/// declare the type it is bound to; when it does, the engine cross-checks it
/// against the field's declared type before invoking the validator.
pub trait AttrValidator: Send + Sync {
    fn check(&self, value: &Value, field_name: &str) -> Result<(), CheckFailure>;

    /// The type this validator is bound to, if any. `None` skips the
    /// engine's type cross-check for the field.
    fn declared_type(&self) -> Option<TypeTag> {
        None
    }
}

/// Leaf validator that accepts values of exactly one type.
///
/// Created via the crate-root constructors ([`recval::int()`](crate::int),
/// [`recval::string()`](crate::string), …).
///
/// # Example
/// ```
/// use recval::validators::AttrValidator;
///
/// let v = recval::int();
/// assert!(v.check(&serde_json::json!(3), "age").is_ok());
/// assert!(v.check(&serde_json::json!("x"), "age").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeCheck {
    tag: TypeTag,
    nullable: bool,
}

impl TypeCheck {
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            nullable: false,
        }
    }

    /// Additionally accept null (and therefore missing) values.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl AttrValidator for TypeCheck {
    fn check(&self, value: &Value, field_name: &str) -> Result<(), CheckFailure> {
        if value.is_null() && self.nullable {
            return Ok(());
        }
        if self.tag.matches(value) {
            return Ok(());
        }
        Err(CheckFailure {
            message: format!(
                "Field: {} raised ValidationError. Value: {} is not of type: {}",
                field_name,
                format_value_quoted(value),
                self.tag
            ),
            expected: Some(self.tag),
        })
    }

    fn declared_type(&self) -> Option<TypeTag> {
        Some(self.tag)
    }
}

/// Validator backed by a closure. Created via [`recval::custom()`](crate::custom).
///
/// Declares no type unless [`with_declared_type`](Self::with_declared_type)
/// is used, in which case the engine's cross-check applies.
pub struct Custom<F> {
    check: F,
    declared: Option<TypeTag>,
}

impl<F> Custom<F>
where
    F: Fn(&Value, &str) -> Result<(), CheckFailure> + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self {
            check,
            declared: None,
        }
    }

    /// Bind this validator to a type, opting in to the cross-check.
    pub fn with_declared_type(mut self, tag: TypeTag) -> Self {
        self.declared = Some(tag);
        self
    }
}

impl<F> AttrValidator for Custom<F>
where
    F: Fn(&Value, &str) -> Result<(), CheckFailure> + Send + Sync,
{
    fn check(&self, value: &Value, field_name: &str) -> Result<(), CheckFailure> {
        (self.check)(value, field_name)
    }

    fn declared_type(&self) -> Option<TypeTag> {
        self.declared
    }
}
