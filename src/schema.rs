use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::instance::{FieldValue, RecordInstance};
use crate::validators::AttrValidator;

/// Leaf value type a field or validator can declare.
///
/// Displays in angle-bracket form (`<int>`, `<str>`, …) — the form defect
/// messages embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum TypeTag {
    Int,
    Float,
    Str,
    Bool,
    Map,
    List,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Str => "str",
            TypeTag::Bool => "bool",
            TypeTag::Map => "map",
            TypeTag::List => "list",
        }
    }

    /// Whether a JSON value belongs to this type.
    ///
    /// `Int` accepts only integral numbers; `Float` accepts any number.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            TypeTag::Int => value.as_i64().is_some() || value.as_u64().is_some(),
            TypeTag::Float => value.is_number(),
            TypeTag::Str => value.is_string(),
            TypeTag::Bool => value.is_boolean(),
            TypeTag::Map => value.is_object(),
            TypeTag::List => value.is_array(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// The type a field declares.
///
/// Parametrized list types compare by their origin (`TypeTag::List`);
/// record types mark the field as a nested record, validated by recursing
/// into the nested schema rather than by a validator of its own.
#[derive(Clone)]
pub enum DeclaredType {
    Scalar(TypeTag),
    List(Box<DeclaredType>),
    Record(Arc<RecordSchema>),
}

impl DeclaredType {
    /// Origin tag used for validator cross-checks. Record types have none.
    pub fn origin(&self) -> Option<TypeTag> {
        match self {
            DeclaredType::Scalar(tag) => Some(*tag),
            DeclaredType::List(_) => Some(TypeTag::List),
            DeclaredType::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Arc<RecordSchema>> {
        match self {
            DeclaredType::Record(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, DeclaredType::Record(_))
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Scalar(tag) => write!(f, "{}", tag),
            DeclaredType::List(_) => write!(f, "{}", TypeTag::List),
            DeclaredType::Record(schema) => write!(f, "<record {}>", schema.name()),
        }
    }
}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Scalar(tag) => write!(f, "Scalar({:?})", tag),
            DeclaredType::List(inner) => write!(f, "List({:?})", inner),
            DeclaredType::Record(schema) => write!(f, "Record({})", schema.name()),
        }
    }
}

/// Static schema metadata for one record field.
///
/// A leaf field needs a validator and a resolvable input key; a record-typed
/// field needs neither — it is validated by recursing into its own schema.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    declared: DeclaredType,
    validator: Option<Arc<dyn AttrValidator>>,
    input_field: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
            validator: None,
            input_field: None,
        }
    }

    /// Attach the validator this field is checked with.
    pub fn with_validator(mut self, validator: impl AttrValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Read this field from `key` instead of the field's own name.
    pub fn with_input_field(mut self, key: impl Into<String>) -> Self {
        self.input_field = Some(key.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    pub fn validator(&self) -> Option<&Arc<dyn AttrValidator>> {
        self.validator.as_ref()
    }

    pub fn input_field(&self) -> Option<&str> {
        self.input_field.as_deref()
    }

    /// The key this field reads from the input mapping.
    pub fn resolve_key(&self) -> &str {
        self.input_field.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("validator", &self.validator.is_some())
            .field("input_field", &self.input_field)
            .finish()
    }
}

type ComputeFn = dyn Fn(&RecordInstance) -> FieldValue + Send + Sync;

/// An exported-only member computed from a populated instance.
///
/// Computed fields participate in [`RecordInstance::export`] but never in
/// validation.
#[derive(Clone)]
pub struct ComputedField {
    name: String,
    compute: Arc<ComputeFn>,
}

impl ComputedField {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, instance: &RecordInstance) -> FieldValue {
        (self.compute)(instance)
    }
}

impl fmt::Debug for ComputedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComputedField({})", self.name)
    }
}

/// Named, ordered schema of a record type: its field descriptors plus the
/// explicit list of computed export members.
///
/// Built once through [`SchemaBuilder`] (or the [`record!`](crate::record!)
/// macro) and frozen behind `Arc` — immutable thereafter, safe to share
/// across concurrent validation calls.
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    computed: Vec<ComputedField>,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: vec![],
            computed: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn computed(&self) -> &[ComputedField] {
        &self.computed
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("computed", &self.computed)
            .finish()
    }
}

/// Registration API for [`RecordSchema`].
///
/// # Example
/// ```
/// use recval::schema::{DeclaredType, FieldDescriptor, RecordSchema, TypeTag};
///
/// let schema = RecordSchema::builder("User")
///     .field("name", TypeTag::Str, recval::string())
///     .push(
///         FieldDescriptor::new("age", DeclaredType::Scalar(TypeTag::Int))
///             .with_validator(recval::int().nullable())
///             .with_input_field("years"),
///     )
///     .build();
/// assert_eq!(schema.fields().len(), 2);
/// ```
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    computed: Vec<ComputedField>,
}

impl SchemaBuilder {
    /// Add a leaf field with its validator, read from the field's own name.
    pub fn field(
        self,
        name: impl Into<String>,
        tag: TypeTag,
        validator: impl AttrValidator + 'static,
    ) -> Self {
        self.push(FieldDescriptor::new(name, DeclaredType::Scalar(tag)).with_validator(validator))
    }

    /// Add a nested-record field. Needs no validator or input key of its own.
    pub fn nested(self, name: impl Into<String>, schema: Arc<RecordSchema>) -> Self {
        self.push(FieldDescriptor::new(name, DeclaredType::Record(schema)))
    }

    /// Add a fully specified descriptor.
    ///
    /// Declaring a name twice replaces the earlier descriptor in place, so
    /// schemas stay unique by name with positions preserved.
    pub fn push(mut self, descriptor: FieldDescriptor) -> Self {
        match self.fields.iter_mut().find(|f| f.name == descriptor.name) {
            Some(slot) => *slot = descriptor,
            None => self.fields.push(descriptor),
        }
        self
    }

    /// Register a computed export member.
    pub fn computed(
        mut self,
        name: impl Into<String>,
        compute: impl Fn(&RecordInstance) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        self.computed.push(ComputedField {
            name: name.into(),
            compute: Arc::new(compute),
        });
        self
    }

    pub fn build(self) -> Arc<RecordSchema> {
        Arc::new(RecordSchema {
            name: self.name,
            fields: self.fields,
            computed: self.computed,
        })
    }
}
