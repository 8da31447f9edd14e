/// Declare a record schema through [`SchemaBuilder`](crate::schema::SchemaBuilder).
///
/// # Syntax
///
/// ```ignore
/// let schema = recval::record! { "SchemaName" {
///     field_name: Tag => validator_expression,
///     renamed_field: Tag as "input_key" => validator_expression,
///     nested_field: record nested_schema,
/// }};
/// ```
///
/// `Tag` is a [`TypeTag`](crate::schema::TypeTag) variant (`Int`, `Float`,
/// `Str`, `Bool`, `Map`, `List`). The optional `as "input_key"` overrides
/// the key the field reads from the input mapping. `record expr` declares a
/// nested-record field from an existing `Arc<RecordSchema>`.
///
/// # Example
///
/// ```
/// let address = recval::record! { "Address" {
///     city: Str => recval::string(),
///     zip: Str as "postal_code" => recval::string(),
/// }};
///
/// let user = recval::record! { "User" {
///     name: Str => recval::string(),
///     address: record address,
/// }};
///
/// assert_eq!(user.fields().len(), 2);
/// assert!(user.fields()[1].declared().is_record());
/// ```
#[macro_export]
macro_rules! record {
    ($name:literal { $($fields:tt)* }) => {{
        let __recval_builder = $crate::schema::RecordSchema::builder($name);
        $crate::__record_fields!(__recval_builder; $($fields)*).build()
    }};
}

/// Recursive field muncher for [`record!`]. Not public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __record_fields {
    ($builder:expr;) => { $builder };

    ($builder:expr; $field:ident : record $schema:expr, $($rest:tt)*) => {
        $crate::__record_fields!(
            $builder.nested(stringify!($field), ::std::sync::Arc::clone(&$schema));
            $($rest)*
        )
    };
    ($builder:expr; $field:ident : record $schema:expr) => {
        $builder.nested(stringify!($field), ::std::sync::Arc::clone(&$schema))
    };

    ($builder:expr; $field:ident : $tag:ident as $key:literal => $validator:expr, $($rest:tt)*) => {
        $crate::__record_fields!(
            $builder.push(
                $crate::schema::FieldDescriptor::new(
                    stringify!($field),
                    $crate::schema::DeclaredType::Scalar($crate::schema::TypeTag::$tag),
                )
                .with_validator($validator)
                .with_input_field($key),
            );
            $($rest)*
        )
    };
    ($builder:expr; $field:ident : $tag:ident as $key:literal => $validator:expr) => {
        $builder.push(
            $crate::schema::FieldDescriptor::new(
                stringify!($field),
                $crate::schema::DeclaredType::Scalar($crate::schema::TypeTag::$tag),
            )
            .with_validator($validator)
            .with_input_field($key),
        )
    };

    ($builder:expr; $field:ident : $tag:ident => $validator:expr, $($rest:tt)*) => {
        $crate::__record_fields!(
            $builder.push(
                $crate::schema::FieldDescriptor::new(
                    stringify!($field),
                    $crate::schema::DeclaredType::Scalar($crate::schema::TypeTag::$tag),
                )
                .with_validator($validator),
            );
            $($rest)*
        )
    };
    ($builder:expr; $field:ident : $tag:ident => $validator:expr) => {
        $builder.push(
            $crate::schema::FieldDescriptor::new(
                stringify!($field),
                $crate::schema::DeclaredType::Scalar($crate::schema::TypeTag::$tag),
            )
            .with_validator($validator),
        )
    };
}
