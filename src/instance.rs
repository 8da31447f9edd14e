use std::sync::Arc;

use serde_json::{Map, Value};

use crate::schema::RecordSchema;

/// A single slot value held by a record instance.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Leaf data, stored as supplied.
    Value(Value),
    /// An attached nested record instance.
    Record(RecordInstance),
    /// A sequence of slot values; nests arbitrarily.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Recursive conversion back to plain JSON: nested instances become
    /// objects, lists are exported element-wise, leaves pass through.
    pub fn export(&self) -> Value {
        match self {
            FieldValue::Value(value) => value.clone(),
            FieldValue::Record(instance) => Value::Object(instance.export()),
            FieldValue::List(items) => Value::Array(items.iter().map(FieldValue::export).collect()),
        }
    }
}

/// A value holder for one instance of a record schema.
///
/// Created by the validation engine, which assigns fields one by one as each
/// passes. Instances are never exposed partially: the engine either returns
/// a fully assigned instance or discards it and returns the aggregated
/// report.
#[derive(Debug, Clone)]
pub struct RecordInstance {
    schema: Arc<RecordSchema>,
    slots: Vec<Option<FieldValue>>,
}

impl RecordInstance {
    pub(crate) fn new(schema: Arc<RecordSchema>) -> Self {
        let slots = vec![None; schema.fields().len()];
        Self { schema, slots }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub(crate) fn assign(&mut self, index: usize, value: FieldValue) {
        self.slots[index] = Some(value);
    }

    /// Read a field slot by name. `None` for unknown names and unassigned
    /// slots alike.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let index = self.schema.position(name)?;
        self.slots[index].as_ref()
    }

    /// Overwrite a field slot by name. Returns `false` when the schema
    /// declares no such field.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.schema.position(name) {
            Some(index) => {
                self.slots[index] = Some(value);
                true
            }
            None => false,
        }
    }

    /// Convert this instance back into a plain mapping.
    ///
    /// Covers every declared data field plus every computed member of the
    /// schema; nested instances and sequences are exported recursively.
    /// Unassigned slots export as null. The key set is defined; key order is
    /// not.
    pub fn export(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for (field, slot) in self.schema.fields().iter().zip(&self.slots) {
            let value = match slot {
                Some(held) => held.export(),
                None => Value::Null,
            };
            out.insert(field.name().to_string(), value);
        }
        for computed in self.schema.computed() {
            out.insert(computed.name().to_string(), computed.evaluate(self).export());
        }
        out
    }
}
