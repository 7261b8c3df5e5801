// Row Module
//
// A row is a list of values bound to the schema that describes them. Rows are
// produced fresh by every read; nothing shares a row's values.

use std::fmt;
use std::sync::Arc;

use crate::catalog::{Schema, Value};

/// One tuple flowing through the operator tree
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Row {
    /// Bind `values` to `schema`, in schema column order
    pub fn new(schema: Arc<Schema>, values: Vec<Value>) -> Self {
        Row { schema, values }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a zero-based ordinal
    pub fn value(&self, ordinal: usize) -> Option<&Value> {
        self.values.get(ordinal)
    }

    /// Value of the named column
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.schema
            .column_by_name(column_name)
            .and_then(|(ordinal, _)| self.values.get(ordinal))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column names in value order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.schema.columns().iter().map(|c| c.name())
    }

    /// The same values under another schema
    pub fn with_schema(self, schema: Arc<Schema>) -> Row {
        Row {
            schema,
            values: self.values,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.column_names().zip(&self.values).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
