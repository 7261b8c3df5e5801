// Insert Operator Implementation
//
// Writes literal rows into a table when opened. Rows are written one at a
// time; a failure leaves the rows already written in place.

use log::{debug, info};

use crate::catalog::{CatalogError, Column, ColumnType, Date, Schema, Value};
use crate::codec::encode_values;
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::{ensure_open, Operator};
use crate::query::executor::result::{ExecutionError, QueryResult};
use crate::query::executor::row::Row;
use crate::storage::key::row_key;

/// Insert operator holding the literal rows to write
pub struct Insert {
    table_name: String,
    /// Declared column order, empty for schema order
    columns: Vec<String>,
    /// Pending rows, in declared column order
    rows: Vec<Vec<Value>>,
    rows_affected: u64,
    opened: bool,
}

impl Insert {
    pub fn new(table_name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Insert {
            table_name: table_name.into(),
            columns,
            rows,
            rows_affected: 0,
            opened: false,
        }
    }

    /// Number of rows written by the last open
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    /// For each schema column, the position of its value in a declared row
    fn column_positions(&self, schema: &Schema) -> QueryResult<Vec<usize>> {
        if self.columns.is_empty() {
            return Ok((0..schema.column_count()).collect());
        }
        if self.columns.len() != schema.column_count() {
            return Err(ExecutionError::ArityMismatch {
                table: self.table_name.clone(),
                expected: schema.column_count(),
                actual: self.columns.len(),
            }
            .into());
        }

        let mut positions: Vec<Option<usize>> = vec![None; schema.column_count()];
        for (declared, name) in self.columns.iter().enumerate() {
            let (ordinal, _) = schema
                .column_by_name(name)
                .ok_or_else(|| CatalogError::ColumnNotFound(name.clone()))?;
            if positions[ordinal].replace(declared).is_some() {
                return Err(CatalogError::DuplicateColumn {
                    table: self.table_name.clone(),
                    column: name.clone(),
                }
                .into());
            }
        }
        // Same length and no duplicates, so every slot is filled
        Ok(positions.into_iter().flatten().collect())
    }
}

/// Convert a literal to the value stored in `column`
pub fn coerce_literal(column: &Column, value: Value) -> QueryResult<Value> {
    let out_of_range = |value: &dyn std::fmt::Display| ExecutionError::ValueOutOfRange {
        column: column.name().to_string(),
        column_type: column.column_type(),
        value: value.to_string(),
    };
    let mismatch = |value: &Value| ExecutionError::TypeMismatch {
        column: column.name().to_string(),
        expected: column.column_type(),
        value: value.to_string(),
    };

    let coerced = match (column.column_type(), value) {
        (ColumnType::Int32, Value::Int64(v)) => {
            Value::Int32(i32::try_from(v).map_err(|_| out_of_range(&v))?)
        }
        (ColumnType::UInt32, Value::Int64(v)) => {
            Value::UInt32(u32::try_from(v).map_err(|_| out_of_range(&v))?)
        }
        (ColumnType::UInt64, Value::Int64(v)) => {
            Value::UInt64(u64::try_from(v).map_err(|_| out_of_range(&v))?)
        }
        (ColumnType::Date, Value::Int64(v)) => Value::Date(Date::from_timestamp(v)),
        (ColumnType::Date, Value::FixedString(s)) => match Date::parse(&s) {
            Some(date) => Value::Date(date),
            None => return Err(mismatch(&Value::FixedString(s)).into()),
        },
        (column_type, value) if value.column_type() == column_type => value,
        (_, value) => return Err(mismatch(&value).into()),
    };
    Ok(coerced)
}

impl Operator for Insert {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        let schema = ctx.catalog().get_table(&self.table_name)?;
        let positions = self.column_positions(&schema)?;

        let Some(key_column) = schema.columns().first() else {
            return Err(CatalogError::InvalidSchema(format!("Table {} has no columns", self.table_name)).into());
        };
        if !key_column.column_type().is_integer() {
            return Err(ExecutionError::InvalidPrimaryKey {
                table: self.table_name.clone(),
                column: key_column.name().to_string(),
                column_type: key_column.column_type(),
            }
            .into());
        }

        self.rows_affected = 0;
        for literals in &self.rows {
            if literals.len() != positions.len() {
                return Err(ExecutionError::ArityMismatch {
                    table: self.table_name.clone(),
                    expected: positions.len(),
                    actual: literals.len(),
                }
                .into());
            }

            let values = schema
                .columns()
                .iter()
                .zip(&positions)
                .map(|(column, &position)| coerce_literal(column, literals[position].clone()))
                .collect::<QueryResult<Vec<_>>>()?;

            let Some(primary_key) = values.first().and_then(Value::key_component) else {
                return Err(ExecutionError::InvalidPrimaryKey {
                    table: self.table_name.clone(),
                    column: key_column.name().to_string(),
                    column_type: key_column.column_type(),
                }
                .into());
            };
            let bytes = encode_values(&schema, &values)?;
            ctx.storage().put(&row_key(&self.table_name, &primary_key), &bytes)?;
            self.rows_affected += 1;
            debug!("Inserted {} into {}", primary_key, self.table_name);
        }

        info!("Inserted {} rows into {}", self.rows_affected, self.table_name);
        self.opened = true;
        Ok(())
    }

    /// Inserts produce no rows
    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.opened, self.name())?;
        Ok(None)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.opened = false;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Insert"
    }
}
