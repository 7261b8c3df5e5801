use std::collections::VecDeque;
use std::sync::Arc;

use crate::catalog::{Column, Schema, Value};
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::{ensure_open, Operator};
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;

/// Name of both the result table and its only column
pub const SHOW_TABLES_COLUMN: &str = "tables";

/// Lists catalog table names, one row per table, in ascending order
#[derive(Default)]
pub struct ShowTables {
    names: VecDeque<String>,
    schema: Option<Arc<Schema>>,
}

impl ShowTables {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Operator for ShowTables {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        let names = ctx.catalog().table_names();
        let width = names.iter().map(String::len).max().unwrap_or(0);
        self.schema = Some(Arc::new(Schema::new(
            SHOW_TABLES_COLUMN,
            vec![Column::fixed_string(SHOW_TABLES_COLUMN, width)],
        )));
        self.names = names.into();
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.schema.is_some(), self.name())?;
        let (Some(schema), Some(name)) = (self.schema.as_ref(), self.names.pop_front()) else {
            return Ok(None);
        };
        Ok(Some(Row::new(Arc::clone(schema), vec![Value::FixedString(name)])))
    }

    fn close(&mut self) -> QueryResult<()> {
        self.names.clear();
        self.schema = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ShowTables"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ColumnType};
    use crate::query::executor::operators::testing::drain;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_lists_sorted_names() {
        let schemas = ["orders", "accounts", "items"]
            .iter()
            .map(|name| Schema::new(*name, vec![Column::new("id", ColumnType::Int64)]));
        let catalog = Catalog::from_schemas(schemas).unwrap();
        let ctx = ExecutionContext::new(Arc::new(catalog), Arc::new(MemoryStorage::new()));

        let mut op = ShowTables::new();
        op.open(&ctx).unwrap();
        let rows = drain(&mut op);
        op.close().unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.values()[0].to_string()).collect();
        assert_eq!(names, vec!["accounts", "items", "orders"]);
        assert_eq!(rows[0].schema().columns()[0].fixed_length(), Some(8));
        assert_eq!(rows[0].column_names().collect::<Vec<_>>(), vec![SHOW_TABLES_COLUMN]);
    }

    #[test]
    fn test_empty_catalog() {
        let ctx = ExecutionContext::new(Arc::new(Catalog::new()), Arc::new(MemoryStorage::new()));
        let mut op = ShowTables::new();
        assert!(op.next().is_err());
        op.open(&ctx).unwrap();
        assert!(op.next().unwrap().is_none());
    }
}
