// Table Scan Operator
//
// This module implements the table scan: a range scan over one table's key
// space, decoding each stored value with the table schema.

use std::sync::Arc;

use log::{debug, trace};

use crate::catalog::Schema;
use crate::codec::decode_row;
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::{ensure_open, Operator};
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;
use crate::storage::key::table_key_range;
use crate::storage::StorageIterator;

/// Scans every row of a table in key order
pub struct TableScan {
    /// Table name to scan
    table_name: String,
    /// Name the rows are exposed under, if different from the table name
    alias: Option<String>,
    /// Schema of the table, loaded during open
    schema: Option<Arc<Schema>>,
    /// Storage cursor, held between open and close
    cursor: Option<Box<dyn StorageIterator>>,
}

impl TableScan {
    pub fn new(table_name: impl Into<String>) -> Self {
        TableScan {
            table_name: table_name.into(),
            alias: None,
            schema: None,
            cursor: None,
        }
    }

    /// Expose the rows under `alias` instead of the table name
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl Operator for TableScan {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        let table = ctx.catalog().get_table(&self.table_name)?;
        let schema = match &self.alias {
            Some(alias) if alias != table.table_name() => {
                Arc::new(Schema::new(alias.clone(), table.columns().to_vec()))
            }
            _ => table,
        };

        let (lower, upper) = table_key_range(&self.table_name);
        self.cursor = Some(ctx.storage().scan(&lower, &upper)?);
        self.schema = Some(schema);
        debug!("Opened scan of {}", self.table_name);
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.cursor.is_some(), self.name())?;
        let (Some(cursor), Some(schema)) = (self.cursor.as_mut(), self.schema.as_ref()) else {
            return Ok(None);
        };

        if !cursor.advance()? {
            return Ok(None);
        }
        let Some(value) = cursor.value() else {
            return Ok(None);
        };
        if let Some(key) = cursor.key() {
            trace!("{} scan at {}", self.table_name, String::from_utf8_lossy(key));
        }
        Ok(Some(decode_row(value, Arc::clone(schema))?))
    }

    fn close(&mut self) -> QueryResult<()> {
        if self.cursor.take().is_some() {
            debug!("Closed scan of {}", self.table_name);
        }
        self.schema = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TableScan"
    }
}
