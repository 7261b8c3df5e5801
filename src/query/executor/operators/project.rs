// Projection Operator Implementation
//
// This module implements the projection operator, which selects, orders and
// renames columns.

use std::sync::Arc;

use log::debug;

use crate::catalog::{CatalogError, Schema};
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::{close_children, ensure_open, open_children, Operator};
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;

/// Output layout derived from one input schema
struct DerivedLayout {
    input: Arc<Schema>,
    output: Arc<Schema>,
    ordinals: Vec<usize>,
}

/// Projection operator that rebinds rows to a schema of renamed columns
pub struct Projection {
    /// The input operator
    input: Box<dyn Operator>,
    /// `(from, to)` column name pairs in output order
    columns: Vec<(String, String)>,
    /// Layout for the most recently seen input schema
    layout: Option<DerivedLayout>,
    /// Whether the operator is open
    opened: bool,
}

impl Projection {
    pub fn new(input: Box<dyn Operator>, columns: Vec<(String, String)>) -> Self {
        Projection {
            input,
            columns,
            layout: None,
            opened: false,
        }
    }

    /// Resolve the output layout for `schema`, reusing the cached one when possible
    fn layout_for(&mut self, schema: &Arc<Schema>) -> QueryResult<&DerivedLayout> {
        let layout = match self.layout.take() {
            Some(layout) if Arc::ptr_eq(&layout.input, schema) => layout,
            _ => self.derive_layout(schema)?,
        };
        Ok(self.layout.insert(layout))
    }

    fn derive_layout(&self, schema: &Arc<Schema>) -> QueryResult<DerivedLayout> {
        let mut columns = Vec::with_capacity(self.columns.len());
        let mut ordinals = Vec::with_capacity(self.columns.len());
        for (from, to) in &self.columns {
            let (ordinal, column) = schema
                .column_by_name(from)
                .ok_or_else(|| CatalogError::ColumnNotFound(from.clone()))?;
            ordinals.push(ordinal);
            columns.push(column.renamed(to.clone()));
        }
        Ok(DerivedLayout {
            input: Arc::clone(schema),
            output: Arc::new(Schema::new(schema.table_name(), columns)),
            ordinals,
        })
    }
}

impl Operator for Projection {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        open_children(&mut [&mut self.input], ctx)?;
        debug!("Opened projection of {} columns", self.columns.len());
        self.opened = true;
        Ok(())
    }

    /// Get the next row with projected columns
    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.opened, self.name())?;

        let Some(row) = self.input.next()? else {
            return Ok(None);
        };
        let layout = self.layout_for(row.schema())?;
        let values = layout
            .ordinals
            .iter()
            .map(|&ordinal| {
                row.value(ordinal).cloned().ok_or_else(|| {
                    let name = layout.input.columns()[ordinal].name();
                    CatalogError::ColumnNotFound(name.to_string()).into()
                })
            })
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Some(Row::new(Arc::clone(&layout.output), values)))
    }

    fn close(&mut self) -> QueryResult<()> {
        self.opened = false;
        self.layout = None;
        close_children(&mut [&mut self.input])
    }

    fn name(&self) -> &'static str {
        "Projection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Value;
    use crate::query::executor::operators::testing::*;
    use crate::query::executor::result::QueryError;

    fn pairs(names: &[(&str, &str)]) -> Vec<(String, String)> {
        names
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    #[test]
    fn test_projection_reorders_and_renames() {
        let input = MockOperator::boxed(people("t", &[(1, "a"), (2, "b")]));
        let mut projection = Projection::new(input, pairs(&[("name", "n"), ("id", "id")]));
        projection.open(&empty_context()).unwrap();
        let rows = drain(&mut projection);
        projection.close().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].column_names().collect::<Vec<_>>(), vec!["n", "id"]);
        assert_eq!(
            rows[1].values(),
            &[Value::FixedString("b".to_string()), Value::Int64(2)]
        );
        assert_eq!(rows[0].schema().table_name(), "t");
        // Every output row shares the derived schema
        assert!(Arc::ptr_eq(rows[0].schema(), rows[1].schema()));
    }

    #[test]
    fn test_missing_column() {
        let input = MockOperator::boxed(people("t", &[(1, "a")]));
        let mut projection = Projection::new(input, pairs(&[("age", "age")]));
        projection.open(&empty_context()).unwrap();
        assert!(matches!(
            projection.next(),
            Err(QueryError::Catalog(CatalogError::ColumnNotFound(name))) if name == "age"
        ));
    }

    #[test]
    fn test_short_row_is_an_error() {
        let schema = people("t", &[(1, "a")])[0].schema().clone();
        let short = Row::new(schema, vec![Value::Int64(1)]);
        let mut projection = Projection::new(MockOperator::boxed(vec![short]), pairs(&[("name", "name")]));
        projection.open(&empty_context()).unwrap();
        assert!(matches!(
            projection.next(),
            Err(QueryError::Catalog(CatalogError::ColumnNotFound(name))) if name == "name"
        ));
    }
}
