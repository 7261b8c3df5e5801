// Nested Loop Join Implementation
//
// Inner join of two inputs without a condition. Both inputs are drained when
// the join is opened and the full cross product is buffered in left-major
// order; memory grows with |left| * |right|.

use std::collections::VecDeque;
use std::sync::Arc;

use log::debug;

use crate::catalog::{Column, Schema};
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::{close_children, ensure_open, open_children, Operator};
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;

/// Nested loop (cross) join operator
pub struct Join {
    /// Left input operator
    left: Box<dyn Operator>,
    /// Right input operator
    right: Box<dyn Operator>,
    /// Joined rows not yet returned
    output: VecDeque<Row>,
    /// Whether the operator is open
    opened: bool,
}

impl Join {
    pub fn new(left: Box<dyn Operator>, right: Box<dyn Operator>) -> Self {
        Join {
            left,
            right,
            output: VecDeque::new(),
            opened: false,
        }
    }
}

/// Pull every remaining row from `input`
fn drain_input(input: &mut Box<dyn Operator>) -> QueryResult<Vec<Row>> {
    let mut rows = Vec::new();
    while let Some(row) = input.next()? {
        rows.push(row);
    }
    Ok(rows)
}

/// Name of a column in the joined schema: always `<source_table>.<column>`.
///
/// The left side of a nested join is itself a join, so its columns come out as
/// `(a,b).a.id`.
fn qualified_name(table_name: &str, column: &Column) -> String {
    format!("{}.{}", table_name, column.name())
}

/// Schema of `left` followed by `right`, with qualified column names
pub fn joined_schema(left: &Schema, right: &Schema) -> Schema {
    let columns = [left, right]
        .iter()
        .flat_map(|schema| {
            schema
                .columns()
                .iter()
                .map(move |column| column.renamed(qualified_name(schema.table_name(), column)))
        })
        .collect();
    Schema::new(
        format!("({},{})", left.table_name(), right.table_name()),
        columns,
    )
}

impl Operator for Join {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        open_children(&mut [&mut self.left, &mut self.right], ctx)?;

        let left_rows = drain_input(&mut self.left)?;
        let right_rows = drain_input(&mut self.right)?;

        self.output.clear();
        if let (Some(l), Some(r)) = (left_rows.first(), right_rows.first()) {
            let schema = Arc::new(joined_schema(l.schema(), r.schema()));
            self.output.reserve(left_rows.len() * right_rows.len());
            for left in &left_rows {
                for right in &right_rows {
                    let values = left.values().iter().chain(right.values()).cloned().collect();
                    self.output.push_back(Row::new(Arc::clone(&schema), values));
                }
            }
        }

        debug!(
            "Joined {} x {} rows into {}",
            left_rows.len(),
            right_rows.len(),
            self.output.len()
        );
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.opened, self.name())?;
        Ok(self.output.pop_front())
    }

    fn close(&mut self) -> QueryResult<()> {
        self.opened = false;
        self.output.clear();
        close_children(&mut [&mut self.left, &mut self.right])
    }

    fn name(&self) -> &'static str {
        "Join"
    }
}
