// Selection Operator Implementation
//
// This module implements the selection operator, which forwards only the rows
// satisfying a predicate.

use log::debug;

use crate::query::executor::context::ExecutionContext;
use crate::query::executor::expression::Expression;
use crate::query::executor::operators::{close_children, ensure_open, open_children, Operator};
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;

/// Selection operator that filters rows based on a predicate
pub struct Selection {
    /// The input operator
    input: Box<dyn Operator>,
    /// The predicate to evaluate
    predicate: Expression,
    /// Whether the operator is open
    opened: bool,
}

impl Selection {
    pub fn new(input: Box<dyn Operator>, predicate: Expression) -> Self {
        Selection {
            input,
            predicate,
            opened: false,
        }
    }
}

impl Operator for Selection {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        open_children(&mut [&mut self.input], ctx)?;
        debug!("Opened selection on {}", self.predicate);
        self.opened = true;
        Ok(())
    }

    /// Get the next row that satisfies the predicate
    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.opened, self.name())?;

        while let Some(row) = self.input.next()? {
            if self.predicate.eval_bool(&row)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.opened = false;
        close_children(&mut [&mut self.input])
    }

    fn name(&self) -> &'static str {
        "Selection"
    }
}
