// Query Execution Engine Implementation
//
// Drives operator trees to completion and ties parsing, compilation and
// execution together for callers holding SQL text.

use log::debug;

use crate::query::compiler::compile;
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::Operator;
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;
use crate::query::parser::{parse, Statement};

/// Open `root`, pull every row, then close it.
///
/// `close` runs even when `open` or `next` fails; the first error wins.
pub fn execute(root: &mut dyn Operator, ctx: &ExecutionContext) -> QueryResult<Vec<Row>> {
    let result = open_and_drain(root, ctx);
    let closed = root.close();
    let rows = result?;
    closed?;
    Ok(rows)
}

fn open_and_drain(root: &mut dyn Operator, ctx: &ExecutionContext) -> QueryResult<Vec<Row>> {
    root.open(ctx)?;
    let mut rows = Vec::new();
    while let Some(row) = root.next()? {
        rows.push(row);
    }
    debug!("{} produced {} rows", root.name(), rows.len());
    Ok(rows)
}

/// Executes statements against one catalog and storage
pub struct ExecutionEngine {
    context: ExecutionContext,
}

impl ExecutionEngine {
    pub fn new(context: ExecutionContext) -> Self {
        ExecutionEngine { context }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Compile and run one statement
    pub fn execute_statement(&self, statement: &Statement) -> QueryResult<Vec<Row>> {
        let mut root = compile(statement)?;
        execute(root.as_mut(), &self.context)
    }

    /// Parse, compile and run one SQL statement
    pub fn execute_query(&self, sql: &str) -> QueryResult<Vec<Row>> {
        debug!("Executing query: {}", sql);
        let statement = parse(sql)?;
        self.execute_statement(&statement)
    }
}
