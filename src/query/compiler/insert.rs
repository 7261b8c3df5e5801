// INSERT compilation

use crate::catalog::Value;
use crate::query::executor::operators::{Insert, Operator};
use crate::query::parser::ast::InsertStatement;

use super::error::CompileResult;
use super::expression::compile_literal;

pub fn compile_insert(insert: &InsertStatement) -> CompileResult<Box<dyn Operator>> {
    let rows = insert
        .values
        .iter()
        .map(|tuple| tuple.iter().map(compile_literal).collect::<CompileResult<Vec<Value>>>())
        .collect::<CompileResult<Vec<_>>>()?;

    Ok(Box::new(Insert::new(
        insert.table_name.as_str(),
        insert.columns.clone(),
        rows,
    )))
}
