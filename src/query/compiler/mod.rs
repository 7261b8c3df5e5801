// Query Compiler Module
//
// Turns parsed statements into executable operator trees. No catalog lookup
// happens here; unknown tables and columns surface when the tree is opened.

pub mod error;
pub mod expression;
pub mod insert;
pub mod select;

pub use self::error::{CompileError, CompileResult};
pub use self::expression::{compile_expression, compile_literal};

use log::debug;

use crate::query::executor::operators::{Operator, ShowTables};
use crate::query::parser::Statement;

/// Compile a statement into the root of an operator tree
pub fn compile(statement: &Statement) -> CompileResult<Box<dyn Operator>> {
    debug!("Compiling {}", statement);
    match statement {
        Statement::Select(select) => select::compile_select(select),
        Statement::Insert(insert) => insert::compile_insert(insert),
        Statement::Show(show) if show.target == "tables" => Ok(Box::new(ShowTables::new())),
        other => Err(CompileError::UnsupportedStatement(other.to_string())),
    }
}
