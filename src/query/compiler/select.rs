// SELECT compilation
//
// Builds scan -> join -> selection -> limit -> projection, bottom-up.

use log::debug;

use crate::query::executor::operators::{Join, Limit, Operator, Projection, Selection, TableScan};
use crate::query::parser::ast::{self, SelectColumn, SelectStatement, TableReference};

use super::error::{CompileError, CompileResult};
use super::expression::{compile_expression, describe};

pub fn compile_select(select: &SelectStatement) -> CompileResult<Box<dyn Operator>> {
    let mut root = compile_from(&select.from)?;

    if let Some(predicate) = &select.where_clause {
        root = Box::new(Selection::new(root, compile_expression(predicate)?));
    }

    if let Some(limit) = &select.limit {
        root = Box::new(Limit::new(root, compile_limit(limit)?));
    }

    if let Some(columns) = projection_columns(&select.columns)? {
        debug!("Projecting {} columns", columns.len());
        root = Box::new(Projection::new(root, columns));
    }

    Ok(root)
}

/// One scan per table, combined into a left-deep join chain
fn compile_from(tables: &[TableReference]) -> CompileResult<Box<dyn Operator>> {
    let mut scans = tables.iter().map(|table| {
        let scan = TableScan::new(table.name.as_str());
        let scan = match &table.alias {
            Some(alias) => scan.with_alias(alias.as_str()),
            None => scan,
        };
        Box::new(scan) as Box<dyn Operator>
    });

    let Some(mut root) = scans.next() else {
        return Err(CompileError::UnsupportedStatement("SELECT without FROM".to_string()));
    };
    for scan in scans {
        root = Box::new(Join::new(root, scan));
    }
    Ok(root)
}

fn compile_limit(limit: &ast::Expression) -> CompileResult<u64> {
    match limit {
        ast::Expression::Literal(ast::Literal::Integer(n)) => {
            u64::try_from(*n).map_err(|_| CompileError::InvalidLimit(n.to_string()))
        }
        ast::Expression::UnaryOp {
            op: ast::Operator::Minus,
            expr,
        } => Err(CompileError::InvalidLimit(format!("-{}", describe(expr)))),
        other => Err(CompileError::InvalidLimit(describe(other))),
    }
}

/// `None` when any column is `*`
fn projection_columns(columns: &[SelectColumn]) -> CompileResult<Option<Vec<(String, String)>>> {
    if columns.iter().any(|c| matches!(c, SelectColumn::Wildcard)) {
        return Ok(None);
    }

    let mut mapping = Vec::with_capacity(columns.len());
    for column in columns {
        match column {
            SelectColumn::Column { column, alias } => {
                let from = column.to_string();
                let to = alias.clone().unwrap_or_else(|| from.clone());
                mapping.push((from, to));
            }
            SelectColumn::Expression { expr, .. } => {
                return Err(CompileError::UnsupportedExpression(describe(expr)));
            }
            SelectColumn::Wildcard => {}
        }
    }
    Ok(Some(mapping))
}
