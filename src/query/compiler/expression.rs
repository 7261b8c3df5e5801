// Expression compilation
//
// Lowers parser expressions into evaluable expressions. Only literals, column
// references and a single comparison between them survive.

use crate::catalog::Value;
use crate::query::executor::expression::{ComparisonOp, Expression};
use crate::query::parser::ast;

use super::error::{CompileError, CompileResult};

/// Compile a WHERE predicate or any other top-level expression
pub fn compile_expression(expr: &ast::Expression) -> CompileResult<Expression> {
    match expr {
        ast::Expression::BinaryOp { left, op, right } => {
            let Some(op) = comparison_op(*op) else {
                return Err(CompileError::UnsupportedExpression(format!("operator {}", op)));
            };
            Ok(Expression::comparison(op, compile_operand(left)?, compile_operand(right)?))
        }
        other => compile_operand(other),
    }
}

/// Compile a comparison operand, which must be scalar
fn compile_operand(expr: &ast::Expression) -> CompileResult<Expression> {
    match expr {
        ast::Expression::Column(column) => Ok(Expression::Column(column.to_string())),
        ast::Expression::Literal(_) => compile_literal(expr).map(Expression::Literal),
        ast::Expression::UnaryOp {
            op: ast::Operator::Minus,
            expr: inner,
        } if matches!(inner.as_ref(), ast::Expression::Literal(ast::Literal::Integer(_))) => {
            compile_literal(expr).map(Expression::Literal)
        }
        ast::Expression::BinaryOp { op, .. } if op.is_comparison() => Err(
            CompileError::UnsupportedExpression("comparison used as an operand".to_string()),
        ),
        other => Err(CompileError::UnsupportedExpression(describe(other))),
    }
}

/// Compile a literal, folding a unary minus on an integer
pub fn compile_literal(expr: &ast::Expression) -> CompileResult<Value> {
    match expr {
        ast::Expression::Literal(ast::Literal::Integer(v)) => Ok(Value::Int64(*v)),
        ast::Expression::Literal(ast::Literal::String(s)) => Ok(Value::FixedString(s.clone())),
        ast::Expression::Literal(other) => Err(CompileError::UnsupportedLiteral(format!("{:?}", other))),
        ast::Expression::UnaryOp {
            op: ast::Operator::Minus,
            expr,
        } => match expr.as_ref() {
            ast::Expression::Literal(ast::Literal::Integer(v)) => v
                .checked_neg()
                .map(Value::Int64)
                .ok_or_else(|| CompileError::UnsupportedLiteral(format!("-{}", v))),
            other => Err(CompileError::UnsupportedLiteral(format!("-{}", describe(other)))),
        },
        other => Err(CompileError::UnsupportedLiteral(describe(other))),
    }
}

fn comparison_op(op: ast::Operator) -> Option<ComparisonOp> {
    let op = match op {
        ast::Operator::Equals => ComparisonOp::Eq,
        ast::Operator::NotEquals => ComparisonOp::Ne,
        ast::Operator::GreaterThan => ComparisonOp::Gt,
        ast::Operator::GreaterEquals => ComparisonOp::Ge,
        ast::Operator::LessThan => ComparisonOp::Lt,
        ast::Operator::LessEquals => ComparisonOp::Le,
        _ => return None,
    };
    Some(op)
}

/// Short description of an expression for error messages
pub(crate) fn describe(expr: &ast::Expression) -> String {
    match expr {
        ast::Expression::Literal(literal) => format!("{:?}", literal),
        ast::Expression::Column(column) => column.to_string(),
        ast::Expression::BinaryOp { op, .. } => format!("operator {}", op),
        ast::Expression::UnaryOp { op, .. } => format!("unary {}", op),
        ast::Expression::Function { name, .. } => format!("function {}()", name),
    }
}
