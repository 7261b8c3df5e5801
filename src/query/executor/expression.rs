// Expression Evaluation
//
// Compiled expressions evaluated against a single row. Only literals, column
// references and one level of comparison exist at this stage; the compiler
// rejects everything else.

use std::cmp::Ordering;
use std::fmt;

use crate::catalog::{CatalogError, Value};
use crate::query::executor::result::{ExecutionError, QueryResult};
use crate::query::executor::row::Row;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl ComparisonOp {
    /// Compare two values. Incomparable values satisfy no operator, `Ne` included.
    pub fn apply(self, left: &Value, right: &Value) -> bool {
        let Some(ordering) = left.compare(right) else {
            return false;
        };
        match self {
            ComparisonOp::Eq => ordering == Ordering::Equal,
            ComparisonOp::Ne => ordering != Ordering::Equal,
            ComparisonOp::Gt => ordering == Ordering::Greater,
            ComparisonOp::Ge => ordering != Ordering::Less,
            ComparisonOp::Lt => ordering == Ordering::Less,
            ComparisonOp::Le => ordering != Ordering::Greater,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
        }
    }
}

/// Expression evaluated per row
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Value),
    /// Column looked up by name in the row's schema
    Column(String),
    Comparison {
        op: ComparisonOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(name.into())
    }

    pub fn comparison(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        Expression::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate to a scalar value
    pub fn eval(&self, row: &Row) -> QueryResult<Value> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Column(name) => row
                .get(name)
                .cloned()
                .ok_or_else(|| CatalogError::ColumnNotFound(name.clone()).into()),
            Expression::Comparison { .. } => Err(ExecutionError::NotScalar.into()),
        }
    }

    /// Evaluate as a predicate: the comparison result, or the truthiness of a scalar
    pub fn eval_bool(&self, row: &Row) -> QueryResult<bool> {
        match self {
            Expression::Comparison { op, left, right } => {
                let left = left.eval(row)?;
                let right = right.eval(row)?;
                Ok(op.apply(&left, &right))
            }
            scalar => Ok(scalar.eval(row)?.is_truthy()),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(Value::FixedString(s)) => write!(f, "'{}'", s),
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Column(name) => f.write_str(name),
            Expression::Comparison { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
        }
    }
}
