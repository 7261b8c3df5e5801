// Query Executor Module
//
// This module is responsible for executing compiled operator trees and
// producing results. It implements the iterator-based execution model for
// query processing.

pub mod context;
pub mod engine;
pub mod expression;
pub mod format;
pub mod operators;
pub mod result;
pub mod row;

pub use self::context::ExecutionContext;
pub use self::engine::{execute, ExecutionEngine};
pub use self::expression::{ComparisonOp, Expression};
pub use self::format::{prettify, to_json};
pub use self::operators::Operator;
pub use self::result::{ExecutionError, QueryError, QueryResult};
pub use self::row::Row;
