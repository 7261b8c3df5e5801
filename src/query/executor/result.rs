// Query Result Implementation
//
// Error types raised while executing a query. Every layer keeps its own error
// enum; QueryError unifies them for callers.

use thiserror::Error;

use crate::catalog::{CatalogError, ColumnType};
use crate::codec::CodecError;
use crate::query::compiler::CompileError;
use crate::query::parser::ParseError;
use crate::storage::StorageError;

/// Errors raised by operators and the expression evaluator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("Operator {0} used before open")]
    NotOpen(&'static str),

    #[error("Cannot store {value} in column {column} of type {expected}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        value: String,
    },

    #[error("Value {value} is out of range for column {column} of type {column_type}")]
    ValueOutOfRange {
        column: String,
        column_type: ColumnType,
        value: String,
    },

    #[error("Table {table} expects {expected} values, got {actual}")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Column {column} of {table} has type {column_type} and cannot be a primary key")]
    InvalidPrimaryKey {
        table: String,
        column: String,
        column_type: ColumnType,
    },

    #[error("A comparison cannot be used as a value")]
    NotScalar,
}

/// Any error a query can fail with
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
