use thiserror::Error;

use crate::catalog::ColumnType;

/// Errors raised while encoding or decoding rows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Buffer holds {actual} bytes but the row needs {expected}")]
    TruncatedBuffer { expected: usize, actual: usize },

    #[error("Length mismatch for {context}: expected {expected}, found {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Value of column {column} does not fit in {width} bytes")]
    FieldOverflow { column: String, width: usize },

    #[error("Malformed varint in column {0}")]
    MalformedVarint(String),

    #[error("Column {column} has type {expected} but the value is {actual}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error("Column {0} does not hold valid UTF-8")]
    InvalidUtf8(String),

    #[error("FixedString column {0} has no declared length")]
    MissingFixedLength(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
