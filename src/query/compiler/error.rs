use thiserror::Error;

/// Errors raised while turning a statement into an operator tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("Unsupported literal: {0}")]
    UnsupportedLiteral(String),

    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("Invalid LIMIT: {0}")]
    InvalidLimit(String),
}

pub type CompileResult<T> = Result<T, CompileError>;
