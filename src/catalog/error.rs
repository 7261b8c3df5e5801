use thiserror::Error;

/// Errors raised while resolving names against the catalog or a row schema
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Table already exists: {0}")]
    DuplicateTable(String),
    #[error("Duplicate column {column} in table {table}")]
    DuplicateColumn { table: String, column: String },
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
