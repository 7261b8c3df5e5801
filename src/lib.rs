// leafdb: a small SQL query engine over an ordered key-value store

pub mod catalog;
pub mod codec;
pub mod db;
pub mod query;
pub mod storage;

pub use catalog::{Catalog, Column, ColumnType, Schema, Value};
pub use db::{Database, DatabaseConfig};
pub use query::{ExecutionEngine, QueryError, QueryResult, Row};
pub use storage::{FileStorage, MemoryStorage, Storage};
