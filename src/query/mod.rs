// Query Processing Module
//
// SQL text is parsed into statements, compiled into operator trees and then
// executed against a catalog and a store.

pub mod compiler;
pub mod executor;
pub mod parser;

pub use compiler::{compile, CompileError};
pub use executor::engine::ExecutionEngine;
pub use executor::result::{QueryError, QueryResult};
pub use executor::row::Row;
pub use parser::{parse, Parser};
