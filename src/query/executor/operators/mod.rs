// Query Operators Module
//
// This module defines the operators used for query execution in the
// iterator-based execution model. A parent pulls rows from its children one
// `next` call at a time.

pub mod filter;
pub mod insert;
pub mod join;
pub mod limit;
pub mod project;
pub mod scan;
pub mod show_tables;

pub use self::filter::Selection;
pub use self::insert::Insert;
pub use self::join::Join;
pub use self::limit::Limit;
pub use self::project::Projection;
pub use self::scan::TableScan;
pub use self::show_tables::ShowTables;

use log::warn;

use crate::query::executor::context::ExecutionContext;
use crate::query::executor::result::{ExecutionError, QueryResult};
use crate::query::executor::row::Row;

/// The Operator trait defines the interface for all query execution operators.
///
/// Lifecycle: `open` once, `next` until it yields `None`, then `close`.
/// `open` opens children before doing its own work. `next` before `open` is
/// an error. `close` may be called at any point, more than once, and closes
/// every child even if one of them fails.
pub trait Operator: Send {
    /// Prepare the operator and its children
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()>;

    /// Get the next row of data from this operator
    fn next(&mut self) -> QueryResult<Option<Row>>;

    /// Release resources held by the operator and its children
    fn close(&mut self) -> QueryResult<()>;

    /// Operator name used in logs and errors
    fn name(&self) -> &'static str;
}

/// Open each child in order, stopping at the first failure
pub fn open_children(children: &mut [&mut Box<dyn Operator>], ctx: &ExecutionContext) -> QueryResult<()> {
    for child in children.iter_mut() {
        child.open(ctx)?;
    }
    Ok(())
}

/// Close every child, reporting the first failure
pub fn close_children(children: &mut [&mut Box<dyn Operator>]) -> QueryResult<()> {
    let mut first_error = None;
    for child in children.iter_mut() {
        if let Err(e) = child.close() {
            warn!("Failed to close {}: {}", child.name(), e);
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Fail with `NotOpen` unless the operator has been opened
pub(crate) fn ensure_open(is_open: bool, name: &'static str) -> QueryResult<()> {
    if is_open {
        Ok(())
    } else {
        Err(ExecutionError::NotOpen(name).into())
    }
}
