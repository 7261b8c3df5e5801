use log::debug;

use crate::query::executor::context::ExecutionContext;
use crate::query::executor::operators::{close_children, ensure_open, open_children, Operator};
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;

/// Forwards at most `limit` rows, then stops pulling from its input
pub struct Limit {
    input: Box<dyn Operator>,
    limit: u64,
    returned: u64,
    opened: bool,
}

impl Limit {
    pub fn new(input: Box<dyn Operator>, limit: u64) -> Self {
        Limit {
            input,
            limit,
            returned: 0,
            opened: false,
        }
    }
}

impl Operator for Limit {
    fn open(&mut self, ctx: &ExecutionContext) -> QueryResult<()> {
        open_children(&mut [&mut self.input], ctx)?;
        debug!("Opened limit {}", self.limit);
        self.returned = 0;
        self.opened = true;
        Ok(())
    }

    fn next(&mut self) -> QueryResult<Option<Row>> {
        ensure_open(self.opened, self.name())?;
        if self.returned >= self.limit {
            return Ok(None);
        }
        let row = self.input.next()?;
        if row.is_some() {
            self.returned += 1;
        }
        Ok(row)
    }

    fn close(&mut self) -> QueryResult<()> {
        self.opened = false;
        close_children(&mut [&mut self.input])
    }

    fn name(&self) -> &'static str {
        "Limit"
    }
}
