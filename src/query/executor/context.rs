use std::sync::Arc;

use crate::catalog::Catalog;
use crate::storage::Storage;

/// Catalog and storage handle shared by every operator of one query.
///
/// Built outside the engine and injected; operators only read through it.
#[derive(Clone)]
pub struct ExecutionContext {
    catalog: Arc<Catalog>,
    storage: Arc<dyn Storage>,
}

impl ExecutionContext {
    pub fn new(catalog: Arc<Catalog>, storage: Arc<dyn Storage>) -> Self {
        ExecutionContext { catalog, storage }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }
}
