// Database facade
//
// Owns the catalog and the store and runs SQL text against them.

use std::sync::Arc;

use log::info;

use crate::catalog::{load_dir, Catalog};
use crate::query::executor::context::ExecutionContext;
use crate::query::executor::engine::ExecutionEngine;
use crate::query::executor::result::QueryResult;
use crate::query::executor::row::Row;
use crate::query::parser::Statement;
use crate::storage::{FileStorage, FileStorageOptions, MemoryStorage, Storage};

use super::config::DatabaseConfig;

pub struct Database {
    engine: ExecutionEngine,
}

impl Database {
    /// Load the catalog and open the store described by `config`
    pub fn open(config: &DatabaseConfig) -> QueryResult<Self> {
        let catalog = match &config.schema_dir {
            Some(dir) => load_dir(dir)?,
            None => Catalog::new(),
        };

        let storage: Arc<dyn Storage> = match &config.data_path {
            Some(path) => {
                let options = FileStorageOptions {
                    sync_writes: config.sync_writes,
                };
                Arc::new(FileStorage::open(path, options)?)
            }
            None => Arc::new(MemoryStorage::new()),
        };

        info!(
            "Opened database with {} tables ({})",
            catalog.len(),
            config
                .data_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "in-memory".to_string())
        );
        Ok(Self::with_storage(catalog, storage))
    }

    /// Database over an in-memory store
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::with_storage(catalog, Arc::new(MemoryStorage::new()))
    }

    pub fn with_storage(catalog: Catalog, storage: Arc<dyn Storage>) -> Self {
        let context = ExecutionContext::new(Arc::new(catalog), storage);
        Database {
            engine: ExecutionEngine::new(context),
        }
    }

    /// Parse, compile and run one statement
    pub fn execute_query(&self, sql: &str) -> QueryResult<Vec<Row>> {
        self.engine.execute_query(sql)
    }

    pub fn execute_statement(&self, statement: &Statement) -> QueryResult<Vec<Row>> {
        self.engine.execute_statement(statement)
    }

    /// Catalog and store shared by every statement
    pub fn context(&self) -> &ExecutionContext {
        self.engine.context()
    }

    pub fn catalog(&self) -> &Catalog {
        self.engine.context().catalog()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.engine.context().storage()
    }
}
