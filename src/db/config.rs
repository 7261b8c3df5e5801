use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings used to open a [`Database`](super::Database)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Log file for a persistent store; in-memory when unset
    pub data_path: Option<PathBuf>,
    /// Directory of schema files; empty catalog when unset
    pub schema_dir: Option<PathBuf>,
    /// Flush and sync the log after every write
    pub sync_writes: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            data_path: None,
            schema_dir: None,
            sync_writes: true,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}
