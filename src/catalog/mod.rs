//! Catalog Management Module
//!
//! The catalog maps table names to their schemas. It is populated once, before
//! the first query, and is read-only afterwards.

pub mod column;
pub mod error;
pub mod loader;
pub mod schema;
pub mod value;

pub use self::column::{Column, ColumnType};
pub use self::error::{CatalogError, CatalogResult};
pub use self::loader::load_dir;
pub use self::schema::Schema;
pub use self::value::{Date, Value};

use std::collections::BTreeMap;
use std::sync::Arc;

/// Table name to schema mapping
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<String, Arc<Schema>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a set of schemas
    pub fn from_schemas(schemas: impl IntoIterator<Item = Schema>) -> CatalogResult<Self> {
        let mut catalog = Catalog::new();
        for schema in schemas {
            catalog.add_table(schema)?;
        }
        Ok(catalog)
    }

    /// Register a table, validating its schema
    pub fn add_table(&mut self, schema: Schema) -> CatalogResult<()> {
        schema.validate()?;
        if self.tables.contains_key(schema.table_name()) {
            return Err(CatalogError::DuplicateTable(schema.table_name().to_string()));
        }
        self.tables.insert(schema.table_name().to_string(), Arc::new(schema));
        Ok(())
    }

    /// Look up a table's schema
    pub fn get_table(&self, table_name: &str) -> CatalogResult<Arc<Schema>> {
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownTable(table_name.to_string()))
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    /// Table names in ascending order
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> Schema {
        Schema::new(name, vec![Column::new("id", ColumnType::Int64)])
    }

    #[test]
    fn test_add_and_get_table() {
        let mut catalog = Catalog::new();
        catalog.add_table(table("b")).unwrap();
        catalog.add_table(table("a")).unwrap();

        assert!(catalog.table_exists("a"));
        assert_eq!(catalog.get_table("b").unwrap().table_name(), "b");
        assert_eq!(catalog.table_names(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_unknown_and_duplicate_tables() {
        let mut catalog = Catalog::from_schemas(vec![table("a")]).unwrap();
        assert!(matches!(catalog.get_table("zzz"), Err(CatalogError::UnknownTable(name)) if name == "zzz"));
        assert!(matches!(catalog.add_table(table("a")), Err(CatalogError::DuplicateTable(_))));
    }
}
