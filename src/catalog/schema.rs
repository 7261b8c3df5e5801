// Schema Module
//
// A Schema is the ordered column list of one table. Column order is both the
// encoded byte layout and the ordinal used by name lookup.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnType};
use super::error::{CatalogError, CatalogResult};
use crate::storage::key::KEY_SEPARATOR;

/// Ordered column layout of a table or of a derived row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    table_name: String,
    columns: Vec<Column>,
}

impl Schema {
    /// Create a schema without validating it.
    ///
    /// Derived schemas (joins, projections) may legitimately carry repeated
    /// names; catalog tables go through [`Schema::validate`].
    pub fn new(table_name: impl Into<String>, columns: Vec<Column>) -> Self {
        Schema {
            table_name: table_name.into(),
            columns,
        }
    }

    /// Parse a schema file body, one column per non-empty line
    pub fn parse(table_name: impl Into<String>, text: &str) -> CatalogResult<Self> {
        let columns = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Column::parse_line)
            .collect::<CatalogResult<Vec<_>>>()?;
        let schema = Schema::new(table_name, columns);
        schema.validate()?;
        Ok(schema)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find a column by name, returning its zero-based ordinal
    pub fn column_by_name(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.name() == name)
    }

    /// Total encoded width of a row, `None` if a FixedString lacks a length
    pub fn row_width(&self) -> Option<usize> {
        self.columns.iter().map(Column::width).sum()
    }

    /// Check the constraints a stored table must satisfy
    pub fn validate(&self) -> CatalogResult<()> {
        if self.table_name.is_empty() {
            return Err(CatalogError::InvalidSchema("Table name is empty".to_string()));
        }
        // A separator inside a table name would let one table's key prefix
        // cover another table's keys.
        if self.table_name.bytes().any(|b| b == KEY_SEPARATOR) {
            return Err(CatalogError::InvalidSchema(format!(
                "Table name {} contains the key separator",
                self.table_name
            )));
        }
        if self.columns.is_empty() {
            return Err(CatalogError::InvalidSchema(format!(
                "Table {} has no columns",
                self.table_name
            )));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name().contains('.') {
                return Err(CatalogError::InvalidSchema(format!(
                    "Column name {} may not contain '.'",
                    column.name()
                )));
            }
            if !seen.insert(column.name()) {
                return Err(CatalogError::DuplicateColumn {
                    table: self.table_name.clone(),
                    column: column.name().to_string(),
                });
            }
            if column.column_type() == ColumnType::FixedString && column.fixed_length().is_none() {
                return Err(CatalogError::InvalidSchema(format!(
                    "FixedString column {} has no length",
                    column.name()
                )));
            }
        }
        Ok(())
    }
}

/// Renders the schema-file format accepted by [`Schema::parse`]
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in &self.columns {
            writeln!(f, "{}", column)?;
        }
        Ok(())
    }
}
