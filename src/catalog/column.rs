// Column Management Module
//
// This module defines the Column type and the closed set of column types a
// table can declare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CatalogError, CatalogResult};

/// Data types a column can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    FixedString,
    Date,
}

impl ColumnType {
    /// Name used by schema files and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int32 => "Int32",
            ColumnType::Int64 => "Int64",
            ColumnType::UInt32 => "UInt32",
            ColumnType::UInt64 => "UInt64",
            ColumnType::FixedString => "FixedString",
            ColumnType::Date => "Date",
        }
    }

    /// Width of the on-disk field, `None` when the column declares it
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            ColumnType::Int32 | ColumnType::UInt32 => Some(4),
            ColumnType::Int64 | ColumnType::UInt64 | ColumnType::Date => Some(8),
            ColumnType::FixedString => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::Int32 | ColumnType::Int64 | ColumnType::UInt32 | ColumnType::UInt64
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Int32" => Ok(ColumnType::Int32),
            "Int64" => Ok(ColumnType::Int64),
            "UInt32" => Ok(ColumnType::UInt32),
            "UInt64" => Ok(ColumnType::UInt64),
            "FixedString" => Ok(ColumnType::FixedString),
            "Date" => Ok(ColumnType::Date),
            other => Err(CatalogError::InvalidSchema(format!("Unknown column type: {}", other))),
        }
    }
}

/// Represents a column in a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    name: String,
    /// Column data type
    column_type: ColumnType,
    /// Declared byte length, only meaningful for FixedString
    fixed_length: Option<usize>,
}

impl Column {
    /// Create a column of a fixed-width type
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type,
            fixed_length: None,
        }
    }

    /// Create a FixedString column of `length` bytes
    pub fn fixed_string(name: impl Into<String>, length: usize) -> Self {
        Column {
            name: name.into(),
            column_type: ColumnType::FixedString,
            fixed_length: Some(length),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn fixed_length(&self) -> Option<usize> {
        self.fixed_length
    }

    /// Number of bytes this column occupies in an encoded row
    pub fn width(&self) -> Option<usize> {
        match self.column_type {
            ColumnType::FixedString => self.fixed_length,
            other => other.fixed_width(),
        }
    }

    /// Copy of this column under another name
    pub fn renamed(&self, name: impl Into<String>) -> Column {
        Column {
            name: name.into(),
            column_type: self.column_type,
            fixed_length: self.fixed_length,
        }
    }

    /// Parse one schema-file line: `<Type> <name> [<length>]`
    pub fn parse_line(line: &str) -> CatalogResult<Column> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [type_name, name] => {
                let column_type: ColumnType = type_name.parse()?;
                if column_type == ColumnType::FixedString {
                    return Err(CatalogError::InvalidSchema(format!(
                        "FixedString column {} needs a length",
                        name
                    )));
                }
                Ok(Column::new(*name, column_type))
            }
            [type_name, name, length] => {
                let column_type: ColumnType = type_name.parse()?;
                if column_type != ColumnType::FixedString {
                    return Err(CatalogError::InvalidSchema(format!(
                        "Only FixedString columns take a length, found one on {} {}",
                        type_name, name
                    )));
                }
                let length = length.parse::<usize>().map_err(|e| {
                    CatalogError::InvalidSchema(format!("Invalid length '{}' for {}: {}", length, name, e))
                })?;
                Ok(Column::fixed_string(*name, length))
            }
            _ => Err(CatalogError::InvalidSchema(format!("Malformed column line: '{}'", line))),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column_type, self.name)?;
        if let (ColumnType::FixedString, Some(length)) = (self.column_type, self.fixed_length) {
            write!(f, " {}", length)?;
        }
        Ok(())
    }
}
