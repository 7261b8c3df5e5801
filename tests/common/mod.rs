#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use leafdb::{Catalog, Column, ColumnType, Database, Row, Schema, Value};
use rand::Rng;

/// T(Int64 id, FixedString(1) name)
pub fn people_schema(table: &str) -> Schema {
    Schema::new(
        table,
        vec![Column::new("id", ColumnType::Int64), Column::fixed_string("name", 1)],
    )
}

/// In-memory database holding the given schemas
pub fn memory_db(schemas: Vec<Schema>) -> Result<Database> {
    Ok(Database::in_memory(Catalog::from_schemas(schemas)?))
}

/// Write one schema file per `(table, body)` into `dir`
pub fn write_schema_files(dir: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (table, body) in files {
        fs::write(dir.join(table), body)?;
    }
    Ok(())
}

/// Values of `column` across `rows`, in order
pub fn column(rows: &[Row], column: &str) -> Vec<Value> {
    rows.iter().filter_map(|row| row.get(column).cloned()).collect()
}

pub fn text(s: &str) -> Value {
    Value::FixedString(s.to_string())
}

/// Random single-letter names
pub fn random_names(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')).to_string())
        .collect()
}
