use anyhow::Result;
use leafdb::query::executor::{prettify, to_json};
use leafdb::{Database, DatabaseConfig, Value};
use serde_json::json;
use tempfile::tempdir;

#[path = "../common/mod.rs"]
mod common;
use common::{column, text, write_schema_files};

#[test]
fn test_persistent_database_reopen() -> Result<()> {
    let dir = tempdir()?;
    let schemas = dir.path().join("schemas");
    std::fs::create_dir(&schemas)?;
    write_schema_files(&schemas, &[("T", "Int64 id\nFixedString name 1\n")])?;

    let config = DatabaseConfig::default()
        .with_schema_dir(&schemas)
        .with_data_path(dir.path().join("leaf.log"))
        .with_sync_writes(false);

    {
        let db = Database::open(&config)?;
        db.execute_query("INSERT INTO T VALUES (1, 'a'), (2, 'b')")?;
    }

    let db = Database::open(&config)?;
    let rows = db.execute_query("SELECT name FROM T WHERE id = 2")?;
    assert_eq!(column(&rows, "name"), vec![text("b")]);

    let rows = db.execute_query("SHOW TABLES")?;
    assert_eq!(column(&rows, "tables"), vec![text("T")]);
    Ok(())
}

#[test]
fn test_show_tables_sorted() -> Result<()> {
    let dir = tempdir()?;
    write_schema_files(
        dir.path(),
        &[("zeta", "Int64 id\n"), ("alpha", "Int64 id\n"), ("mid", "Int64 id\n")],
    )?;
    let db = Database::open(&DatabaseConfig::default().with_schema_dir(dir.path()))?;

    let rows = db.execute_query("show tables")?;
    assert_eq!(column(&rows, "tables"), vec![text("alpha"), text("mid"), text("zeta")]);
    Ok(())
}

#[test]
fn test_output_rendering() -> Result<()> {
    let dir = tempdir()?;
    write_schema_files(dir.path(), &[("t", "Int64 id\nFixedString name 3\n")])?;
    let db = Database::open(&DatabaseConfig::default().with_schema_dir(dir.path()))?;
    db.execute_query("INSERT INTO t VALUES (7, 'abc')")?;

    let rows = db.execute_query("SELECT * FROM t")?;
    assert_eq!(to_json(&rows), json!([{"id": 7, "name": "abc"}]));

    let table = prettify(&rows);
    assert!(table.contains("│ id │ name │"));
    assert!(table.contains("│ 7  │ abc  │"));
    assert!(table.ends_with("(1 row)\n"));
    assert_eq!(rows[0].get("id"), Some(&Value::Int64(7)));
    Ok(())
}
