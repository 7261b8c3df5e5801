use anyhow::Result;
use leafdb::catalog::{load_dir, Catalog, CatalogError, ColumnType, Schema};
use tempfile::tempdir;

#[path = "../common/mod.rs"]
mod common;
use common::{people_schema, write_schema_files};

#[test]
fn test_load_schema_directory() -> Result<()> {
    let dir = tempdir()?;
    write_schema_files(
        dir.path(),
        &[
            ("users", "Int64 id\nFixedString name 8\nDate joined\n"),
            ("metrics", "UInt64 id\nInt32 delta\nUInt32 count\n"),
        ],
    )?;

    let catalog = load_dir(dir.path())?;
    assert_eq!(catalog.table_names(), vec!["metrics".to_string(), "users".to_string()]);

    let users = catalog.get_table("users")?;
    let (ordinal, name) = users.column_by_name("name").ok_or_else(|| anyhow::anyhow!("missing name"))?;
    assert_eq!(ordinal, 1);
    assert_eq!(name.column_type(), ColumnType::FixedString);
    assert_eq!(name.fixed_length(), Some(8));
    Ok(())
}

#[test]
fn test_schema_text_round_trip() -> Result<()> {
    let text = "Int64 id\nFixedString name 1\n";
    let schema = Schema::parse("t", text)?;
    assert_eq!(schema.to_string(), text);
    assert_eq!(schema.columns(), people_schema("t").columns());
    Ok(())
}

#[test]
fn test_invalid_schema_files() -> Result<()> {
    let dir = tempdir()?;
    write_schema_files(dir.path(), &[("bad", "Float64 x\n")])?;
    assert!(load_dir(dir.path()).is_err());

    let dir = tempdir()?;
    write_schema_files(dir.path(), &[("dup", "Int64 id\nInt64 id\n")])?;
    assert!(matches!(load_dir(dir.path()), Err(CatalogError::DuplicateColumn { .. })));

    assert!(load_dir(dir.path().join("missing")).is_err());
    Ok(())
}

#[test]
fn test_catalog_rejects_duplicate_tables() {
    let result = Catalog::from_schemas(vec![people_schema("t"), people_schema("t")]);
    assert!(matches!(result, Err(CatalogError::DuplicateTable(name)) if name == "t"));
}
