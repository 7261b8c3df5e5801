use std::sync::Arc;

use anyhow::Result;
use leafdb::catalog::{Catalog, Column, ColumnType, Schema, Value};
use leafdb::query::executor::operators::{Limit, Operator, Projection, Selection, TableScan};
use leafdb::query::executor::{execute, ComparisonOp, ExecutionContext, ExecutionError, Expression, QueryError};
use leafdb::storage::MemoryStorage;

#[path = "../common/mod.rs"]
mod common;
use common::{column, memory_db, people_schema, random_names, text};

#[test]
fn test_insert_and_select_end_to_end() -> Result<()> {
    let db = memory_db(vec![people_schema("T")])?;
    assert!(db.execute_query("insert into T values (1, 'a'), (2, 'b')")?.is_empty());

    let rows = db.execute_query("select name from T where id = 2")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].column_names().collect::<Vec<_>>(), vec!["name"]);
    assert_eq!(rows[0].get("name"), Some(&text("b")));

    let rows = db.execute_query("select * from T limit 1")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].values(), &[Value::Int64(1), text("a")]);
    Ok(())
}

#[test]
fn test_rows_come_back_in_key_order() -> Result<()> {
    let db = memory_db(vec![people_schema("t")])?;
    let names = random_names(5);
    for (id, name) in [5, 3, 1, 4, 2].iter().zip(&names) {
        db.execute_query(&format!("INSERT INTO t VALUES ({}, '{}')", id, name))?;
    }

    let rows = db.execute_query("SELECT id FROM t")?;
    assert_eq!(
        column(&rows, "id"),
        (1..=5).map(Value::Int64).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn test_overwrite_same_primary_key() -> Result<()> {
    let db = memory_db(vec![people_schema("t")])?;
    db.execute_query("INSERT INTO t VALUES (1, 'a')")?;
    db.execute_query("INSERT INTO t VALUES (1, 'z')")?;

    let rows = db.execute_query("SELECT * FROM t")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("name"), Some(&text("z")));
    Ok(())
}

#[test]
fn test_filters_and_limits() -> Result<()> {
    let db = memory_db(vec![people_schema("t")])?;
    db.execute_query("INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')")?;

    let rows = db.execute_query("SELECT name FROM t WHERE id > 1 LIMIT 2")?;
    assert_eq!(column(&rows, "name"), vec![text("b"), text("c")]);

    let rows = db.execute_query("SELECT id FROM t WHERE name != 'c'")?;
    assert_eq!(column(&rows, "id"), vec![Value::Int64(1), Value::Int64(2), Value::Int64(4)]);

    assert!(db.execute_query("SELECT * FROM t LIMIT 0")?.is_empty());
    assert!(db.execute_query("SELECT * FROM t WHERE id = 'a'")?.is_empty());

    let rows = db.execute_query("SELECT id AS key FROM t WHERE 2 >= id")?;
    assert_eq!(column(&rows, "key"), vec![Value::Int64(1), Value::Int64(2)]);
    Ok(())
}

#[test]
fn test_insert_with_column_list_and_coercion() -> Result<()> {
    let schema = Schema::new(
        "events",
        vec![
            Column::new("id", ColumnType::UInt32),
            Column::new("count", ColumnType::Int32),
            Column::new("at", ColumnType::Date),
            Column::fixed_string("tag", 2),
        ],
    );
    let db = memory_db(vec![schema])?;
    db.execute_query("INSERT INTO events (tag, at, count, id) VALUES ('ok', '2024-01-02', -5, 9)")?;

    let rows = db.execute_query("SELECT * FROM events")?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&Value::UInt32(9)));
    assert_eq!(rows[0].get("count"), Some(&Value::Int32(-5)));
    assert_eq!(rows[0].get("tag"), Some(&text("ok")));
    assert!(matches!(rows[0].get("at"), Some(Value::Date(_))));
    Ok(())
}

#[test]
fn test_insert_errors() -> Result<()> {
    let db = memory_db(vec![people_schema("t")])?;

    assert!(matches!(
        db.execute_query("INSERT INTO t VALUES (1)"),
        Err(QueryError::Execution(ExecutionError::ArityMismatch { .. }))
    ));
    assert!(matches!(
        db.execute_query("INSERT INTO t VALUES ('x', 'a')"),
        Err(QueryError::Execution(ExecutionError::TypeMismatch { .. }))
    ));
    assert!(matches!(
        db.execute_query("INSERT INTO t VALUES (1, 'toolong')"),
        Err(QueryError::Codec(_))
    ));
    assert!(matches!(
        db.execute_query("INSERT INTO missing VALUES (1, 'a')"),
        Err(QueryError::Catalog(_))
    ));
    assert!(db.execute_query("SELECT * FROM t")?.is_empty());
    Ok(())
}

#[test]
fn test_select_errors() -> Result<()> {
    let db = memory_db(vec![people_schema("t")])?;
    db.execute_query("INSERT INTO t VALUES (1, 'a')")?;

    assert!(matches!(db.execute_query("SELECT * FROM nope"), Err(QueryError::Catalog(_))));
    assert!(matches!(db.execute_query("SELECT nope FROM t"), Err(QueryError::Catalog(_))));
    assert!(matches!(db.execute_query("SELECT * FROM t WHERE"), Err(QueryError::Parse(_))));
    assert!(matches!(
        db.execute_query("UPDATE t SET name = 'b'"),
        Err(QueryError::Compile(_))
    ));
    Ok(())
}

#[test]
fn test_hand_built_operator_tree() -> Result<()> {
    let db = memory_db(vec![people_schema("t")])?;
    db.execute_query("INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, 'c')")?;

    let context = ExecutionContext::new(
        Arc::new(Catalog::from_schemas(vec![people_schema("t")])?),
        Arc::new(MemoryStorage::new()),
    );
    let scan: Box<dyn Operator> = Box::new(TableScan::new("t"));
    let mut empty = Limit::new(scan, 10);
    assert!(execute(&mut empty, &context)?.is_empty());

    let scan: Box<dyn Operator> = Box::new(TableScan::new("t"));
    let filter = Selection::new(
        scan,
        Expression::comparison(ComparisonOp::Lt, Expression::column("id"), Expression::Literal(Value::Int64(3))),
    );
    let mut projection = Projection::new(
        Box::new(Limit::new(Box::new(filter), 1)),
        vec![("name".to_string(), "n".to_string())],
    );
    let rows = execute(&mut projection, db.context())?;
    assert_eq!(column(&rows, "n"), vec![text("a")]);
    Ok(())
}
