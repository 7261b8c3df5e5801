use anyhow::Result;
use leafdb::catalog::{Column, ColumnType, Schema, Value};

#[path = "../common/mod.rs"]
mod common;
use common::{column, memory_db, people_schema, text};

fn orders_schema() -> Schema {
    Schema::new(
        "orders",
        vec![
            Column::new("id", ColumnType::Int64),
            Column::new("user_id", ColumnType::Int64),
            Column::new("total", ColumnType::UInt32),
        ],
    )
}

fn seeded() -> Result<leafdb::Database> {
    let db = memory_db(vec![people_schema("users"), orders_schema()])?;
    db.execute_query("INSERT INTO users VALUES (1, 'a'), (2, 'b'), (3, 'c')")?;
    db.execute_query("INSERT INTO orders VALUES (1, 2, 50), (2, 1, 75), (3, 2, 20)")?;
    Ok(db)
}

#[test]
fn test_cross_product() -> Result<()> {
    let db = seeded()?;
    let rows = db.execute_query("SELECT * FROM users, orders")?;
    assert_eq!(rows.len(), 9);
    assert_eq!(
        rows[0].column_names().collect::<Vec<_>>(),
        vec!["users.id", "users.name", "orders.id", "orders.user_id", "orders.total"]
    );
    // Left-major order
    assert_eq!(
        column(&rows[..3], "users.id"),
        vec![Value::Int64(1), Value::Int64(1), Value::Int64(1)]
    );
    assert_eq!(
        column(&rows[..3], "orders.id"),
        vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]
    );
    Ok(())
}

#[test]
fn test_equi_join_through_where() -> Result<()> {
    let db = seeded()?;
    let rows = db.execute_query(
        "SELECT users.name, orders.total FROM users, orders WHERE users.id = orders.user_id",
    )?;
    assert_eq!(column(&rows, "users.name"), vec![text("a"), text("b"), text("b")]);
    assert_eq!(
        column(&rows, "orders.total"),
        vec![Value::UInt32(75), Value::UInt32(50), Value::UInt32(20)]
    );
    Ok(())
}

#[test]
fn test_aliases_and_self_join() -> Result<()> {
    let db = seeded()?;
    let rows = db.execute_query("SELECT l.id AS left_id, r.id FROM users l, users r WHERE l.id < r.id")?;
    assert_eq!(rows.len(), 3);
    assert_eq!(
        column(&rows, "left_id"),
        vec![Value::Int64(1), Value::Int64(1), Value::Int64(2)]
    );
    assert_eq!(
        column(&rows, "r.id"),
        vec![Value::Int64(2), Value::Int64(3), Value::Int64(3)]
    );
    Ok(())
}

#[test]
fn test_three_way_join_with_limit() -> Result<()> {
    let db = seeded()?;
    let rows = db.execute_query("SELECT * FROM users a, users b, orders c LIMIT 4")?;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].len(), 7);
    assert_eq!(rows[3].get("(a,b).b.id"), Some(&Value::Int64(2)));
    assert_eq!(rows[3].get("c.id"), Some(&Value::Int64(1)));
    Ok(())
}

#[test]
fn test_repeated_table_columns_stay_distinct() -> Result<()> {
    let db = seeded()?;
    let rows = db.execute_query("SELECT * FROM users, orders, users")?;
    assert_eq!(rows.len(), 27);
    assert_eq!(
        rows[0].column_names().collect::<Vec<_>>(),
        vec![
            "(users,orders).users.id",
            "(users,orders).users.name",
            "(users,orders).orders.id",
            "(users,orders).orders.user_id",
            "(users,orders).orders.total",
            "users.id",
            "users.name",
        ]
    );
    // Last table varies fastest
    assert_eq!(
        column(&rows[..3], "users.id"),
        vec![Value::Int64(1), Value::Int64(2), Value::Int64(3)]
    );
    assert_eq!(
        column(&rows[..3], "(users,orders).users.id"),
        vec![Value::Int64(1), Value::Int64(1), Value::Int64(1)]
    );
    Ok(())
}

#[test]
fn test_join_with_empty_side() -> Result<()> {
    let db = memory_db(vec![people_schema("users"), orders_schema()])?;
    db.execute_query("INSERT INTO users VALUES (1, 'a')")?;
    assert!(db.execute_query("SELECT * FROM users, orders")?.is_empty());
    assert!(db.execute_query("SELECT * FROM orders, users")?.is_empty());
    Ok(())
}

#[test]
fn test_unqualified_column_after_join_fails() -> Result<()> {
    let db = seeded()?;
    assert!(db.execute_query("SELECT id FROM users, orders").is_err());
    Ok(())
}
