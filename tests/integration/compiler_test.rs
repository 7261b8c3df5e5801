use anyhow::Result;
use leafdb::catalog::Value;
use leafdb::query::compiler::{compile, compile_expression, CompileError};
use leafdb::query::executor::{ComparisonOp, Expression};
use leafdb::query::parser::ast;
use leafdb::query::parser::parse;

fn compile_sql(sql: &str) -> Result<Result<&'static str, CompileError>> {
    let statement = parse(sql)?;
    Ok(compile(&statement).map(|root| root.name()))
}

#[test]
fn test_root_operators() -> Result<()> {
    assert_eq!(compile_sql("SELECT * FROM t")?, Ok("TableScan"));
    assert_eq!(compile_sql("SELECT * FROM t WHERE id = 1")?, Ok("Selection"));
    assert_eq!(compile_sql("SELECT * FROM t LIMIT 5")?, Ok("Limit"));
    assert_eq!(compile_sql("SELECT id FROM t LIMIT 5")?, Ok("Projection"));
    assert_eq!(compile_sql("SELECT * FROM a, b, c")?, Ok("Join"));
    assert_eq!(compile_sql("INSERT INTO t VALUES (1, 'a')")?, Ok("Insert"));
    assert_eq!(compile_sql("SHOW TABLES")?, Ok("ShowTables"));
    Ok(())
}

#[test]
fn test_rejected_statements() -> Result<()> {
    assert!(matches!(
        compile_sql("SHOW DATABASES")?,
        Err(CompileError::UnsupportedStatement(_))
    ));
    assert!(matches!(
        compile_sql("DELETE FROM t WHERE id = 1")?,
        Err(CompileError::UnsupportedStatement(_))
    ));
    assert!(matches!(
        compile_sql("SELECT * FROM t WHERE a = 1 AND b = 2")?,
        Err(CompileError::UnsupportedExpression(_))
    ));
    assert!(matches!(
        compile_sql("SELECT * FROM t WHERE a = 1.5")?,
        Err(CompileError::UnsupportedLiteral(_))
    ));
    assert!(matches!(
        compile_sql("SELECT count(id) FROM t")?,
        Err(CompileError::UnsupportedExpression(_))
    ));
    assert!(matches!(
        compile_sql("SELECT * FROM t LIMIT -2")?,
        Err(CompileError::InvalidLimit(_))
    ));
    assert!(matches!(
        compile_sql("INSERT INTO t VALUES (1, NULL)")?,
        Err(CompileError::UnsupportedLiteral(_))
    ));
    Ok(())
}

#[test]
fn test_where_clause_lowering() -> Result<()> {
    let ast::Statement::Select(select) = parse("SELECT * FROM t WHERE 'x' <> u.name")? else {
        panic!("expected SELECT");
    };
    let Some(predicate) = select.where_clause else {
        panic!("expected WHERE");
    };
    assert_eq!(
        compile_expression(&predicate)?,
        Expression::comparison(
            ComparisonOp::Ne,
            Expression::Literal(Value::FixedString("x".to_string())),
            Expression::column("u.name"),
        )
    );
    Ok(())
}
