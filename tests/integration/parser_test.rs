use anyhow::Result;
use leafdb::query::parser::ast::{
    ColumnReference, Expression, Literal, Operator, SelectColumn, Statement, TableReference,
};
use leafdb::query::parser::{parse, Lexer, ParseError, TokenType};

fn column(name: &str) -> Box<Expression> {
    Box::new(Expression::Column(ColumnReference::new(name)))
}

#[test]
fn test_lexer_token_stream() {
    let tokens = Lexer::new("select a.b, 'it''s' FROM t where x <> -3 -- trailing\n;")
        .tokenize();
    let types: Vec<TokenType> = tokens.into_iter().map(|t| t.token_type).collect();
    assert_eq!(
        types,
        vec![
            TokenType::SELECT,
            TokenType::IDENTIFIER("a".to_string()),
            TokenType::DOT,
            TokenType::IDENTIFIER("b".to_string()),
            TokenType::COMMA,
            TokenType::STRING("it's".to_string()),
            TokenType::FROM,
            TokenType::IDENTIFIER("t".to_string()),
            TokenType::WHERE,
            TokenType::IDENTIFIER("x".to_string()),
            TokenType::NotEqual,
            TokenType::MINUS,
            TokenType::INTEGER(3),
            TokenType::SEMICOLON,
            TokenType::EOF,
        ]
    );
}

#[test]
fn test_select_with_join_and_aliases() -> Result<()> {
    let Statement::Select(select) = parse("SELECT u.id AS uid, o.total FROM users u, orders AS o WHERE u.id = o.user_id")? else {
        panic!("expected SELECT");
    };

    assert_eq!(
        select.from,
        vec![
            TableReference {
                name: "users".to_string(),
                alias: Some("u".to_string())
            },
            TableReference {
                name: "orders".to_string(),
                alias: Some("o".to_string())
            },
        ]
    );
    assert_eq!(
        select.columns[0],
        SelectColumn::Column {
            column: ColumnReference::qualified("u", "id"),
            alias: Some("uid".to_string())
        }
    );
    assert_eq!(
        select.where_clause,
        Some(Box::new(Expression::BinaryOp {
            left: Box::new(Expression::Column(ColumnReference::qualified("u", "id"))),
            op: Operator::Equals,
            right: Box::new(Expression::Column(ColumnReference::qualified("o", "user_id"))),
        }))
    );
    Ok(())
}

#[test]
fn test_boolean_precedence() -> Result<()> {
    let Statement::Select(select) = parse("SELECT * FROM t WHERE a = 1 OR b = 2 AND NOT c")? else {
        panic!("expected SELECT");
    };
    let Some(predicate) = select.where_clause else {
        panic!("expected WHERE");
    };
    let Expression::BinaryOp { op, right, .. } = *predicate else {
        panic!("expected binary op");
    };
    assert_eq!(op, Operator::Or);
    assert!(matches!(*right, Expression::BinaryOp { op: Operator::And, .. }));
    Ok(())
}

#[test]
fn test_insert_forms() -> Result<()> {
    let Statement::Insert(insert) = parse("insert into t values (1, 'a'), (2, 'b');")? else {
        panic!("expected INSERT");
    };
    assert!(insert.columns.is_empty());
    assert_eq!(insert.values.len(), 2);
    assert_eq!(insert.values[1][1], Expression::Literal(Literal::String("b".to_string())));

    let Statement::Insert(insert) = parse("INSERT INTO t (name, id) VALUES ('x', 7)")? else {
        panic!("expected INSERT");
    };
    assert_eq!(insert.columns, vec!["name".to_string(), "id".to_string()]);
    Ok(())
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse("   "), Err(ParseError::EndOfInput));
    assert!(parse("SELECT FROM t").is_err());
    assert!(parse("INSERT t VALUES (1)").is_err());
    assert!(parse("SELECT * FROM t; SELECT * FROM u").is_err());
    assert!(matches!(parse("SELECT # FROM t"), Err(ParseError::IllegalToken(_))));
}

#[test]
fn test_where_column_comparison() -> Result<()> {
    let Statement::Select(select) = parse("SELECT id FROM t WHERE id >= 10")? else {
        panic!("expected SELECT");
    };
    assert_eq!(
        select.where_clause,
        Some(Box::new(Expression::BinaryOp {
            left: column("id"),
            op: Operator::GreaterEquals,
            right: Box::new(Expression::Literal(Literal::Integer(10))),
        }))
    );
    Ok(())
}
