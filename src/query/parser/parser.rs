// SQL Parser Implementation
//
// This module implements a recursive descent parser for SQL that converts
// tokens from the lexer into an Abstract Syntax Tree (AST). Expressions use
// precedence climbing.

use std::iter::Peekable;
use std::mem;
use std::vec::IntoIter;

use thiserror::Error;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};

/// SQL Parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token {0}")]
    UnexpectedToken(Token),

    #[error("Expected {0:?}, found {1}")]
    ExpectedToken(TokenType, Token),

    #[error("Illegal input {0}")]
    IllegalToken(Token),

    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error("Unexpected end of input")]
    EndOfInput,
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

// Binding power of infix operators, higher binds tighter
const LOWEST: u8 = 0;
const OR_PRECEDENCE: u8 = 1;
const AND_PRECEDENCE: u8 = 2;
const NOT_PRECEDENCE: u8 = 3;
const COMPARISON_PRECEDENCE: u8 = 4;
const SUM_PRECEDENCE: u8 = 5;
const PRODUCT_PRECEDENCE: u8 = 6;
const PREFIX_PRECEDENCE: u8 = 7;

/// Parse a single SQL statement
pub fn parse(sql: &str) -> ParseResult<Statement> {
    Parser::new(sql).parse_statement()
}

/// SQL Parser for constructing an AST from SQL tokens
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    current_token: Option<Token>,
}

impl Parser {
    /// Create a new parser from a SQL query string
    pub fn new(input: &str) -> Self {
        let mut parser = Parser {
            tokens: Lexer::new(input).tokenize().into_iter().peekable(),
            current_token: None,
        };
        parser.next_token();
        parser
    }

    /// Advance to the next token
    fn next_token(&mut self) {
        self.current_token = self.tokens.next();
    }

    /// Check if the token after the current one is of the given type
    fn peek_token_is(&mut self, token_type: &TokenType) -> bool {
        self.tokens
            .peek()
            .is_some_and(|token| same_kind(&token.token_type, token_type))
    }

    /// Check if the current token is of the given type
    fn current_token_is(&self, token_type: &TokenType) -> bool {
        self.current_token
            .as_ref()
            .is_some_and(|token| same_kind(&token.token_type, token_type))
    }

    /// Consume the current token if it has the expected type
    fn expect_token(&mut self, expected: TokenType) -> ParseResult<Token> {
        match self.current_token.take() {
            Some(token) if same_kind(&token.token_type, &expected) => {
                self.next_token();
                Ok(token)
            }
            Some(token) if matches!(token.token_type, TokenType::ILLEGAL(_)) => {
                Err(ParseError::IllegalToken(token))
            }
            Some(token) => Err(ParseError::ExpectedToken(expected, token)),
            None => Err(ParseError::EndOfInput),
        }
    }

    /// Consume an identifier and return its name
    fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current_token.take() {
            Some(Token {
                token_type: TokenType::IDENTIFIER(name),
                ..
            }) => {
                self.next_token();
                Ok(name)
            }
            Some(token) => Err(unexpected(token)),
            None => Err(ParseError::EndOfInput),
        }
    }

    /// Error for the current token
    fn unexpected_current(&self) -> ParseError {
        match &self.current_token {
            Some(token) => unexpected(token.clone()),
            None => ParseError::EndOfInput,
        }
    }

    /// Parse a SQL statement, optionally followed by a semicolon
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token_type = match &self.current_token {
            Some(token) => token.token_type.clone(),
            None => return Err(ParseError::EndOfInput),
        };

        let statement = match token_type {
            TokenType::SELECT => self.parse_select()?,
            TokenType::INSERT => self.parse_insert()?,
            TokenType::SHOW => self.parse_show()?,
            TokenType::CREATE => self.parse_create()?,
            TokenType::UPDATE => self.parse_update()?,
            TokenType::DELETE => self.parse_delete()?,
            _ => return Err(self.unexpected_current()),
        };

        if self.current_token_is(&TokenType::SEMICOLON) {
            self.next_token();
        }
        if !self.current_token_is(&TokenType::EOF) {
            return Err(self.unexpected_current());
        }
        Ok(statement)
    }

    /// Parse a SELECT statement
    fn parse_select(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::SELECT)?;
        let columns = self.parse_select_columns()?;

        self.expect_token(TokenType::FROM)?;
        let from = self.parse_table_references()?;

        let where_clause = if self.current_token_is(&TokenType::WHERE) {
            self.next_token();
            Some(Box::new(self.parse_expression(LOWEST)?))
        } else {
            None
        };

        let limit = if self.current_token_is(&TokenType::LIMIT) {
            self.next_token();
            Some(Box::new(self.parse_expression(LOWEST)?))
        } else {
            None
        };

        Ok(Statement::Select(SelectStatement {
            columns,
            from,
            where_clause,
            limit,
        }))
    }

    /// Parse SELECT column list
    fn parse_select_columns(&mut self) -> ParseResult<Vec<SelectColumn>> {
        let mut columns = Vec::new();

        loop {
            if self.current_token_is(&TokenType::MULTIPLY) {
                self.next_token();
                columns.push(SelectColumn::Wildcard);
            } else {
                let expr = self.parse_expression(LOWEST)?;
                let alias = self.parse_optional_alias()?;
                columns.push(match expr {
                    Expression::Column(column) => SelectColumn::Column { column, alias },
                    expr => SelectColumn::Expression {
                        expr: Box::new(expr),
                        alias,
                    },
                });
            }

            if !self.current_token_is(&TokenType::COMMA) {
                break;
            }
            self.next_token();
        }

        Ok(columns)
    }

    /// Parse `AS alias` or a bare alias identifier
    fn parse_optional_alias(&mut self) -> ParseResult<Option<String>> {
        if self.current_token_is(&TokenType::AS) {
            self.next_token();
            return self.expect_identifier().map(Some);
        }
        if self.current_token_is(&TokenType::IDENTIFIER(String::new())) {
            return self.expect_identifier().map(Some);
        }
        Ok(None)
    }

    /// Parse table references (FROM clause)
    fn parse_table_references(&mut self) -> ParseResult<Vec<TableReference>> {
        let mut tables = Vec::new();

        loop {
            let name = self.expect_identifier()?;
            let alias = self.parse_optional_alias()?;
            tables.push(TableReference { name, alias });

            if !self.current_token_is(&TokenType::COMMA) {
                break;
            }
            self.next_token();
        }

        Ok(tables)
    }

    /// Parse an INSERT statement
    fn parse_insert(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::INSERT)?;
        self.expect_token(TokenType::INTO)?;
        let table_name = self.expect_identifier()?;

        let mut columns = Vec::new();
        if self.current_token_is(&TokenType::LeftParen) {
            self.next_token();
            loop {
                columns.push(self.expect_identifier()?);
                if !self.current_token_is(&TokenType::COMMA) {
                    break;
                }
                self.next_token();
            }
            self.expect_token(TokenType::RightParen)?;
        }

        self.expect_token(TokenType::VALUES)?;
        let mut values = Vec::new();
        loop {
            values.push(self.parse_expression_list()?);
            if !self.current_token_is(&TokenType::COMMA) {
                break;
            }
            self.next_token();
        }

        Ok(Statement::Insert(InsertStatement {
            table_name,
            columns,
            values,
        }))
    }

    /// Parse `( expr [, expr]* )`
    fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        self.expect_token(TokenType::LeftParen)?;
        let mut expressions = Vec::new();
        if !self.current_token_is(&TokenType::RightParen) {
            loop {
                expressions.push(self.parse_expression(LOWEST)?);
                if !self.current_token_is(&TokenType::COMMA) {
                    break;
                }
                self.next_token();
            }
        }
        self.expect_token(TokenType::RightParen)?;
        Ok(expressions)
    }

    /// Parse `SHOW <target>`
    fn parse_show(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::SHOW)?;
        let target = self.expect_identifier()?.to_lowercase();
        Ok(Statement::Show(ShowStatement { target }))
    }

    /// Parse `CREATE TABLE name (column type [(length)], ...)`
    fn parse_create(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::CREATE)?;
        self.expect_token(TokenType::TABLE)?;
        let table_name = self.expect_identifier()?;

        self.expect_token(TokenType::LeftParen)?;
        let mut columns = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let data_type = self.expect_identifier()?;
            let length = if self.current_token_is(&TokenType::LeftParen) {
                self.next_token();
                let length = match self.expect_token(TokenType::INTEGER(0))?.token_type {
                    TokenType::INTEGER(n) => n,
                    _ => return Err(ParseError::InvalidSyntax("expected column length".to_string())),
                };
                self.expect_token(TokenType::RightParen)?;
                Some(length)
            } else {
                None
            };
            columns.push(ColumnDef {
                name,
                data_type,
                length,
            });

            if !self.current_token_is(&TokenType::COMMA) {
                break;
            }
            self.next_token();
        }
        self.expect_token(TokenType::RightParen)?;

        Ok(Statement::Create(CreateStatement { table_name, columns }))
    }

    /// Parse `UPDATE name SET column = expr [, ...] [WHERE expr]`
    fn parse_update(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::UPDATE)?;
        let table_name = self.expect_identifier()?;
        self.expect_token(TokenType::SET)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier()?;
            self.expect_token(TokenType::EQUALS)?;
            let value = self.parse_expression(LOWEST)?;
            assignments.push(Assignment { column, value });

            if !self.current_token_is(&TokenType::COMMA) {
                break;
            }
            self.next_token();
        }

        let where_clause = self.parse_optional_where()?;
        Ok(Statement::Update(UpdateStatement {
            table_name,
            assignments,
            where_clause,
        }))
    }

    /// Parse `DELETE FROM name [WHERE expr]`
    fn parse_delete(&mut self) -> ParseResult<Statement> {
        self.expect_token(TokenType::DELETE)?;
        self.expect_token(TokenType::FROM)?;
        let table_name = self.expect_identifier()?;
        let where_clause = self.parse_optional_where()?;
        Ok(Statement::Delete(DeleteStatement {
            table_name,
            where_clause,
        }))
    }

    fn parse_optional_where(&mut self) -> ParseResult<Option<Box<Expression>>> {
        if self.current_token_is(&TokenType::WHERE) {
            self.next_token();
            Ok(Some(Box::new(self.parse_expression(LOWEST)?)))
        } else {
            Ok(None)
        }
    }

    /// Parse an expression with operator precedence
    pub fn parse_expression(&mut self, precedence: u8) -> ParseResult<Expression> {
        let mut left = self.parse_prefix_expression()?;

        loop {
            let Some(op) = self.current_token.as_ref().and_then(|t| infix_operator(&t.token_type)) else {
                break;
            };
            let op_precedence = operator_precedence(op);
            if precedence >= op_precedence {
                break;
            }
            self.next_token();

            let right = self.parse_expression(op_precedence)?;
            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse a prefix expression (literal, identifier, etc.)
    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token_type = match &self.current_token {
            Some(token) => token.token_type.clone(),
            None => return Err(ParseError::EndOfInput),
        };

        match token_type {
            TokenType::MINUS => {
                self.next_token();
                let operand = self.parse_expression(PREFIX_PRECEDENCE)?;
                Ok(Expression::UnaryOp {
                    op: Operator::Minus,
                    expr: Box::new(operand),
                })
            }
            TokenType::NOT => {
                self.next_token();
                let operand = self.parse_expression(NOT_PRECEDENCE)?;
                Ok(Expression::UnaryOp {
                    op: Operator::Not,
                    expr: Box::new(operand),
                })
            }
            TokenType::INTEGER(value) => {
                self.next_token();
                Ok(Expression::Literal(Literal::Integer(value)))
            }
            TokenType::FLOAT(value) => {
                self.next_token();
                Ok(Expression::Literal(Literal::Float(value)))
            }
            TokenType::STRING(value) => {
                self.next_token();
                Ok(Expression::Literal(Literal::String(value)))
            }
            TokenType::TRUE | TokenType::FALSE => {
                self.next_token();
                Ok(Expression::Literal(Literal::Boolean(token_type == TokenType::TRUE)))
            }
            TokenType::NULL => {
                self.next_token();
                Ok(Expression::Literal(Literal::Null))
            }
            TokenType::IDENTIFIER(_) => {
                if self.peek_token_is(&TokenType::LeftParen) {
                    self.parse_function_call()
                } else {
                    self.parse_column_reference().map(Expression::Column)
                }
            }
            TokenType::LeftParen => {
                self.next_token();
                let expr = self.parse_expression(LOWEST)?;
                self.expect_token(TokenType::RightParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected_current()),
        }
    }

    /// Parse `name(args)`
    fn parse_function_call(&mut self) -> ParseResult<Expression> {
        let name = self.expect_identifier()?;
        self.expect_token(TokenType::LeftParen)?;
        let mut args = Vec::new();
        if !self.current_token_is(&TokenType::RightParen) {
            loop {
                if self.current_token_is(&TokenType::MULTIPLY) {
                    // count(*)
                    self.next_token();
                    args.push(Expression::Column(ColumnReference::new("*")));
                } else {
                    args.push(self.parse_expression(LOWEST)?);
                }
                if !self.current_token_is(&TokenType::COMMA) {
                    break;
                }
                self.next_token();
            }
        }
        self.expect_token(TokenType::RightParen)?;
        Ok(Expression::Function { name, args })
    }

    /// Parse a column reference (possibly qualified with table name)
    fn parse_column_reference(&mut self) -> ParseResult<ColumnReference> {
        let name = self.expect_identifier()?;
        if self.current_token_is(&TokenType::DOT) {
            self.next_token();
            let column = self.expect_identifier()?;
            return Ok(ColumnReference::qualified(name, column));
        }
        Ok(ColumnReference::new(name))
    }
}

/// Compare token types ignoring the data they carry
fn same_kind(a: &TokenType, b: &TokenType) -> bool {
    mem::discriminant(a) == mem::discriminant(b)
}

fn unexpected(token: Token) -> ParseError {
    match token.token_type {
        TokenType::EOF => ParseError::EndOfInput,
        TokenType::ILLEGAL(_) => ParseError::IllegalToken(token),
        _ => ParseError::UnexpectedToken(token),
    }
}

fn infix_operator(token_type: &TokenType) -> Option<Operator> {
    let op = match token_type {
        TokenType::EQUALS => Operator::Equals,
        TokenType::NotEqual => Operator::NotEquals,
        TokenType::LessThan => Operator::LessThan,
        TokenType::GreaterThan => Operator::GreaterThan,
        TokenType::LessEqual => Operator::LessEquals,
        TokenType::GreaterEqual => Operator::GreaterEquals,
        TokenType::AND => Operator::And,
        TokenType::OR => Operator::Or,
        TokenType::PLUS => Operator::Plus,
        TokenType::MINUS => Operator::Minus,
        TokenType::MULTIPLY => Operator::Multiply,
        TokenType::DIVIDE => Operator::Divide,
        TokenType::MODULO => Operator::Modulo,
        _ => return None,
    };
    Some(op)
}

fn operator_precedence(op: Operator) -> u8 {
    match op {
        Operator::Or => OR_PRECEDENCE,
        Operator::And => AND_PRECEDENCE,
        Operator::Not => NOT_PRECEDENCE,
        Operator::Plus | Operator::Minus => SUM_PRECEDENCE,
        Operator::Multiply | Operator::Divide | Operator::Modulo => PRODUCT_PRECEDENCE,
        _ => COMPARISON_PRECEDENCE,
    }
}
