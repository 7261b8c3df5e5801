// SQL Parser Module
//
// This module is responsible for parsing SQL queries and converting them
// into an abstract syntax tree (AST) representation.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use self::ast::Statement;
pub use self::lexer::{Lexer, Token, TokenType};
pub use self::parser::{parse, ParseError, ParseResult, Parser};
