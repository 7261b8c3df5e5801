// SQL Lexer Implementation
//
// This module implements a lexer for SQL that tokenizes input queries.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// SQL Token types
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    SELECT,
    FROM,
    WHERE,
    LIMIT,
    INSERT,
    INTO,
    VALUES,
    SHOW,
    CREATE,
    TABLE,
    UPDATE,
    SET,
    DELETE,
    AND,
    OR,
    NOT,
    AS,
    TRUE,
    FALSE,
    NULL,

    // Literals
    STRING(String),
    INTEGER(i64),
    FLOAT(f64),

    // Identifiers
    IDENTIFIER(String),

    // Operators
    EQUALS,       // =
    NotEqual,     // != or <>
    LessThan,     // <
    GreaterThan,  // >
    LessEqual,    // <=
    GreaterEqual, // >=
    PLUS,         // +
    MINUS,        // -
    MULTIPLY,     // *
    DIVIDE,       // /
    MODULO,       // %

    // Punctuation
    SEMICOLON, // ;
    COMMA,     // ,
    LeftParen, // (
    RightParen, // )
    DOT,       // .

    // Special
    EOF,
    ILLEGAL(String),
}

/// A Token represents a lexical unit in the SQL query
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.token_type == TokenType::EOF {
            write!(f, "end of input")
        } else {
            write!(f, "'{}' at {}:{}", self.literal, self.line, self.column)
        }
    }
}

/// SQL Lexer for breaking a query string into tokens
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from a SQL query string
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars().peekable(),
            line: 1,
            column: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Tokenize the whole input, ending with a single EOF token
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.token_type == TokenType::EOF;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Read the next character from the input
    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.next();
        self.ch = ch;

        if let Some(c) = ch {
            self.column += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            }
        }

        ch
    }

    /// Peek at the next character without advancing
    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    /// Skip whitespace and `--` line comments
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.ch {
            if ch.is_whitespace() {
                self.read_char();
            } else if ch == '-' && self.peek_char() == Some('-') {
                while let Some(c) = self.ch {
                    if c == '\n' {
                        break;
                    }
                    self.read_char();
                }
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword starting at the current character
    fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();
        while let Some(ch) = self.ch {
            if is_letter(ch) || ch.is_ascii_digit() {
                identifier.push(ch);
                self.read_char();
            } else {
                break;
            }
        }
        identifier
    }

    /// Read a number (integer or float) starting at the current character
    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut has_dot = false;
        while let Some(ch) = self.ch {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.read_char();
            } else if ch == '.' && !has_dot && self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                has_dot = true;
                number.push(ch);
                self.read_char();
            } else {
                break;
            }
        }
        number
    }

    /// Read a single-quoted string literal. A doubled quote is an escaped quote.
    ///
    /// Returns `None` when the input ends before the closing quote.
    fn read_string(&mut self) -> Option<String> {
        let mut string = String::new();

        // Skip opening quote which is in self.ch
        self.read_char();

        loop {
            match self.ch {
                Some('\'') => {
                    self.read_char();
                    if self.ch == Some('\'') {
                        string.push('\'');
                        self.read_char();
                    } else {
                        return Some(string);
                    }
                }
                Some(ch) => {
                    string.push(ch);
                    self.read_char();
                }
                None => return None,
            }
        }
    }

    /// Get the token type for an identifier (could be a keyword)
    fn lookup_identifier(ident: &str) -> TokenType {
        match ident.to_uppercase().as_str() {
            "SELECT" => TokenType::SELECT,
            "FROM" => TokenType::FROM,
            "WHERE" => TokenType::WHERE,
            "LIMIT" => TokenType::LIMIT,
            "INSERT" => TokenType::INSERT,
            "INTO" => TokenType::INTO,
            "VALUES" => TokenType::VALUES,
            "SHOW" => TokenType::SHOW,
            "CREATE" => TokenType::CREATE,
            "TABLE" => TokenType::TABLE,
            "UPDATE" => TokenType::UPDATE,
            "SET" => TokenType::SET,
            "DELETE" => TokenType::DELETE,
            "AND" => TokenType::AND,
            "OR" => TokenType::OR,
            "NOT" => TokenType::NOT,
            "AS" => TokenType::AS,
            "TRUE" => TokenType::TRUE,
            "FALSE" => TokenType::FALSE,
            "NULL" => TokenType::NULL,
            _ => TokenType::IDENTIFIER(ident.to_string()),
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let mut token = Token {
            token_type: TokenType::EOF,
            literal: String::new(),
            line: self.line,
            column: self.column,
        };

        let Some(ch) = self.ch else {
            return token;
        };
        token.literal = ch.to_string();

        match ch {
            ';' => token.token_type = TokenType::SEMICOLON,
            ',' => token.token_type = TokenType::COMMA,
            '(' => token.token_type = TokenType::LeftParen,
            ')' => token.token_type = TokenType::RightParen,
            '.' => token.token_type = TokenType::DOT,
            '+' => token.token_type = TokenType::PLUS,
            '-' => token.token_type = TokenType::MINUS,
            '*' => token.token_type = TokenType::MULTIPLY,
            '/' => token.token_type = TokenType::DIVIDE,
            '%' => token.token_type = TokenType::MODULO,
            '=' => token.token_type = TokenType::EQUALS,
            '!' => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    token.literal.push('=');
                    token.token_type = TokenType::NotEqual;
                } else {
                    token.token_type = TokenType::ILLEGAL(token.literal.clone());
                }
            }
            '<' => match self.peek_char() {
                Some('=') => {
                    self.read_char();
                    token.literal.push('=');
                    token.token_type = TokenType::LessEqual;
                }
                Some('>') => {
                    self.read_char();
                    token.literal.push('>');
                    token.token_type = TokenType::NotEqual;
                }
                _ => token.token_type = TokenType::LessThan,
            },
            '>' => {
                if self.peek_char() == Some('=') {
                    self.read_char();
                    token.literal.push('=');
                    token.token_type = TokenType::GreaterEqual;
                } else {
                    token.token_type = TokenType::GreaterThan;
                }
            }
            '\'' => {
                token.token_type = match self.read_string() {
                    Some(value) => {
                        token.literal = format!("'{}'", value);
                        TokenType::STRING(value)
                    }
                    None => TokenType::ILLEGAL("unterminated string".to_string()),
                };
                // read_string already moved past the literal
                return token;
            }
            _ if is_letter(ch) => {
                let identifier = self.read_identifier();
                token.token_type = Self::lookup_identifier(&identifier);
                token.literal = identifier;
                return token;
            }
            _ if ch.is_ascii_digit() => {
                let number = self.read_number();
                token.token_type = if number.contains('.') {
                    number
                        .parse::<f64>()
                        .map(TokenType::FLOAT)
                        .unwrap_or_else(|_| TokenType::ILLEGAL(number.clone()))
                } else {
                    number
                        .parse::<i64>()
                        .map(TokenType::INTEGER)
                        .unwrap_or_else(|_| TokenType::ILLEGAL(number.clone()))
                };
                token.literal = number;
                return token;
            }
            _ => token.token_type = TokenType::ILLEGAL(ch.to_string()),
        }

        self.read_char();
        token
    }
}

/// Check if a character can start an identifier
fn is_letter(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}
