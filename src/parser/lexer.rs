//! Lexer (tokenizer) for clike source code
//!
//! Produces [`Token`]s lazily through [`Lexer::next_token`]; the parser pulls one
//! token at a time and uses [`Lexer::peek_token`] for its single-token lookahead.
//! Keywords are matched case-insensitively and always carry their lower-cased
//! spelling, while identifiers keep the case they were written in.

use super::ast::SourceLocation;
use std::fmt;

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Assignment and comparison
    Assign, // =
    EqEq,   // ==
    NotEq,  // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||

    // Punctuation
    Semicolon, // ;
    Comma,     // ,
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Hash,      // #

    // Keywords
    If,
    Else,
    While,
    For,
    Int,
    Float,
    Char,
    String,
    Void,
    Return,
    Include,
    Main,
    Print,

    // Literals, identifiers, end of input
    Ident,
    IntConst,
    FloatConst,
    StringLiteral,
    CharLiteral,
    Eof,
}

impl TokenKind {
    /// Keyword lookup on an already lower-cased spelling
    fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "char" => TokenKind::Char,
            "string" => TokenKind::String,
            "void" => TokenKind::Void,
            "return" => TokenKind::Return,
            "include" => TokenKind::Include,
            "main" => TokenKind::Main,
            "print" => TokenKind::Print,
            _ => return None,
        };
        Some(kind)
    }

    /// Single-character tokens; `!`, `&` and `|` only exist doubled
    fn single(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Assign,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '#' => TokenKind::Hash,
            _ => return None,
        };
        Some(kind)
    }

    /// Two-character operators, matched before single characters
    fn double(first: char, second: char) -> Option<TokenKind> {
        let kind = match (first, second) {
            ('=', '=') => TokenKind::EqEq,
            ('!', '=') => TokenKind::NotEq,
            ('<', '=') => TokenKind::Le,
            ('>', '=') => TokenKind::Ge,
            ('&', '&') => TokenKind::AndAnd,
            ('|', '|') => TokenKind::OrOr,
            _ => return None,
        };
        Some(kind)
    }

    /// True for tokens that can begin a type specifier (`void` included)
    pub fn starts_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Char | TokenKind::String | TokenKind::Void
        )
    }

    /// True for tokens that can begin a variable declaration (`void` excluded)
    pub fn starts_declaration(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Char | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Hash => "'#'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Int => "'int'",
            TokenKind::Float => "'float'",
            TokenKind::Char => "'char'",
            TokenKind::String => "'string'",
            TokenKind::Void => "'void'",
            TokenKind::Return => "'return'",
            TokenKind::Include => "'include'",
            TokenKind::Main => "'main'",
            TokenKind::Print => "'print'",
            TokenKind::Ident => "identifier",
            TokenKind::IntConst => "integer literal",
            TokenKind::FloatConst => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// Literal payload of a token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Operator, punctuation, keyword or identifier spelling
    Text(String),
    Int(i64),
    Float(f64),
    Char(char),
    None,
}

/// A token with its literal value and source position
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, location: SourceLocation) -> Self {
        Token {
            kind,
            value,
            location,
        }
    }

    /// Text payload of identifiers, keywords, operators and string literals
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Source-like spelling of the token (string/char literals without quotes)
    pub fn lexeme(&self) -> String {
        match &self.value {
            TokenValue::Text(s) => s.clone(),
            TokenValue::Int(n) => n.to_string(),
            TokenValue::Float(x) => x.to_string(),
            TokenValue::Char(c) => c.to_string(),
            TokenValue::None => String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (TokenKind::Ident, TokenValue::Text(s)) => write!(f, "identifier '{}'", s)?,
            (TokenKind::IntConst, TokenValue::Int(n)) => write!(f, "int literal {}", n)?,
            (TokenKind::FloatConst, TokenValue::Float(x)) => write!(f, "float literal {}", x)?,
            (TokenKind::StringLiteral, TokenValue::Text(s)) => {
                write!(f, "string literal \"{}\"", s)?
            }
            (TokenKind::CharLiteral, TokenValue::Char(c)) => write!(f, "char literal '{}'", c)?,
            (TokenKind::Eof, _) => write!(f, "end of file")?,
            _ => write!(f, "'{}'", self.lexeme())?,
        }
        write!(f, " at line {}, column {}", self.location.line, self.location.column)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for clike source code
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, ending with a single `Eof` token
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Next token without consuming it
    pub fn peek_token(&mut self) -> Result<Token, LexError> {
        let saved = (self.position, self.line, self.column);
        let token = self.next_token();
        (self.position, self.line, self.column) = saved;
        token
    }

    /// Produce the next token; returns `Eof` forever once input is exhausted
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let loc = self.current_location();
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, TokenValue::None, loc)),
        };

        if ch.is_alphabetic() || ch == '_' {
            return Ok(self.identifier_or_keyword(loc));
        }

        if ch.is_ascii_digit() {
            return self.number_literal(loc);
        }

        match ch {
            '"' => return Ok(self.string_literal(loc)),
            '\'' => return self.char_literal(loc),
            _ => {}
        }

        if let Some(next) = self.peek_ahead(1) {
            if let Some(kind) = TokenKind::double(ch, next) {
                self.advance();
                self.advance();
                let text: String = [ch, next].iter().collect();
                return Ok(Token::new(kind, TokenValue::Text(text), loc));
            }
        }

        match TokenKind::single(ch) {
            Some(kind) => {
                self.advance();
                Ok(Token::new(kind, TokenValue::Text(ch.to_string()), loc))
            }
            None => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal; an unterminated one runs to the end of input
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        self.advance(); // opening quote
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            if ch == '"' {
                break;
            }
            string.push(ch);
        }

        Token::new(TokenKind::StringLiteral, TokenValue::Text(string), loc)
    }

    /// Parse character literal: exactly one character between single quotes
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        self.advance(); // opening quote

        let value = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file in character literal".to_string(),
            location: loc,
        })?;

        if self.peek() != Some('\'') {
            return Err(LexError {
                message: "Expected closing quote in character literal".to_string(),
                location: self.current_location(),
            });
        }
        self.advance();

        Ok(Token::new(TokenKind::CharLiteral, TokenValue::Char(value), loc))
    }

    /// Parse numeric literal: digits, optionally `.` and more digits
    fn number_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = self.take_digits();
        let is_float = self.peek() == Some('.');

        if is_float {
            self.advance();
            num_str.push('.');
            num_str.push_str(&self.take_digits());

            let value = num_str.parse::<f64>().map_err(|_| LexError {
                message: format!("Invalid float literal: {}", num_str),
                location: loc,
            })?;
            return Ok(Token::new(TokenKind::FloatConst, TokenValue::Float(value), loc));
        }

        let value = num_str.parse::<i64>().map_err(|_| LexError {
            message: format!("Invalid integer literal: {}", num_str),
            location: loc,
        })?;
        Ok(Token::new(TokenKind::IntConst, TokenValue::Int(value), loc))
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.advance();
        }
        digits
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let lowered = ident.to_lowercase();
        match TokenKind::keyword(&lowered) {
            Some(kind) => Token::new(kind, TokenValue::Text(lowered), loc),
            None => Token::new(TokenKind::Ident, TokenValue::Text(ident), loc),
        }
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
