//! Expression parsing implementation
//!
//! One function per precedence level, loosest binding first:
//!
//! | Level       | Operators                      | Associativity |
//! |-------------|--------------------------------|---------------|
//! | logical or  | `\|\|`                         | left          |
//! | logical and | `&&`                           | left          |
//! | comparison  | `== != < <= > >=`              | none          |
//! | additive    | `+ -`                          | left          |
//! | term        | `* /`                          | left          |
//! | factor      | unary `+ -`, literals, calls   | right (unary) |
//!
//! Comparisons do not chain: `a < b < c` stops after `a < b` and the caller
//! trips over the second `<`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenValue};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.check(TokenKind::OrOr) {
            let location = self.advance()?.location;
            let right = self.parse_logical_and()?;
            left = binary(BinOp::Or, left, right, location);
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.check(TokenKind::AndAnd) {
            let location = self.advance()?.location;
            let right = self.parse_comparison()?;
            left = binary(BinOp::And, left, right, location);
        }

        Ok(left)
    }

    /// Parse a single, optional comparison
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;

        let op = match self.current.kind {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            _ => return Ok(left),
        };
        let location = self.advance()?.location;
        let right = self.parse_additive()?;

        Ok(binary(op, left, right, location))
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let location = self.advance()?.location;
            let right = self.parse_term()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            let location = self.advance()?.location;
            let right = self.parse_factor()?;
            left = binary(op, left, right, location);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();

        match self.current.kind {
            TokenKind::Plus | TokenKind::Minus => {
                let op = if self.check(TokenKind::Plus) {
                    UnOp::Plus
                } else {
                    UnOp::Neg
                };
                self.advance()?;
                let operand = Box::new(self.parse_factor()?);
                Ok(Expr::Unary {
                    op,
                    operand,
                    location,
                })
            }
            TokenKind::IntConst | TokenKind::FloatConst => {
                let token = self.advance()?;
                match token.value {
                    TokenValue::Int(n) => Ok(Expr::Num(Number::Int(n), location)),
                    TokenValue::Float(x) => Ok(Expr::Num(Number::Float(x), location)),
                    _ => Err(ParseError::UnexpectedToken {
                        token,
                        expected: "number".to_string(),
                    }),
                }
            }
            TokenKind::StringLiteral => {
                let token = self.advance()?;
                Ok(Expr::Str(token.lexeme(), location))
            }
            TokenKind::CharLiteral => {
                let token = self.advance()?;
                match token.value {
                    TokenValue::Char(c) => Ok(Expr::Char(c, location)),
                    _ => Err(ParseError::UnexpectedToken {
                        token,
                        expected: "character".to_string(),
                    }),
                }
            }
            TokenKind::Ident => {
                if self.peek_kind()? == TokenKind::LParen {
                    Ok(Expr::Call(self.parse_function_call()?))
                } else {
                    Ok(self.parse_variable()?.into())
                }
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}

fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        location,
    }
}
