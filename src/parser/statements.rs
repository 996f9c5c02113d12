//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Compound statements: `{ ... }`
//! - Control flow: `if`, `while`, `for`
//! - `print(expr);` and `return expr?;`
//! - Assignments to variables and array elements
//! - Function call statements
//! - Declarations appearing among statements
//!
//! Assignment, print, call and return statements consume their own trailing
//! `;`, which lets an unbraced `if`/`while`/`for` body be a single statement.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// `{ statement_list }`
    pub(crate) fn parse_compound(&mut self) -> Result<Compound, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let children = self.parse_statement_list()?;
        self.expect(TokenKind::RBrace)?;
        Ok(Compound { children })
    }

    /// Statements up to the closing brace (or end of input)
    pub(crate) fn parse_statement_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current.kind {
            TokenKind::LBrace => Ok(Stmt::Compound(self.parse_compound()?)),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Print => {
                let stmt = self.parse_print_statement()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(stmt)
            }
            TokenKind::Return => {
                let stmt = self.parse_return_statement()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(stmt)
            }
            TokenKind::Ident => {
                let stmt = if self.peek_kind()? == TokenKind::LParen {
                    Stmt::Call(self.parse_function_call()?)
                } else {
                    self.parse_assignment()?
                };
                self.expect(TokenKind::Semicolon)?;
                Ok(stmt)
            }
            kind if kind.starts_declaration() => {
                Ok(Stmt::group(self.parse_declaration_statement()?))
            }
            TokenKind::RBrace => Ok(Stmt::NoOp),
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.check(TokenKind::Else) {
            self.advance()?;
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// `for (init; cond; post) body`
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = if self.current.kind.starts_declaration() {
            self.parse_declarator_list()?
        } else {
            self.parse_assignment_list()?
        };
        self.expect(TokenKind::Semicolon)?;

        let condition = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        let post = self.parse_assignment_list()?;
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For {
            init: Box::new(Stmt::group(init)),
            condition,
            post: Box::new(Stmt::group(post)),
            body,
            location,
        })
    }

    /// Zero or more comma-separated assignments
    fn parse_assignment_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut nodes = Vec::new();
        if !self.check(TokenKind::Ident) {
            return Ok(nodes);
        }
        nodes.push(self.parse_assignment()?);
        while self.check(TokenKind::Comma) {
            self.advance()?;
            nodes.push(self.parse_assignment()?);
        }
        Ok(nodes)
    }

    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::Print)?;
        self.expect(TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(Stmt::Print { expr, location })
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::Return)?;
        let expr = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        Ok(Stmt::Return { expr, location })
    }

    /// `variable = expr`, without the terminator
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let target = self.parse_variable()?;
        let location = self.current_location();
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;

        self.tracer
            .debug(|| format!("Parser: Assignment to '{}'", target.name()));

        Ok(Stmt::Assign {
            target,
            value,
            location,
        })
    }

    /// `ID` or `ID [ expr ]`
    pub(crate) fn parse_variable(&mut self) -> Result<LValue, ParseError> {
        let (name, location) = self.expect_identifier()?;
        if !self.check(TokenKind::LBracket) {
            return Ok(LValue::Var { name, location });
        }

        self.advance()?;
        let index = Box::new(self.parse_expr()?);
        self.expect(TokenKind::RBracket)?;
        Ok(LValue::Index {
            name,
            index,
            location,
        })
    }

    /// `ID ( args? )`
    pub(crate) fn parse_function_call(&mut self) -> Result<Call, ParseError> {
        let (name, location) = self.expect_identifier()?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.check(TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.check(TokenKind::Comma) {
                self.advance()?;
                args.push(self.parse_expr()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        self.tracer.debug(|| {
            format!("Parser: Call to '{}' with {} argument(s)", name, args.len())
        });

        Ok(Call {
            name,
            args,
            location,
        })
    }
}
