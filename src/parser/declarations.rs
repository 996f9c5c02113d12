//! Declaration parsing implementation
//!
//! This module handles parsing of declarations in clike programs:
//!
//! - Function definitions: `type name(params) { ... }`
//! - Type specifiers: `int`, `float`, `char`, `string`, `void`
//! - Function parameters, including unsized array parameters `int a[]`
//! - Variable declarations with optional initializers and fixed-size arrays
//!
//! # Grammar
//!
//! ```text
//! function_decl ::= type_spec identifier "(" param_list? ")" compound
//! param_list    ::= param ("," param)*
//! param         ::= type_spec identifier ("[" "]")?
//! declarations  ::= (decl_type declarator ("," declarator)* ";")*
//! declarator    ::= identifier "[" INTEGER_CONST "]" | identifier ("=" expr)?
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{TokenKind, TokenValue};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse function definition: type name(params) { body }
    pub(crate) fn parse_function_decl(&mut self) -> Result<FunctionDecl, ParseError> {
        let location = self.current_location();
        let return_type = self.parse_type_spec()?;
        let (name, _) = self.expect_identifier()?;

        self.tracer
            .debug(|| format!("Parser: Function declaration '{}'", name));

        self.expect(TokenKind::LParen)?;
        let params = if self.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_param_list()?
        };
        self.expect(TokenKind::RParen)?;

        let body = self.parse_compound()?;

        Ok(FunctionDecl {
            return_type,
            name,
            params,
            body,
            location,
        })
    }

    fn parse_param_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = vec![self.parse_param()?];
        while self.check(TokenKind::Comma) {
            self.advance()?;
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let param_type = self.parse_type_spec()?;
        let (name, location) = self.expect_identifier()?;

        // `int a[]` passes an array; the parameter keeps its element type
        if self.check(TokenKind::LBracket) {
            self.advance()?;
            self.expect(TokenKind::RBracket)?;
        }

        Ok(Param {
            name,
            param_type,
            location,
        })
    }

    /// Parse a type specifier, `void` included
    pub(crate) fn parse_type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        let spec = match self.current.kind {
            TokenKind::Int => TypeSpec::Int,
            TokenKind::Float => TypeSpec::Float,
            TokenKind::Char => TypeSpec::Char,
            TokenKind::String => TypeSpec::Str,
            TokenKind::Void => TypeSpec::Void,
            _ => return Err(self.unexpected("type specifier")),
        };
        self.advance()?;
        Ok(spec)
    }

    /// Parse the run of declaration statements at the top of a block
    pub(crate) fn parse_declarations(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut nodes = Vec::new();
        while self.current.kind.starts_declaration() {
            nodes.extend(self.parse_declaration_statement()?);
        }
        Ok(nodes)
    }

    /// `decl_type declarator ("," declarator)* ";"`
    pub(crate) fn parse_declaration_statement(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let nodes = self.parse_declarator_list()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(nodes)
    }

    /// `decl_type declarator ("," declarator)*`, without the terminator.
    /// Shared with `for` initializers.
    pub(crate) fn parse_declarator_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        if !self.current.kind.starts_declaration() {
            return Err(self.unexpected("variable type"));
        }
        let var_type = self.parse_type_spec()?;

        let mut nodes = Vec::new();
        self.parse_declarator(var_type, &mut nodes)?;
        while self.check(TokenKind::Comma) {
            self.advance()?;
            self.parse_declarator(var_type, &mut nodes)?;
        }
        Ok(nodes)
    }

    fn parse_declarator(
        &mut self,
        var_type: TypeSpec,
        nodes: &mut Vec<Stmt>,
    ) -> Result<(), ParseError> {
        let (name, location) = self.expect_identifier()?;

        if self.check(TokenKind::LBracket) {
            self.advance()?;
            let size = self.parse_array_size()?;
            self.expect(TokenKind::RBracket)?;

            self.tracer
                .debug(|| format!("Parser: Array declaration {}[{}]", name, size));
            nodes.push(Stmt::ArrayDecl {
                name,
                elem_type: var_type,
                size,
                location,
            });
            return Ok(());
        }

        self.tracer
            .debug(|| format!("Parser: Variable declaration '{}'", name));
        nodes.push(Stmt::VarDecl {
            name: name.clone(),
            var_type,
            location,
        });

        if self.check(TokenKind::Assign) {
            let assign_location = self.current_location();
            self.advance()?;
            let value = self.parse_expr()?;
            nodes.push(Stmt::Assign {
                target: LValue::Var { name, location },
                value,
                location: assign_location,
            });
        }

        Ok(())
    }

    fn parse_array_size(&mut self) -> Result<usize, ParseError> {
        match self.current.value {
            TokenValue::Int(n) if self.check(TokenKind::IntConst) && n >= 0 => {
                self.advance()?;
                Ok(n as usize)
            }
            _ => Err(self.unexpected("array size")),
        }
    }
}
