//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, the program entry point and
//! `#include` handling.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, program and include parsing
//! - `declarations`: function declarations, parameters and variable declarations
//! - `statements`: statements (if, while, for, print, return, assignment, calls)
//! - `expressions`: expressions, one function per precedence level
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks.
//! The parser holds exactly one current token and asks the lexer for a
//! non-consuming peek when it needs to look further.

use crate::diagnostics::Tracer;
use crate::parser::ast::*;
use crate::parser::includes::{FsLoader, IncludeContext};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use std::fmt;
use std::path::PathBuf;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Malformed input reported by the lexer
    Lex(LexError),

    /// Grammar violation
    UnexpectedToken { token: Token, expected: String },

    /// An `#include` target could not be read
    FileNotFound {
        path: PathBuf,
        location: SourceLocation,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::UnexpectedToken { token, expected } => write!(
                f,
                "Parse error at line {}, column {}: Unexpected token: expected {}, found {}",
                token.location.line, token.location.column, expected, token
            ),
            ParseError::FileNotFound { path, location } => write!(
                f,
                "Parse error at line {}, column {}: File not found: '{}'",
                location.line,
                location.column,
                path.display()
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Recursive descent parser for clike
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) current: Token,
    pub(crate) tracer: Tracer,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Self::with_tracer(source, Tracer::disabled())
    }

    pub fn with_tracer(source: &str, tracer: Tracer) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            tracer,
        })
    }

    /// Parse a whole program, resolving includes against the working directory
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let loader = FsLoader;
        let mut includes = IncludeContext::new(".", &loader);
        self.parse_program_with(&mut includes)
    }

    /// Parse a whole program:
    /// `include* functionDecl* 'int' 'main' '(' ')' block EOF`
    pub fn parse_program_with(
        &mut self,
        includes: &mut IncludeContext<'_>,
    ) -> Result<Program, ParseError> {
        self.tracer.debug(|| "Parser: Parsing program");

        let mut functions = self.parse_includes(includes)?;

        while self.current.kind.starts_type() {
            if self.at_main()? {
                break;
            }
            functions.push(self.parse_function_decl()?);
        }

        self.tracer.debug(|| "Parser: Expecting int main");
        self.expect(TokenKind::Int)?;
        self.expect(TokenKind::Main)?;
        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBrace)?;
        let declarations = self.parse_declarations()?;
        let children = self.parse_statement_list()?;
        self.expect(TokenKind::RBrace)?;

        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected("end of file"));
        }

        Ok(Program {
            functions,
            main_block: Block {
                declarations,
                body: Compound { children },
            },
        })
    }

    /// Parse leading `#include "file";` directives, returning the function
    /// declarations pulled out of every newly included file
    fn parse_includes(
        &mut self,
        includes: &mut IncludeContext<'_>,
    ) -> Result<Vec<FunctionDecl>, ParseError> {
        let mut functions = Vec::new();

        while self.check(TokenKind::Hash) {
            self.advance()?;
            self.expect(TokenKind::Include)?;
            let name_token = self.expect(TokenKind::StringLiteral)?;
            let name = name_token.lexeme();
            if self.check(TokenKind::Semicolon) {
                self.advance()?;
            }

            let path = includes.resolve(&name);
            let source = includes
                .load(&path)
                .map_err(|_| ParseError::FileNotFound {
                    path: path.clone(),
                    location: name_token.location,
                })?;

            if !includes.mark_visited(&path) {
                self.tracer
                    .debug(|| format!("Parser: Skipping '{}', already included", name));
                continue;
            }

            self.tracer
                .debug(|| format!("Parser: Including file '{}'", path.display()));

            let mut included = Parser::with_tracer(&source, self.tracer.clone())?;
            functions.extend(included.parse_included_functions(includes)?);
        }

        Ok(functions)
    }

    /// Body of an included file: its own includes, then function declarations
    /// until something that cannot start a type (or `int main`) appears
    fn parse_included_functions(
        &mut self,
        includes: &mut IncludeContext<'_>,
    ) -> Result<Vec<FunctionDecl>, ParseError> {
        let mut functions = self.parse_includes(includes)?;

        while self.current.kind.starts_type() && !self.at_main()? {
            functions.push(self.parse_function_decl()?);
        }

        Ok(functions)
    }

    /// `int` followed by `main`
    fn at_main(&mut self) -> Result<bool, ParseError> {
        Ok(self.check(TokenKind::Int) && self.peek_kind()? == TokenKind::Main)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token and return it
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consume a token of `kind` or fail with `UnexpectedToken`
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        let token = self.expect(TokenKind::Ident)?;
        Ok((token.lexeme(), token.location))
    }

    /// Kind of the token after the current one, without consuming anything
    pub(crate) fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        Ok(self.lexer.peek_token()?.kind)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::UnexpectedToken {
            token: self.current.clone(),
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::includes::MemoryLoader;

    fn parse(source: &str) -> Result<Program, ParseError> {
        let loader = MemoryLoader::new();
        let mut includes = IncludeContext::new("lib", &loader);
        Parser::new(source)?.parse_program_with(&mut includes)
    }

    #[test]
    fn test_parse_minimal_program() {
        let program = parse("int main() { }").unwrap();

        assert!(program.functions.is_empty());
        assert!(program.main_block.declarations.is_empty());
        assert!(program.main_block.body.children.is_empty());
    }

    #[test]
    fn test_main_block_declarations_and_statements() {
        let program = parse("int main() { int x = 5; x = x + 3; print(x); }").unwrap();
        let block = &program.main_block;

        assert_eq!(block.declarations.len(), 2);
        assert!(matches!(&block.declarations[0], Stmt::VarDecl { name, var_type: TypeSpec::Int, .. } if name == "x"));
        assert!(matches!(&block.declarations[1], Stmt::Assign { target: LValue::Var { name, .. }, .. } if name == "x"));
        assert_eq!(block.body.children.len(), 2);
        assert!(matches!(block.body.children[1], Stmt::Print { .. }));
    }

    #[test]
    fn test_functions_before_main() {
        let source = "int add(int a, int b) { return a + b; } void noop() { } int main() { print(add(1, 2)); }";
        let program = parse(source).unwrap();

        assert_eq!(program.functions.len(), 2);
        assert_eq!(program.functions[0].name, "add");
        assert_eq!(program.functions[0].params.len(), 2);
        assert_eq!(program.functions[1].return_type, TypeSpec::Void);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse("int main() { } int").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref token, .. } if token.kind == TokenKind::Int));
    }

    #[test]
    fn test_missing_main() {
        let err = parse("int f() { }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref token, .. } if token.kind == TokenKind::Eof));
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = parse("int main() { int x; x = 1 ! 2; }").unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
    }

    #[test]
    fn test_include_merges_functions_first() {
        let loader = MemoryLoader::new()
            .with_file("lib/util.clike", "int square(int n) { return n * n; }");
        let mut includes = IncludeContext::new("lib", &loader);
        let source = "#include \"util.clike\";\nint cube(int n) { return n * square(n); }\nint main() { print(cube(2)); }";

        let program = Parser::new(source)
            .unwrap()
            .parse_program_with(&mut includes)
            .unwrap();

        let names: Vec<&str> = program.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["square", "cube"]);
    }

    #[test]
    fn test_include_semicolon_optional_and_deduplicated() {
        let loader = MemoryLoader::new().with_file("lib/util.clike", "int one() { return 1; }");
        let mut includes = IncludeContext::new("lib", &loader);
        let source = "#include \"util.clike\"\n#include \"util.clike\";\nint main() { }";

        let program = Parser::new(source)
            .unwrap()
            .parse_program_with(&mut includes)
            .unwrap();

        assert_eq!(program.functions.len(), 1);
    }

    #[test]
    fn test_include_stops_at_main_and_globals_are_ignored() {
        let loader = MemoryLoader::new().with_file(
            "lib/util.clike",
            "int one() { return 1; } int main() { print(99); }",
        );
        let mut includes = IncludeContext::new("lib", &loader);

        let program = Parser::new("#include \"util.clike\" int main() { }")
            .unwrap()
            .parse_program_with(&mut includes)
            .unwrap();

        assert_eq!(program.functions.len(), 1);
        assert!(program.main_block.body.children.is_empty());
    }

    #[test]
    fn test_nested_include_cycle() {
        let loader = MemoryLoader::new()
            .with_file("lib/a.clike", "#include \"b.clike\"\nint a() { return 1; }")
            .with_file("lib/b.clike", "#include \"a.clike\"\nint b() { return 2; }");
        let mut includes = IncludeContext::new("lib", &loader);

        let program = Parser::new("#include \"a.clike\"\nint main() { }")
            .unwrap()
            .parse_program_with(&mut includes)
            .unwrap();

        let names: Vec<&str> = program.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_include() {
        let err = parse("#include \"nope.clike\";\nint main() { }").unwrap_err();

        match err {
            ParseError::FileNotFound { path, location } => {
                assert_eq!(path, PathBuf::from("lib/nope.clike"));
                assert_eq!(location, SourceLocation::new(1, 10));
            }
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }
}
