//! Scope-checking pass over the AST
//!
//! The analyzer keeps a stack of [`Scope`]s: the global scope at the bottom and
//! one scope per function while that function's body is visited. Lookups walk
//! the stack from the top down. `main`'s block is checked in the global scope.
//!
//! Checks performed:
//! - every variable, array and call target resolves to a declared symbol
//! - call sites pass exactly as many arguments as the callee declares
//! - a float literal is never assigned directly to an `int` variable
//!
//! Functions are registered just before their own body is visited, so a
//! function can call itself and any function declared earlier, but not one
//! declared later.

use super::errors::SemanticError;
use super::symbols::{Scope, Symbol};
use crate::diagnostics::{Channel, Tracer};
use crate::parser::ast::*;

pub struct SemanticAnalyzer {
    scopes: Vec<Scope>,
    tracer: Tracer,
}

impl SemanticAnalyzer {
    pub fn new(tracer: Tracer) -> Self {
        SemanticAnalyzer {
            scopes: Vec::new(),
            tracer,
        }
    }

    /// Check a whole program
    pub fn analyze(&mut self, program: &Program) -> Result<(), SemanticError> {
        self.scopes.clear();
        self.scopes.push(Scope::global());

        let result = self.visit_program(program);

        if result.is_ok() {
            self.close_scope();
        }
        self.scopes.clear();
        result
    }

    fn visit_program(&mut self, program: &Program) -> Result<(), SemanticError> {
        for function in &program.functions {
            self.visit_function(function)?;
        }

        self.tracer.debug(|| "Analyzer: Checking main block");
        for declaration in &program.main_block.declarations {
            self.visit_stmt(declaration)?;
        }
        self.visit_compound(&program.main_block.body)
    }

    fn visit_function(&mut self, function: &FunctionDecl) -> Result<(), SemanticError> {
        self.tracer
            .debug(|| format!("Analyzer: Checking function '{}'", function.name));

        let params: Vec<(String, TypeSpec)> = function
            .params
            .iter()
            .map(|p| (p.name.clone(), p.param_type))
            .collect();
        self.current_scope().insert(Symbol::Function {
            name: function.name.clone(),
            return_type: function.return_type,
            params: params.clone(),
        });

        let level = self.current_scope().level + 1;
        self.scopes.push(Scope::new(function.name.clone(), level));
        for (name, var_type) in params {
            self.current_scope().insert(Symbol::Var { name, var_type });
        }

        self.visit_compound(&function.body)?;
        self.close_scope();
        Ok(())
    }

    /// Pop the innermost scope, dumping it first
    fn close_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            let enclosing = self.scopes.last().map(|s| s.name.as_str());
            self.tracer.trace(Channel::Scope, || scope.dump(enclosing));
        }
    }

    fn visit_compound(&mut self, compound: &Compound) -> Result<(), SemanticError> {
        for child in &compound.children {
            self.visit_stmt(child)?;
        }
        Ok(())
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl { name, var_type, .. } => {
                self.current_scope().insert(Symbol::Var {
                    name: name.clone(),
                    var_type: *var_type,
                });
                Ok(())
            }
            Stmt::ArrayDecl {
                name, elem_type, ..
            } => {
                self.current_scope().insert(Symbol::Var {
                    name: name.clone(),
                    var_type: *elem_type,
                });
                Ok(())
            }
            Stmt::Assign { target, value, .. } => self.visit_assign(target, value),
            Stmt::Compound(compound) => self.visit_compound(compound),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(condition)?;
                self.visit_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.visit_stmt(else_branch)?;
                }
                Ok(())
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.visit_expr(condition)?;
                self.visit_stmt(body)
            }
            Stmt::For {
                init,
                condition,
                post,
                body,
                ..
            } => {
                self.visit_stmt(init)?;
                self.visit_expr(condition)?;
                self.visit_stmt(post)?;
                self.visit_stmt(body)
            }
            Stmt::Print { expr, .. } => self.visit_expr(expr),
            Stmt::Return { expr, .. } => match expr {
                Some(expr) => self.visit_expr(expr),
                None => Ok(()),
            },
            Stmt::Call(call) => self.visit_call(call),
            Stmt::NoOp => Ok(()),
        }
    }

    fn visit_assign(&mut self, target: &LValue, value: &Expr) -> Result<(), SemanticError> {
        self.visit_expr(value)?;

        match target {
            LValue::Var { name, location } => {
                self.resolve(name, *location)?;
                let is_int_var = matches!(
                    self.lookup(name),
                    Some(Symbol::Var {
                        var_type: TypeSpec::Int,
                        ..
                    })
                );
                if is_int_var && matches!(value, Expr::Num(Number::Float(_), _)) {
                    return Err(SemanticError::FloatToInt {
                        name: name.clone(),
                        location: *location,
                    });
                }
                Ok(())
            }
            LValue::Index {
                name,
                index,
                location,
            } => {
                self.resolve(name, *location)?;
                self.visit_expr(index)
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left)?;
                self.visit_expr(right)
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Var { name, location } => self.resolve(name, *location),
            Expr::ArrayAccess {
                name,
                index,
                location,
            } => {
                self.resolve(name, *location)?;
                self.visit_expr(index)
            }
            Expr::Num(..) | Expr::Str(..) | Expr::Char(..) => Ok(()),
            Expr::Call(call) => self.visit_call(call),
        }
    }

    fn visit_call(&mut self, call: &Call) -> Result<(), SemanticError> {
        let expected = match self.lookup(&call.name) {
            Some(Symbol::Function { params, .. }) => params.len(),
            _ => {
                return Err(SemanticError::IdNotFound {
                    name: call.name.clone(),
                    location: call.location,
                })
            }
        };

        if expected != call.args.len() {
            return Err(SemanticError::ArgCountMismatch {
                name: call.name.clone(),
                expected,
                got: call.args.len(),
                location: call.location,
            });
        }

        for arg in &call.args {
            self.visit_expr(arg)?;
        }
        Ok(())
    }

    fn resolve(&self, name: &str, location: SourceLocation) -> Result<(), SemanticError> {
        match self.lookup(name) {
            Some(_) => Ok(()),
            None => Err(SemanticError::IdNotFound {
                name: name.to_string(),
                location,
            }),
        }
    }

    /// Innermost-first lookup through every open scope
    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn current_scope(&mut self) -> &mut Scope {
        // analyze() always opens the global scope before visiting anything
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{RecordingSink, TraceConfig};
    use crate::parser::Parser;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn analyze(source: &str) -> Result<(), SemanticError> {
        let program = Parser::new(source).unwrap().parse_program().unwrap();
        SemanticAnalyzer::new(Tracer::disabled()).analyze(&program)
    }

    #[test]
    fn test_valid_program() {
        let source = "int fact(int n) { if (n <= 1) return 1; return n * fact(n - 1); }\n\
                      int main() { int a[3]; a[0] = fact(5); print(a[0]); }";
        assert_eq!(analyze(source), Ok(()));
    }

    #[test]
    fn test_undeclared_variable() {
        let err = analyze("int main() { x = 1; }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, location } if name == "x" && location == SourceLocation::new(1, 14)));
    }

    #[test]
    fn test_arg_count_mismatch() {
        let err = analyze("int f(int a) { return a; } int main() { print(f(1, 2)); }").unwrap_err();
        assert!(matches!(
            err,
            SemanticError::ArgCountMismatch { expected: 1, got: 2, .. }
        ));
    }

    #[test]
    fn test_undeclared_array_read() {
        let err = analyze("int main() { print(b[0]); }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "b"));
    }

    #[test]
    fn test_undeclared_index() {
        let err = analyze("int main() { int a[2]; a[i] = 1; }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "i"));

        let err = analyze("int main() { int a[2]; print(a[j + 1]); }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "j"));
    }

    #[test]
    fn test_undeclared_call_argument() {
        let source = "int f(int a) { return a; } int main() { print(f(y)); }";
        let err = analyze(source).unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "y"));

        let err = analyze("void g(int a) { } int main() { g(1 + z); }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "z"));
    }

    #[test]
    fn test_forward_call_rejected() {
        let err = analyze("int f() { return g(); } int g() { return 1; } int main() { }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "g"));
    }

    #[test]
    fn test_calling_a_variable_is_not_found() {
        let err = analyze("int main() { int f; f(); }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "f"));
    }

    #[test]
    fn test_float_literal_into_int() {
        let err = analyze("int main() { int x; x = 2.5; }").unwrap_err();
        assert!(matches!(err, SemanticError::FloatToInt { ref name, .. } if name == "x"));

        // Only a bare float literal is rejected
        assert_eq!(analyze("int main() { int x; float y; x = y; x = 1 + 2.5; }"), Ok(()));
        assert_eq!(analyze("int main() { float y; y = 2.5; }"), Ok(()));
    }

    #[test]
    fn test_main_sees_function_scope_only_lexically() {
        // a parameter is not visible from main
        let err = analyze("void f(int p) { } int main() { print(p); }").unwrap_err();
        assert!(matches!(err, SemanticError::IdNotFound { ref name, .. } if name == "p"));
    }

    #[test]
    fn test_scope_dumps() {
        let sink = Rc::new(RefCell::new(RecordingSink::default()));
        let config = TraceConfig {
            scope: true,
            ..TraceConfig::default()
        };
        let program = Parser::new("int id(int v) { return v; } int main() { int x; x = id(1); }")
            .unwrap()
            .parse_program()
            .unwrap();

        SemanticAnalyzer::new(Tracer::new(config, sink.clone()))
            .analyze(&program)
            .unwrap();

        let sink = sink.borrow();
        let dumps = sink.channel(Channel::Scope);
        assert_eq!(dumps.len(), 2);
        assert!(dumps[0].starts_with(" ID SCOPE "));
        assert!(dumps[0].contains("v: var v: int"));
        assert!(dumps[0].ends_with("Enclosing scope: global"));
        assert!(dumps[1].starts_with(" GLOBAL SCOPE "));
        assert!(dumps[1].contains("id: fn id(v: int) -> int"));
        assert!(dumps[1].contains("x: var x: int"));
        assert!(dumps[1].ends_with("Enclosing scope: None"));
    }
}
