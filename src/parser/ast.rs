// AST (Abstract Syntax Tree) definitions for the clike language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Types nameable in declarations, parameters and return types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    Int,
    Float,
    Char,
    Str,
    Void,
}

impl TypeSpec {
    /// Every built-in type, in the order the global scope registers them
    pub const BUILTINS: [TypeSpec; 5] = [
        TypeSpec::Int,
        TypeSpec::Char,
        TypeSpec::Str,
        TypeSpec::Void,
        TypeSpec::Float,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TypeSpec::Int => "int",
            TypeSpec::Float => "float",
            TypeSpec::Char => "char",
            TypeSpec::Str => "string",
            TypeSpec::Void => "void",
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus, // +x
    Neg,  // -x
}

/// Numeric literal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Function parameter. `int a[]` parameters are recorded by their element type.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: TypeSpec,
    pub location: SourceLocation,
}

/// Function call, usable both as a statement and as an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    pub location: SourceLocation,
}

/// Left-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Var {
        name: String,
        location: SourceLocation,
    },
    Index {
        name: String,
        index: Box<Expr>,
        location: SourceLocation,
    },
}

impl LValue {
    pub fn name(&self) -> &str {
        match self {
            LValue::Var { name, .. } | LValue::Index { name, .. } => name,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Var {
        name: String,
        location: SourceLocation,
    },
    ArrayAccess {
        name: String,
        index: Box<Expr>,
        location: SourceLocation,
    },
    Num(Number, SourceLocation),
    Str(String, SourceLocation),
    Char(char, SourceLocation),
    Call(Call),
}

impl From<LValue> for Expr {
    fn from(target: LValue) -> Self {
        match target {
            LValue::Var { name, location } => Expr::Var { name, location },
            LValue::Index {
                name,
                index,
                location,
            } => Expr::ArrayAccess {
                name,
                index,
                location,
            },
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        var_type: TypeSpec,
        location: SourceLocation,
    },
    ArrayDecl {
        name: String,
        elem_type: TypeSpec,
        size: usize,
        location: SourceLocation,
    },
    Assign {
        target: LValue,
        value: Expr,
        location: SourceLocation,
    },
    Compound(Compound),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    For {
        init: Box<Stmt>,
        condition: Expr,
        post: Box<Stmt>,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Print {
        expr: Expr,
        location: SourceLocation,
    },
    Return {
        expr: Option<Expr>,
        location: SourceLocation,
    },
    Call(Call),
    NoOp,
}

impl Stmt {
    /// Wrap a list of statements, keeping a lone statement unwrapped
    pub fn group(mut nodes: Vec<Stmt>) -> Stmt {
        if nodes.len() == 1 {
            nodes.remove(0)
        } else {
            Stmt::Compound(Compound { children: nodes })
        }
    }
}

/// Sequence of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    pub children: Vec<Stmt>,
}

/// The body of `main`: leading declarations followed by statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub declarations: Vec<Stmt>,
    pub body: Compound,
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub return_type: TypeSpec,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Compound,
    pub location: SourceLocation,
}

/// Top-level program structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<FunctionDecl>, // Included functions first, then the entry file's
    pub main_block: Block,
}
