//! Symbols and scoped symbol tables
//!
//! A [`Scope`] maps names to [`Symbol`]s and remembers insertion order so the
//! `--scope` dump lists symbols in the order they were declared. Scopes do not
//! point at their parent; the analyzer keeps them on a stack and walks it
//! outward for lookups.

use crate::parser::ast::TypeSpec;
use rustc_hash::FxHashMap;
use std::fmt;

/// Anything a name can resolve to during analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Var {
        name: String,
        var_type: TypeSpec,
    },
    Function {
        name: String,
        return_type: TypeSpec,
        params: Vec<(String, TypeSpec)>,
    },
    BuiltinType(TypeSpec),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Var { name, .. } | Symbol::Function { name, .. } => name,
            Symbol::BuiltinType(spec) => spec.name(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Var { name, var_type } => write!(f, "var {}: {}", name, var_type),
            Symbol::Function {
                name,
                return_type,
                params,
            } => {
                let params: Vec<String> = params
                    .iter()
                    .map(|(param, spec)| format!("{}: {}", param, spec))
                    .collect();
                write!(f, "fn {}({}) -> {}", name, params.join(", "), return_type)
            }
            Symbol::BuiltinType(spec) => write!(f, "type {}", spec),
        }
    }
}

/// One level of lexical scope
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub level: usize,
    symbols: FxHashMap<String, Symbol>,
    order: Vec<String>,
}

impl Scope {
    pub fn new(name: impl Into<String>, level: usize) -> Self {
        Scope {
            name: name.into(),
            level,
            symbols: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Scope seeded with every built-in type
    pub fn global() -> Self {
        let mut scope = Scope::new("global", 1);
        for spec in TypeSpec::BUILTINS {
            scope.insert(Symbol::BuiltinType(spec));
        }
        scope
    }

    /// Insert or silently replace; a replaced name keeps its original position
    pub fn insert(&mut self, symbol: Symbol) {
        let name = symbol.name().to_string();
        if self.symbols.insert(name.clone(), symbol).is_none() {
            self.order.push(name);
        }
    }

    /// Lookup in this scope only
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.order.iter().filter_map(|name| self.symbols.get(name))
    }

    /// Multi-line table dump naming the enclosing scope
    pub fn dump(&self, enclosing: Option<&str>) -> String {
        let heading = format!(" {} SCOPE ", self.name.to_uppercase());
        let mut lines = vec![heading.clone(), "=".repeat(heading.len())];
        for symbol in self.symbols() {
            lines.push(format!("{}: {}", symbol.name(), symbol));
        }
        lines.push(format!("Enclosing scope: {}", enclosing.unwrap_or("None")));
        lines.join("\n")
    }
}
