//! Call stack implementation
//!
//! This module provides the call stack for function execution:
//! - [`CallStack`]: the stack of activation records
//! - [`ActivationRecord`]: one program or function invocation
//! - [`Member`]: a name bound in a record, either a value or a function
//!
//! # Lookup Rules
//!
//! Variable reads and writes only ever touch the top record; a function cannot
//! see the caller's variables, not even `main`'s. Function members are the one
//! exception: calls search every record from the top down, which is how
//! functions registered in the program record stay callable at any depth.

use super::value::Value;
use crate::parser::ast::FunctionDecl;
use rustc_hash::FxHashMap;
use std::fmt;

/// A name bound in an activation record
#[derive(Debug, Clone)]
pub enum Member<'a> {
    Value(Value),
    Function(&'a FunctionDecl),
}

impl fmt::Display for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Value(value) => write!(f, "{}", value),
            Member::Function(decl) => write!(f, "<function {}>", decl.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Program,
    Function,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Program => write!(f, "PROGRAM"),
            FrameKind::Function => write!(f, "FUNCTION"),
        }
    }
}

/// Activation record for the program or a function call
#[derive(Debug, Clone)]
pub struct ActivationRecord<'a> {
    pub name: String,
    pub kind: FrameKind,
    pub level: usize,
    members: FxHashMap<String, Member<'a>>,
}

impl<'a> ActivationRecord<'a> {
    pub fn new(name: impl Into<String>, kind: FrameKind, level: usize) -> Self {
        ActivationRecord {
            name: name.into(),
            kind,
            level,
            members: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Member<'a>> {
        self.members.get(name)
    }

    /// Value bound to `name`; functions and unbound names read as [`Value::Void`]
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.members.get(name) {
            Some(Member::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.members.insert(name.into(), Member::Value(value));
    }

    pub fn define_function(&mut self, decl: &'a FunctionDecl) {
        self.members
            .insert(decl.name.clone(), Member::Function(decl));
    }

    pub fn function(&self, name: &str) -> Option<&'a FunctionDecl> {
        match self.members.get(name) {
            Some(Member::Function(decl)) => Some(*decl),
            _ => None,
        }
    }
}

impl fmt::Display for ActivationRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AR {} {} level {}", self.kind, self.name, self.level)?;
        write!(f, "{}", "=".repeat(40))?;

        let mut names: Vec<&String> = self.members.keys().collect();
        names.sort();
        for name in names {
            write!(f, "\n{}: {}", name, self.members[name])?;
        }
        Ok(())
    }
}

/// The call stack
#[derive(Debug, Clone, Default)]
pub struct CallStack<'a> {
    records: Vec<ActivationRecord<'a>>,
}

impl<'a> CallStack<'a> {
    pub fn new() -> Self {
        CallStack {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ActivationRecord<'a>) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<ActivationRecord<'a>> {
        self.records.pop()
    }

    /// Get the current (top) record
    pub fn peek(&self) -> Option<&ActivationRecord<'a>> {
        self.records.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut ActivationRecord<'a>> {
        self.records.last_mut()
    }

    /// Search every record, innermost first, for a function member
    pub fn find_function(&self, name: &str) -> Option<&'a FunctionDecl> {
        self.records.iter().rev().find_map(|ar| ar.function(name))
    }

    /// Every record, top of the stack first
    pub fn dump(&self) -> String {
        let mut out = String::from("CALL STACK:");
        for record in self.records.iter().rev() {
            out.push_str(&format!("\n{}\n---", record));
        }
        out
    }
}
