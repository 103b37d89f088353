//! The binding table: names bound by `%const`, `%native`, and label
//! declarations.
//!
//! A single insertion-ordered `Vec`, linear-scanned on lookup — the same
//! choice the teacher's symbol table makes, for the same reason: basm
//! programs bind at most a few hundred names, so a `HashMap`'s overhead
//! buys nothing a `Vec` scan doesn't already give for free, and insertion
//! order is what a binding dump would want to preserve anyway.

use crate::error::{Diagnostic, Location};
use crate::parser::ast::Expr;
use crate::word::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Const,
    Label,
    Native,
}

impl BindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Const => "constant",
            BindingKind::Label => "label",
            BindingKind::Native => "native function",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Unevaluated,
    Evaluating,
    Evaluated,
}

#[derive(Debug, Clone)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub kind: BindingKind,
    pub location: Location<'a>,
    value: Word,
    expr: Option<Expr<'a>>,
    status: Status,
}

impl<'a> Binding<'a> {
    pub fn value(&self) -> Word {
        self.value
    }
}

#[derive(Debug, Default)]
pub struct Bindings<'a> {
    entries: Vec<Binding<'a>>,
}

impl<'a> Bindings<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|b| b.name == name)
    }

    pub fn get(&self, index: usize) -> &Binding<'a> {
        &self.entries[index]
    }

    /// Binds `name` to an already-evaluated `value`. Errors (with a NOTE
    /// pointing at the first definition) if the name is already bound.
    pub fn bind_value(
        &mut self,
        name: &'a str,
        value: Word,
        kind: BindingKind,
        location: Location<'a>,
    ) -> crate::error::Result<()> {
        self.check_unbound(name, location)?;
        self.entries.push(Binding {
            name,
            kind,
            location,
            value,
            expr: None,
            status: Status::Evaluated,
        });
        Ok(())
    }

    /// Binds `name` to an expression that is evaluated lazily, the first
    /// time something asks for its value.
    pub fn bind_expr(
        &mut self,
        name: &'a str,
        expr: Expr<'a>,
        kind: BindingKind,
        location: Location<'a>,
    ) -> crate::error::Result<()> {
        self.check_unbound(name, location)?;
        self.entries.push(Binding {
            name,
            kind,
            location,
            value: Word::Int(0),
            expr: Some(expr),
            status: Status::Unevaluated,
        });
        Ok(())
    }

    fn check_unbound(&self, name: &str, location: Location<'a>) -> crate::error::Result<()> {
        if let Some(idx) = self.resolve(name) {
            let existing = &self.entries[idx];
            return Err(Diagnostic::new(
                location,
                format!("name `{name}` is already bound"),
            )
            .with_note(existing.location, "first binding is located here"));
        }
        Ok(())
    }

    /// Marks the binding at `index` as mid-evaluation, returning an error
    /// if it is already in that state (a cyclic definition). Returns the
    /// binding's expression to evaluate, if it hasn't been evaluated yet.
    pub fn begin_eval(&mut self, index: usize) -> crate::error::Result<Option<Expr<'a>>> {
        let binding = &mut self.entries[index];
        match binding.status {
            Status::Evaluating => Err(Diagnostic::new(
                binding.location,
                "cyclic binding definition",
            )),
            Status::Evaluated => Ok(None),
            Status::Unevaluated => {
                binding.status = Status::Evaluating;
                Ok(binding.expr)
            }
        }
    }

    pub fn finish_eval(&mut self, index: usize, value: Word) {
        let binding = &mut self.entries[index];
        binding.status = Status::Evaluated;
        binding.value = value;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
