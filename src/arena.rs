//! Bump allocator owning all interned source text and parsed-expression
//! storage for the lifetime of a translation.
//!
//! One `Arena` is created per top-level `translate_file` call and shared
//! across every `%include` it pulls in, so a label or expression tree parsed
//! out of an included file remains valid for as long as the translator that
//! produced it.

use std::fs;
use std::io;

use bumpalo::Bump;

use crate::parser::ast::Expr;

pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Intern a string slice, returning a copy that lives as long as the arena.
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Intern an expression tree node (used for `BinaryOp` operands).
    pub fn alloc_expr(&self, expr: Expr<'_>) -> &Expr<'_> {
        self.bump.alloc(expr)
    }

    /// Intern a funcall argument list.
    pub fn alloc_exprs<'a>(&'a self, exprs: Vec<Expr<'a>>) -> &'a [Expr<'a>] {
        self.bump.alloc_slice_fill_iter(exprs)
    }

    /// Read a file fully and intern its contents, so the returned `&str`
    /// outlives the call that read it for as long as the arena lives.
    pub fn slurp_file(&self, path: &str) -> io::Result<&str> {
        let contents = fs::read_to_string(path)?;
        Ok(self.alloc_str(&contents))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
