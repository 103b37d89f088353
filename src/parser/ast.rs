//! Expression tree produced by the parser and consumed by the evaluator.
//!
//! A closed, tagged-variant tree — no open polymorphism is needed since
//! basm's grammar has a fixed, small set of productions. `BinaryOp` operands
//! and `Funcall` argument lists are arena-allocated so the tree can be built
//! without a `Box` per node.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Plus,
    Gt,
}

#[derive(Debug, Clone, Copy)]
pub enum Expr<'a> {
    LitInt(u64),
    LitFloat(f64),
    LitChar(u8),
    LitStr(&'a str),
    /// An identifier that has not yet been resolved against the binding table.
    Binding(&'a str),
    BinaryOp {
        kind: BinOpKind,
        left: &'a Expr<'a>,
        right: &'a Expr<'a>,
    },
    Funcall {
        name: &'a str,
        args: &'a [Expr<'a>],
    },
}

impl<'a> Expr<'a> {
    /// Plain-text debug dump, in the spirit of a `dump_expr` helper — not
    /// the DOT/graphviz visualizer, which this crate does not implement.
    pub fn fmt_tree(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::LitInt(v) => write!(f, "{v}"),
            Expr::LitFloat(v) => write!(f, "{v}"),
            Expr::LitChar(c) => write!(f, "'{}'", *c as char),
            Expr::LitStr(s) => write!(f, "\"{s}\""),
            Expr::Binding(name) => write!(f, "{name}"),
            Expr::BinaryOp { kind, left, right } => {
                let op = match kind {
                    BinOpKind::Plus => "+",
                    BinOpKind::Gt => ">",
                };
                write!(f, "(")?;
                left.fmt_tree(f)?;
                write!(f, " {op} ")?;
                right.fmt_tree(f)?;
                write!(f, ")")
            }
            Expr::Funcall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_tree(f)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl std::fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_tree(f)
    }
}
