//! Translation-time expression evaluation.
//!
//! Evaluation takes an index into the binding table rather than holding a
//! long-lived `&mut Bindings` across recursive calls — `eval` needs to look
//! bindings up *and* mutate their evaluation status while it is itself
//! called from within a binding's own evaluation, which a borrowed
//! reference threaded through the recursion can't express without upsetting
//! the borrow checker. Passing `&mut Bindings` and `&mut Memory` down fresh
//! at each call sidesteps that.

use crate::binding::Bindings;
use crate::error::{Diagnostic, Location, Result};
use crate::memory::Memory;
use crate::parser::ast::{BinOpKind, Expr};
use crate::word::Word;

pub fn eval<'a>(
    expr: &Expr<'a>,
    bindings: &mut Bindings<'a>,
    memory: &mut Memory,
    location: Location<'a>,
) -> Result<Word> {
    match expr {
        Expr::LitInt(v) => Ok(Word::Int(*v)),
        Expr::LitFloat(v) => Ok(Word::Float(*v)),
        Expr::LitChar(c) => Ok(Word::Int(*c as u64)),
        Expr::LitStr(s) => Ok(Word::Int(memory.push_string(s))),
        Expr::Binding(name) => {
            let idx = bindings
                .resolve(name)
                .ok_or_else(|| Diagnostic::new(location, format!("could not find binding `{name}`")))?;
            eval_binding(idx, bindings, memory, location)
        }
        Expr::BinaryOp { kind, left, right } => {
            let left = eval(left, bindings, memory, location)?;
            let right = eval(right, bindings, memory, location)?;
            match kind {
                // Compile-time sum only works with integers; mixing in a
                // float value reads its IEEE-754 bit pattern as an integer
                // rather than promoting the operation to floating point.
                BinOpKind::Plus => Ok(Word::Int(left.as_u64().wrapping_add(right.as_u64()))),
                BinOpKind::Gt => Ok(Word::Int((left.as_u64() > right.as_u64()) as u64)),
            }
        }
        Expr::Funcall { name, args } => eval_funcall(name, args, bindings, memory, location),
    }
}

pub fn eval_binding<'a>(
    index: usize,
    bindings: &mut Bindings<'a>,
    memory: &mut Memory,
    location: Location<'a>,
) -> Result<Word> {
    match bindings.begin_eval(index)? {
        None => Ok(bindings.get(index).value()),
        Some(expr) => {
            let value = eval(&expr, bindings, memory, location)?;
            bindings.finish_eval(index, value);
            Ok(value)
        }
    }
}

fn eval_funcall<'a>(
    name: &str,
    args: &[Expr<'a>],
    bindings: &mut Bindings<'a>,
    memory: &mut Memory,
    location: Location<'a>,
) -> Result<Word> {
    match name {
        "len" => {
            if args.len() != 1 {
                return Err(Diagnostic::new(
                    location,
                    format!("len() expects 1 argument but got {}", args.len()),
                ));
            }
            let addr = eval(&args[0], bindings, memory, location)?.as_u64();
            let length = memory.string_length_by_addr(addr).ok_or_else(|| {
                Diagnostic::new(
                    location,
                    format!("could not compute the length of string at address {addr}"),
                )
            })?;
            Ok(Word::Int(length))
        }
        other => Err(Diagnostic::new(
            location,
            format!("unknown translation time function `{other}`"),
        )),
    }
}
