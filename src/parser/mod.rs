//! Recursive-descent parser for basm expressions.
//!
//! Grammar (right-associative `+` and `>`, by construction — see `parse_sum`
//! and `parse_gt`):
//!
//! ```text
//! expr      := gt
//! gt        := sum ( '>' gt )?
//! sum       := primary ( '+' sum )?
//! primary   := STRING | CHAR | NUMBER | name-or-funcall | '-' NUMBER
//! name-or-funcall := NAME ( '(' args ')' )?
//! args      := ε | expr (',' expr)*
//! ```
//!
//! Parenthesized sub-expressions are not supported in `primary` — `(` is
//! only ever consumed as part of a funcall's argument list.

pub mod ast;


use crate::arena::Arena;
use crate::error::{Diagnostic, Location, Result};
use crate::lexer::token::{Token, TokenKind};
use ast::{BinOpKind, Expr};

pub fn parse_expr<'a>(
    tokens: &[Token<'a>],
    arena: &'a Arena,
    location: Location<'_>,
) -> Result<Expr<'a>> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        arena,
        location,
    };
    let expr = parser.parse_gt()?;
    if parser.pos != parser.tokens.len() {
        return Err(Diagnostic::new(
            location,
            format!("unexpected token after expression: `{}`", parser.tokens[parser.pos].text),
        ));
    }
    Ok(expr)
}

struct Parser<'a, 'loc> {
    tokens: &'a [Token<'a>],
    pos: usize,
    arena: &'a Arena,
    location: Location<'loc>,
}

impl<'a, 'loc> Parser<'a, 'loc> {
    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token<'a>> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn err(&self, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(self.location, message)
    }

    fn parse_gt(&mut self) -> Result<Expr<'a>> {
        let left = self.parse_sum()?;
        if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Gt)) {
            self.advance();
            let right = self.parse_gt()?;
            return Ok(Expr::BinaryOp {
                kind: BinOpKind::Gt,
                left: self.arena.alloc_expr(left),
                right: self.arena.alloc_expr(right),
            });
        }
        Ok(left)
    }

    fn parse_sum(&mut self) -> Result<Expr<'a>> {
        let left = self.parse_primary()?;
        if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Plus)) {
            self.advance();
            let right = self.parse_sum()?;
            return Ok(Expr::BinaryOp {
                kind: BinOpKind::Plus,
                left: self.arena.alloc_expr(left),
                right: self.arena.alloc_expr(right),
            });
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr<'a>> {
        let tok = *self
            .advance()
            .ok_or_else(|| self.err("expected primary expression"))?;

        match tok.kind {
            TokenKind::Str => Ok(Expr::LitStr(tok.text)),
            TokenKind::Char => {
                let bytes = tok.text.as_bytes();
                if bytes.len() != 1 {
                    return Err(self.err(format!(
                        "char literal must be exactly one byte, got `{}`",
                        tok.text
                    )));
                }
                Ok(Expr::LitChar(bytes[0]))
            }
            TokenKind::Number => self.parse_number(tok.text),
            TokenKind::Name => self.parse_name_or_funcall(tok.text),
            TokenKind::Minus => {
                let next = self
                    .advance()
                    .ok_or_else(|| self.err("expected number after unary `-`"))?;
                if next.kind != TokenKind::Number {
                    return Err(self.err("expected number after unary `-`"));
                }
                match self.parse_number(next.text)? {
                    Expr::LitInt(v) => Ok(Expr::LitInt(v.wrapping_neg())),
                    Expr::LitFloat(v) => Ok(Expr::LitFloat(-v)),
                    _ => unreachable!("parse_number only returns LitInt/LitFloat"),
                }
            }
            _ => Err(self.err("expected primary expression")),
        }
    }

    fn parse_number(&self, text: &str) -> Result<Expr<'a>> {
        if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            return u64::from_str_radix(hex, 16)
                .map(Expr::LitInt)
                .map_err(|_| self.err(format!("`{text}` is not a hex literal")));
        }
        if let Ok(v) = text.parse::<u64>() {
            return Ok(Expr::LitInt(v));
        }
        if let Ok(v) = text.parse::<f64>() {
            return Ok(Expr::LitFloat(v));
        }
        Err(self.err(format!("`{text}` is not a number literal")))
    }

    fn parse_name_or_funcall(&mut self, name: &'a str) -> Result<Expr<'a>> {
        if !matches!(self.peek().map(|t| t.kind), Some(TokenKind::OpenParen)) {
            return Ok(Expr::Binding(name));
        }
        self.advance(); // '('
        let mut args = Vec::new();
        if !matches!(self.peek().map(|t| t.kind), Some(TokenKind::CloseParen)) {
            loop {
                args.push(self.parse_gt()?);
                match self.peek().map(|t| t.kind) {
                    Some(TokenKind::Comma) => {
                        self.advance();
                    }
                    Some(TokenKind::CloseParen) => break,
                    _ => return Err(self.err("expected `,` or `)` in argument list")),
                }
            }
        }
        match self.advance().map(|t| t.kind) {
            Some(TokenKind::CloseParen) => {}
            _ => return Err(self.err("expected `)` to close argument list")),
        }
        Ok(Expr::Funcall {
            name,
            args: self.arena.alloc_exprs(args),
        })
    }
}
