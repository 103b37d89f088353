//! The two-pass translator: consumes directives, labels, and instructions
//! line by line, emitting a program and a memory segment while collecting
//! forward references ("deferred operands"), a deferred entry point, and
//! deferred assertions to resolve once the whole translation unit (plus
//! any `%include`d files) has been read.

pub mod instructions;

#[cfg(test)]
mod tests;

use crate::arena::Arena;
use crate::binding::{BindingKind, Bindings};
use crate::error::{Diagnostic, Location, Result};
use crate::eval::{eval, eval_binding};
use crate::lexer::tokenize;
use crate::memory::Memory;
use crate::parser::ast::Expr;
use crate::parser::parse_expr;
use crate::source_view::{split_first_word, strip_comment, trim};
use crate::word::Word;
use instructions::{lookup, InstType};

/// Protects against infinite `%include` cycles.
const MAX_INCLUDE_LEVEL: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct ProgramRecord {
    pub inst_type: InstType,
    pub operand: Word,
}

struct DeferredOperand<'a> {
    addr: usize,
    name: &'a str,
    location: Location<'a>,
}

struct DeferredAssert<'a> {
    expr: Expr<'a>,
    location: Location<'a>,
}

struct EntryRef<'a> {
    name: &'a str,
    location: Location<'a>,
}

pub struct Translator<'a> {
    arena: &'a Arena,
    bindings: Bindings<'a>,
    memory: Memory,
    program: Vec<ProgramRecord>,
    deferred_operands: Vec<DeferredOperand<'a>>,
    deferred_asserts: Vec<DeferredAssert<'a>>,
    entry: Option<EntryRef<'a>>,
    entry_value: u64,
    include_level: usize,
}

impl<'a> Translator<'a> {
    fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            bindings: Bindings::new(),
            memory: Memory::new(),
            program: Vec::new(),
            deferred_operands: Vec::new(),
            deferred_asserts: Vec::new(),
            entry: None,
            entry_value: 0,
            include_level: 0,
        }
    }

    pub fn program(&self) -> &[ProgramRecord] {
        &self.program
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn entry(&self) -> u64 {
        self.entry_value
    }

    fn translate_source(&mut self, path: &'a str, include_location: Option<Location<'a>>) -> Result<()> {
        let contents = self.arena.slurp_file(path).map_err(|e| {
            let message = format!("could not read file `{path}`: {e}");
            match include_location {
                Some(loc) => Diagnostic::new(loc, message),
                None => Diagnostic::raw(message),
            }
        })?;

        for (line_idx, raw_line) in contents.split('\n').enumerate() {
            let location = Location::new(path, line_idx + 1);
            let line = trim(strip_comment(raw_line));
            if line.is_empty() {
                continue;
            }

            let (first_word, rest) = split_first_word(line);
            if let Some(directive) = first_word.strip_prefix('%') {
                self.translate_directive(directive, rest, location)?;
            } else {
                self.translate_label_or_instruction(first_word, rest, location)?;
            }
        }

        Ok(())
    }

    fn translate_directive(&mut self, directive: &str, rest: &'a str, location: Location<'a>) -> Result<()> {
        match directive {
            "bind" => Err(Diagnostic::new(
                location,
                "%bind directive has been removed! Use %const directive to define consts. Use %native directive to define native functions.",
            )),
            "const" => self.translate_bind_directive(rest, location, BindingKind::Const),
            "native" => self.translate_bind_directive(rest, location, BindingKind::Native),
            "assert" => {
                let expr = self.parse_expr_text(trim(rest), location)?;
                self.deferred_asserts.push(DeferredAssert { expr, location });
                Ok(())
            }
            "include" => self.translate_include(rest, location),
            "entry" => self.translate_entry(rest, location),
            other => Err(Diagnostic::new(
                location,
                format!("unknown pre-processor directive `{other}`"),
            )),
        }
    }

    fn translate_bind_directive(&mut self, rest: &'a str, location: Location<'a>, kind: BindingKind) -> Result<()> {
        let (name, expr_text) = split_first_word(rest);
        if name.is_empty() {
            return Err(Diagnostic::new(location, "binding name is not provided"));
        }
        let expr = self.parse_expr_text(trim(expr_text), location)?;
        self.bindings.bind_expr(name, expr, kind, location)
    }

    fn translate_include(&mut self, rest: &'a str, location: Location<'a>) -> Result<()> {
        let line = trim(rest);
        if line.is_empty() {
            return Err(Diagnostic::new(location, "include file path is not provided"));
        }
        if !(line.starts_with('"') && line.ends_with('"') && line.len() >= 2) {
            return Err(Diagnostic::new(
                location,
                "include file path has to be surrounded with quotation marks",
            ));
        }
        let include_path = &line[1..line.len() - 1];

        if self.include_level + 1 >= MAX_INCLUDE_LEVEL {
            return Err(Diagnostic::new(location, "exceeded maximum include level"));
        }

        self.include_level += 1;
        let result = self.translate_source(include_path, Some(location));
        self.include_level -= 1;
        result
    }

    fn translate_entry(&mut self, rest: &'a str, location: Location<'a>) -> Result<()> {
        if let Some(existing) = &self.entry {
            return Err(Diagnostic::new(location, "entry point has been already set!")
                .with_note(existing.location, "the first entry point"));
        }

        let expr = self.parse_expr_text(trim(rest), location)?;
        let name = match expr {
            Expr::Binding(name) => name,
            _ => {
                return Err(Diagnostic::new(
                    location,
                    "only bindings are allowed to be set as entry points for now.",
                ))
            }
        };

        self.entry = Some(EntryRef { name, location });
        Ok(())
    }

    fn translate_label_or_instruction(&mut self, first_word: &'a str, rest: &'a str, location: Location<'a>) -> Result<()> {
        let (mnemonic, operand_text) = if let Some(label) = first_word.strip_suffix(':') {
            self.bindings.bind_value(
                label,
                Word::Int(self.program.len() as u64),
                BindingKind::Label,
                location,
            )?;
            split_first_word(rest)
        } else {
            (first_word, rest)
        };

        if mnemonic.is_empty() {
            return Ok(());
        }

        let spec = lookup(mnemonic)
            .ok_or_else(|| Diagnostic::new(location, format!("unknown instruction `{mnemonic}`")))?;

        let operand = if spec.has_operand {
            let operand_text = trim(operand_text);
            if operand_text.is_empty() {
                return Err(Diagnostic::new(
                    location,
                    format!("instruction `{mnemonic}` requires an operand"),
                ));
            }
            let expr = self.parse_expr_text(operand_text, location)?;
            match expr {
                Expr::Binding(name) => {
                    self.deferred_operands.push(DeferredOperand {
                        addr: self.program.len(),
                        name,
                        location,
                    });
                    Word::Int(0)
                }
                other => eval(&other, &mut self.bindings, &mut self.memory, location)?,
            }
        } else {
            Word::Int(0)
        };

        self.program.push(ProgramRecord {
            inst_type: spec.inst_type,
            operand,
        });

        Ok(())
    }

    fn parse_expr_text(&self, text: &'a str, location: Location<'a>) -> Result<Expr<'a>> {
        let tokens = tokenize(text, location)?;
        parse_expr(&tokens, self.arena, location)
    }

    fn resolve_deferred_operands(&mut self) -> Result<()> {
        for i in 0..self.deferred_operands.len() {
            let (addr, name, location) = {
                let d = &self.deferred_operands[i];
                (d.addr, d.name, d.location)
            };

            let idx = self
                .bindings
                .resolve(name)
                .ok_or_else(|| Diagnostic::new(location, format!("unknown binding `{name}`")))?;
            let kind = self.bindings.get(idx).kind;
            let inst_type = self.program[addr].inst_type;

            if inst_type == InstType::Call && kind != BindingKind::Label {
                return Err(Diagnostic::new(
                    location,
                    format!(
                        "trying to call not a label. `{name}` is {}, but the call instructions accepts only literals or labels.",
                        kind.as_str()
                    ),
                ));
            }
            if inst_type == InstType::Native && kind != BindingKind::Native {
                return Err(Diagnostic::new(
                    location,
                    format!(
                        "trying to invoke native function from a binding that is {}. Bindings for native functions have to be defined via `%native` basm directive.",
                        kind.as_str()
                    ),
                ));
            }

            let value = eval_binding(idx, &mut self.bindings, &mut self.memory, location)?;
            self.program[addr].operand = value;
        }
        Ok(())
    }

    fn resolve_deferred_asserts(&mut self) -> Result<()> {
        for i in 0..self.deferred_asserts.len() {
            let (expr, location) = {
                let d = &self.deferred_asserts[i];
                (d.expr, d.location)
            };
            let value = eval(&expr, &mut self.bindings, &mut self.memory, location)?;
            if value.as_u64() == 0 {
                return Err(Diagnostic::new(location, "assertion failed"));
            }
        }
        Ok(())
    }

    fn resolve_entry(&mut self) -> Result<()> {
        let Some(entry) = &self.entry else { return Ok(()) };
        let (name, location) = (entry.name, entry.location);

        let idx = self
            .bindings
            .resolve(name)
            .ok_or_else(|| Diagnostic::new(location, format!("unknown binding `{name}`")))?;
        let kind = self.bindings.get(idx).kind;
        if kind != BindingKind::Label {
            return Err(Diagnostic::new(
                location,
                format!("trying to set a {} as an entry point. Entry point has to be a label.", kind.as_str()),
            ));
        }

        self.entry_value = eval_binding(idx, &mut self.bindings, &mut self.memory, location)?.as_u64();
        Ok(())
    }
}

/// Translate `path` and everything it `%include`s into a finished
/// [`Translator`]. Runs both passes: directives/labels/instructions are
/// processed as the file is read, then deferred operands, assertions, and
/// the entry point are resolved once the whole translation unit has been
/// seen.
pub fn translate_file<'a>(arena: &'a Arena, path: &str) -> Result<Translator<'a>> {
    let path = arena.alloc_str(path);
    let mut translator = Translator::new(arena);
    translator.translate_source(path, None)?;
    translator.resolve_deferred_operands()?;
    translator.resolve_deferred_asserts()?;
    translator.resolve_entry()?;
    Ok(translator)
}
