//! # basm
//!
//! A two-pass translator for the assembly language of `bm`, a small
//! stack-based virtual machine. Source text goes in; a binary image (a
//! header, a program of instruction records, and a flat memory segment)
//! comes out.
//!
//! ## Pipeline
//!
//! 1. **Lexer** — tokenizes one already comment-stripped source line at a time
//! 2. **Parser** — recursive-descent over tokens into an expression tree
//! 3. **Translator** — two passes: directives/labels/instructions, then
//!    deferred operands, assertions, and the entry point
//! 4. **Image writer** — serializes the finished program and memory
//!
//! ## Example
//!
//! ```rust,no_run
//! use basm::arena::Arena;
//! use basm::translator::translate_file;
//! use basm::image::write_image;
//!
//! let arena = Arena::new();
//! let translator = translate_file(&arena, "program.bm").unwrap();
//! write_image(&translator, "program.bin").unwrap();
//! ```

pub mod arena;
pub mod binding;
pub mod error;
pub mod eval;
pub mod image;
pub mod lexer;
pub mod memory;
pub mod parser;
pub mod source_view;
pub mod translator;
pub mod word;
