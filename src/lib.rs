#![allow(rustdoc::broken_intra_doc_links)]
//! A single-pass, recursive-descent front end for a small Pascal-like
//! imperative language: scanner, scope-stacked symbol table, and a parser
//! that performs type inference/checking while it builds the parse tree.
//!
//! This crate is a library: it has no `main`, does no file I/O, and emits
//! no machine code or object files. Driving it from a file path, wiring up
//! a CLI, and anything past the parse tree (codegen, linking) are left to
//! a caller.
//!
//! # Parse
//!
//! ```
//! use pascal_front::parse;
//!
//! let source = "PROGRAM P IS BEGIN END PROGRAM .";
//! let outcome = parse(source);
//! assert!(outcome.tree.is_some());
//! assert!(!outcome.has_errors());
//! ```
//!
//! # Serialize the parse tree
//!
//! ```
//! use pascal_front::parse;
//!
//! let outcome = parse("PROGRAM P IS BEGIN END PROGRAM .");
//! let tree = outcome.tree.unwrap();
//! assert!(tree.serialize().contains("program"));
//! ```
//!
//! # Strict vs. best-effort compiles
//!
//! ```
//! use pascal_front::{compile_with_config, CompileConfig};
//!
//! let source = "PROGRAM P IS BEGIN Y := 1 ; END PROGRAM .";
//!
//! let strict = compile_with_config(source, CompileConfig::default().strict(true));
//! assert!(strict.has_errors());
//! assert!(strict.tree.is_none());
//!
//! let lenient = compile_with_config(source, CompileConfig::default().strict(false));
//! assert!(lenient.has_errors());
//! assert!(lenient.tree.is_some());
//! ```

pub mod config;
pub mod diag;
pub mod lexer;
pub(crate) mod parser;
pub mod span;
pub mod symbol_table;
pub mod tree;
pub mod word;

pub use config::CompileConfig;
pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole, SourceFile};
pub use lexer::{tokenize, LexerResult};
pub use span::{Span, Spanned};
pub use symbol_table::{Record, RecordKind, SymbolTable};
pub use tree::Node;
pub use word::{DataType, TokenKind, Value, Word};

use diag::convert_diagnostics_to_reports;
use miette::Report;

/// The outcome of compiling one source file.
#[derive(Debug)]
pub struct CompileOutcome {
    /// The parse tree, present unless parsing produced no usable structure
    /// or `strict` mode suppressed it on the first error.
    pub tree: Option<Node>,
    /// Every diagnostic from lexing and parsing, rendered as `miette` reports.
    pub diagnostics: Vec<Report>,
}

impl CompileOutcome {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Compiles `source` end-to-end (lexing + parsing + semantic analysis)
/// with default (strict) configuration.
pub fn parse(source: &str) -> CompileOutcome {
    compile_with_config(source, CompileConfig::default())
}

/// Compiles `source` under `config`.
///
/// Guarantees the parser only ever sees tokens that came from this crate's
/// own lexer, and that lexer diagnostics are merged ahead of parser
/// diagnostics before rendering.
pub fn compile_with_config(source: &str, config: CompileConfig) -> CompileOutcome {
    let lex_result = tokenize(source);
    let lex_had_error = !lex_result.diagnostics.is_empty();

    let (tree, parse_diags) = parser::parse_tokens(lex_result.tokens, source, config.clone());

    let mut diagnostics = lex_result.diagnostics;
    diagnostics.extend(parse_diags);

    let tree = if config.strict && lex_had_error { None } else { tree };

    let source_file = SourceFile::new(source);
    let reports = convert_diagnostics_to_reports(&diagnostics, &source_file);

    CompileOutcome { tree, diagnostics: reports }
}
