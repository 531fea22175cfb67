//! Parser assembly: recursive-descent parsing integrated with semantic
//! analysis over the token stream the lexer produces.

pub(crate) mod base;
mod expression;
mod program;
mod recovery;
mod statement;

use crate::config::CompileConfig;
use crate::diag::{Diag, DiagSeverity};
use crate::tree::Node;
use crate::word::Word;
use base::Parser;

/// Parses `tokens` (as scanned from `source`) under `config`.
///
/// Returns the parse tree alongside the raw diagnostics collected; the tree
/// is omitted when `config.strict` is set and at least one error occurred.
/// Callers that want `miette` reports go through [`crate::compile`], which
/// merges these with any lexer diagnostics before rendering.
pub(crate) fn parse_tokens(
    tokens: Vec<Word>,
    source: &str,
    config: CompileConfig,
) -> (Option<Node>, Vec<Diag>) {
    let strict = config.strict;
    let mut parser = Parser::new(tokens, source, config);
    let tree = parser.parse_program();

    let has_error = parser
        .diagnostics
        .iter()
        .any(|d| d.severity == DiagSeverity::Error);

    let tree = if has_error && strict { None } else { Some(tree) };
    (tree, parser.diagnostics)
}
