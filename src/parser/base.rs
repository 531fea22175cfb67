//! Token-stream cursor and the `follow*` primitives.
//!
//! `follow`, `follow_undeclared`, `follow_declared`, and `follow_literal`
//! mirror the four consumption primitives of the original recursive-descent
//! parser (`parser.cpp`, `Parser::follow`/`followUndeclared`/`followDeclared`/
//! `followLiteral`): each both advances the cursor and performs the lookup
//! or declaration side effect that the corresponding grammar position needs.

use crate::diag::Diag;
use crate::span::Span;
use crate::symbol_table::{Record, RecordKind, SymbolTable};
use crate::word::{TokenKind, Word};

pub type ParseError = Box<Diag>;
pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'source> {
    pub(crate) tokens: Vec<Word>,
    pub(crate) pos: usize,
    pub(crate) source: &'source str,
    pub(crate) diagnostics: Vec<Diag>,
    pub(crate) symbols: SymbolTable,
    pub(crate) scopes: Vec<Word>,
    pub(crate) config: crate::config::CompileConfig,
    pub(crate) tracer: crate::config::Tracer,
}

impl<'source> Parser<'source> {
    pub fn new(mut tokens: Vec<Word>, source: &'source str, config: crate::config::CompileConfig) -> Self {
        if tokens.is_empty() || !matches!(tokens.last().map(|w| &w.kind), Some(TokenKind::Eof)) {
            let eof_pos = tokens.last().map(|w| w.span.end).unwrap_or(0);
            tokens.push(Word::eof(eof_pos));
        }

        let tracer = crate::config::Tracer::new(config.trace);
        Self {
            tokens,
            pos: 0,
            source,
            diagnostics: Vec::new(),
            symbols: SymbolTable::new(),
            scopes: vec![crate::symbol_table::global_scope()],
            config,
            tracer,
        }
    }

    // -- cursor primitives -------------------------------------------------

    pub(crate) fn current(&self) -> &Word {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("token stream must be non-empty"))
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub(crate) fn is_eof(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    pub(crate) fn advance(&mut self) -> Word {
        let token = self.current().clone();
        if self.pos < self.tokens.len().saturating_sub(1) {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|k| self.check(k))
    }

    /// Consumes `kind` if present, handing back the token so callers that
    /// need to keep it as a tree leaf (list separators, optional brackets,
    /// optional prefix keywords) don't have to re-derive it.
    pub(crate) fn consume_optional(&mut self, kind: &TokenKind) -> Option<Word> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes `kind`, recording a syntax-error diagnostic if it is absent.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Word {
        if self.check(&kind) {
            self.advance()
        } else {
            self.parsing_error(format!("expected {kind}, found {}", self.peek_kind()));
            self.current().clone()
        }
    }

    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        Box::new(Diag::error(message).with_primary_label(self.current().span.clone(), "here"))
    }

    // -- diagnostics ---------------------------------------------------

    pub(crate) fn parsing_error(&mut self, message: impl Into<String>) {
        let token = self.current().clone();
        self.diagnostics.push(
            Diag::error(message)
                .with_primary_label(token.span.clone(), "unexpected here")
                .with_code("P001"),
        );
    }

    pub(crate) fn identifier_not_found_error(&mut self, name: &str, span: Span) {
        self.diagnostics.push(
            Diag::error(format!("identifier '{name}' not declared"))
                .with_primary_label(span, "used here")
                .with_code("S001"),
        );
    }

    pub(crate) fn double_declaration_error(&mut self, name: &str, span: Span) {
        self.diagnostics.push(
            Diag::error(format!("'{name}' already declared in this scope"))
                .with_primary_label(span, "redeclared here")
                .with_code("S002"),
        );
    }

    pub(crate) fn array_bad_bounds_error(&mut self, span: Span) {
        self.diagnostics.push(
            Diag::error("array index out of bounds")
                .with_primary_label(span, "here")
                .with_code("S003"),
        );
    }

    pub(crate) fn wrong_type_error(&mut self, expected: &str, found: &str, span: Span) {
        self.diagnostics.push(
            Diag::error(format!("expected type {expected}, found {found}"))
                .with_primary_label(span, "here")
                .with_code("S004"),
        );
    }

    pub(crate) fn arg_list_mismatch_error(&mut self, name: &str, span: Span) {
        self.diagnostics.push(
            Diag::error(format!("argument list for '{name}' does not match its declaration"))
                .with_primary_label(span, "call here")
                .with_code("S005"),
        );
    }

    pub(crate) fn wrong_operator_error(&mut self, op: &str, message: impl Into<String>, span: Span) {
        self.diagnostics.push(
            Diag::error(format!("operator '{op}' {}", message.into()))
                .with_primary_label(span, "here")
                .with_code("S006"),
        );
    }

    // -- follow* primitives ----------------------------------------------

    /// Consumes a fixed punctuation/reserved-word token, erroring if absent.
    pub(crate) fn follow(&mut self, kind: TokenKind) -> Word {
        self.expect(kind)
    }

    /// Consumes an identifier that is being declared, inserting it into the
    /// current (or forced-global) scope. Reports a double declaration if the
    /// name already exists in that scope.
    ///
    /// Used where the declared type is already known at the point the name
    /// is consumed. `varDecl`/`procHeader` parse the type *after* the name,
    /// so they use [`Self::consume_identifier`] and [`Self::declare`]
    /// separately instead.
    pub(crate) fn follow_undeclared(&mut self, record: Record, global: bool) -> Word {
        let token = self.consume_identifier();
        self.declare(&token, record, global);
        token
    }

    /// Consumes an identifier token without declaring it, for productions
    /// that need the raw name before the declared type is known.
    pub(crate) fn consume_identifier(&mut self) -> Word {
        if !matches!(self.current().kind, TokenKind::Identifier) {
            self.parsing_error(format!("expected identifier, found {}", self.peek_kind()));
        }
        self.advance()
    }

    /// Inserts `record` under `name`'s text into the current (or
    /// forced-global) scope. Reports a double declaration if already present.
    pub(crate) fn declare(&mut self, name: &Word, record: Record, global: bool) {
        let scope = if global {
            crate::symbol_table::global_scope()
        } else {
            self.scopes
                .last()
                .cloned()
                .unwrap_or_else(crate::symbol_table::global_scope)
        };
        if !self.symbols.insert(&scope, &name.text, record) {
            self.double_declaration_error(&name.text, name.span.clone());
        }
    }

    /// Consumes an identifier that is being used, looking it up through the
    /// full scope chain and enriching the returned word with its declared
    /// type/array-length/parameter types. Reports an undeclared-identifier
    /// error if no scope has it.
    pub(crate) fn follow_declared(&mut self) -> Word {
        let token = self.current().clone();
        if !matches!(token.kind, TokenKind::Identifier) {
            self.parsing_error(format!("expected identifier, found {}", token.kind));
            return self.advance();
        }
        let mut enriched = token.clone();
        match self.symbols.lookup(&self.scopes, &token.text) {
            Some(record) => {
                enriched.data_type = Some(record.data_type);
                enriched.array_length = record.array_length;
                enriched.is_procedure = record.kind == RecordKind::Procedure;
                enriched.proc_param_types = record.param_types.clone();
            }
            None => self.identifier_not_found_error(&token.text, token.span.clone()),
        }
        self.advance();
        enriched
    }

    /// Consumes a literal of `kind`, erroring if the current token isn't one.
    pub(crate) fn follow_literal(&mut self, kind: TokenKind) -> Word {
        if self.check(&kind) {
            self.advance()
        } else {
            self.parsing_error(format!("expected {kind} literal, found {}", self.peek_kind()));
            self.advance()
        }
    }
}
