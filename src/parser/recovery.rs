//! Error recovery and resynchronization.

use crate::parser::base::Parser;
use crate::word::TokenKind;

/// Token kinds that can begin a statement.
const STATEMENT_START_TOKENS: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::If,
    TokenKind::For,
    TokenKind::Return,
];

/// Token kinds that can begin a declaration.
const DECLARATION_START_TOKENS: &[TokenKind] = &[
    TokenKind::Global,
    TokenKind::Variable,
    TokenKind::Procedure,
];

impl<'source> Parser<'source> {
    pub(crate) fn is_statement_start_kind(kind: &TokenKind) -> bool {
        STATEMENT_START_TOKENS.contains(kind)
    }

    pub(crate) fn is_declaration_start_kind(kind: &TokenKind) -> bool {
        DECLARATION_START_TOKENS.contains(kind)
    }

    pub(crate) fn at_statement_start(&self) -> bool {
        Self::is_statement_start_kind(self.peek_kind())
    }

    pub(crate) fn at_declaration_start(&self) -> bool {
        Self::is_declaration_start_kind(self.peek_kind())
    }

    /// Discards one token and continues, the recovery strategy used on a
    /// malformed declaration or statement: skip the offending token and let
    /// the caller retry from the next one.
    pub(crate) fn synchronize_one(&mut self) {
        if !self.is_eof() {
            self.advance();
        }
    }

    /// Skips tokens until a statement-starting keyword, `END`, or EOF.
    pub(crate) fn synchronize_at_statement(&mut self) {
        while !self.is_eof() && !self.at_statement_start() && !self.check(&TokenKind::End) {
            self.advance();
        }
    }
}
