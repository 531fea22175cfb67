//! Statement grammar: `stmt`, `assignStmt`, `destination`, `ifStmt`,
//! `loopStmt`, `returnStmt`.
//!
//! Grounded in `Parser::statement`/`assignStatement`/`destination`/
//! `ifStatement`/`loopStatement`/`returnStatement` (`parser.cpp` lines
//! 605-806). A bare procedure call used as a statement reuses
//! `parse_proc_call` from the expression grammar, discarding its value.

use crate::parser::base::Parser;
use crate::tree::Node;
use crate::word::{DataType, TokenKind};

impl<'source> Parser<'source> {
    /// `stmt -> assignStmt | procCall | ifStmt | loopStmt | returnStmt`
    pub(crate) fn parse_stmt(&mut self) -> Node {
        self.tracer.enter("stmt");
        match self.peek_kind() {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::For => self.parse_loop_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Identifier if self.current().is_procedure => self.parse_proc_call(),
            TokenKind::Identifier => self.parse_assign_stmt(),
            _ => {
                self.parsing_error(format!("expected a statement, found {}", self.peek_kind()));
                self.synchronize_at_statement();
                Node::internal("stmt", vec![])
            }
        }
    }

    /// `destination -> identifier ('[' expression ']')?`
    fn parse_destination(&mut self) -> Node {
        self.tracer.enter("destination");
        self.parse_name()
    }

    /// `assignStmt -> destination ':=' expression`
    fn parse_assign_stmt(&mut self) -> Node {
        self.tracer.enter("assignStmt");
        let dest = self.parse_destination();
        let assign = self.follow(TokenKind::Assign);
        let value = self.parse_expression();

        if let (Some(dest_word), Some(value_word)) = (dest.synthesized(), value.synthesized()) {
            if let (Some(to), Some(from)) = (dest_word.data_type, value_word.data_type) {
                let span = value_word.span.clone();
                self.check_assignment_conversion(to, from, span);
            }
        }

        Node::internal("assignStmt", vec![dest, Node::leaf(assign), value])
    }

    /// `ifStmt -> 'IF' '(' expression ')' 'THEN' stmt* ('ELSE' stmt*)? 'END' 'IF'`
    fn parse_if_stmt(&mut self) -> Node {
        self.tracer.enter("ifStmt");
        let if_kw = self.follow(TokenKind::If);
        let lparen = self.follow(TokenKind::LParen);
        let cond = self.parse_expression();
        let rparen = self.follow(TokenKind::RParen);

        if let Some(word) = cond.synthesized() {
            if !matches!(word.data_type, Some(DataType::Bool) | Some(DataType::Integer)) {
                let span = word.span.clone();
                self.wrong_type_error("BOOL or INTEGER", "other", span);
            }
        }

        let mut children = vec![
            Node::leaf(if_kw),
            Node::leaf(lparen),
            cond,
            Node::leaf(rparen),
            Node::leaf(self.follow(TokenKind::Then)),
        ];

        while !self.at_any(&[TokenKind::Else, TokenKind::End]) && !self.is_eof() {
            children.push(self.parse_stmt());
            children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
        }

        if let Some(else_kw) = self.consume_optional(&TokenKind::Else) {
            children.push(Node::leaf(else_kw));
            while !self.check(&TokenKind::End) && !self.is_eof() {
                children.push(self.parse_stmt());
                children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
            }
        }

        children.push(Node::leaf(self.follow(TokenKind::End)));
        children.push(Node::leaf(self.follow(TokenKind::If)));
        Node::internal("ifStmt", children)
    }

    /// `loopStmt -> 'FOR' '(' assignStmt ';' expression ')' stmt* 'END' 'FOR'`
    fn parse_loop_stmt(&mut self) -> Node {
        self.tracer.enter("loopStmt");
        let for_kw = self.follow(TokenKind::For);
        let lparen = self.follow(TokenKind::LParen);
        let init = self.parse_assign_stmt();
        let init_semi = self.follow(TokenKind::Semicolon);
        let cond = self.parse_expression();
        let rparen = self.follow(TokenKind::RParen);

        if let Some(word) = cond.synthesized() {
            if !matches!(word.data_type, Some(DataType::Bool) | Some(DataType::Integer)) {
                let span = word.span.clone();
                self.wrong_type_error("BOOL or INTEGER", "other", span);
            }
        }

        let mut children = vec![
            Node::leaf(for_kw),
            Node::leaf(lparen),
            init,
            Node::leaf(init_semi),
            cond,
            Node::leaf(rparen),
        ];

        while !self.check(&TokenKind::End) && !self.is_eof() {
            children.push(self.parse_stmt());
            children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
        }

        children.push(Node::leaf(self.follow(TokenKind::End)));
        children.push(Node::leaf(self.follow(TokenKind::For)));
        Node::internal("loopStmt", children)
    }

    /// `returnStmt -> 'RETURN' expression`
    fn parse_return_stmt(&mut self) -> Node {
        self.tracer.enter("returnStmt");
        let return_kw = self.follow(TokenKind::Return);
        let value = self.parse_expression();
        let word = value.synthesized().cloned().unwrap_or_else(|| return_kw.clone());
        Node::internal_typed("returnStmt", word, vec![Node::leaf(return_kw), value])
    }
}
