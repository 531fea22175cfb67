//! Expression grammar: `expression`/`expression'`, `mathOp`/`mathOp'`,
//! `relation`/`relation'`, `term`/`term'`, `factor`, `name`, `argList`.
//!
//! The left-recursion-eliminated "prime" shape and the type-resolution
//! tables below are ported directly from `Parser::expression`/
//! `expressionPrime`/.../`findResultType`/`checkValidTypeConversion` in the
//! original implementation (`parser.cpp` lines 808-1105).

use crate::parser::base::Parser;
use crate::tree::Node;
use crate::word::{DataType, TokenKind, Word};

/// The result type of applying `op` to operands of `lhs`/`rhs`, per the
/// original `findResultType` switch. `lhs` is `None` for a unary `NOT`.
fn find_result_type(lhs: Option<DataType>, op: &TokenKind, rhs: DataType) -> DataType {
    use DataType::*;
    use TokenKind::*;
    match op {
        Eq | NotEq | Less | LessEq | Greater | GreaterEq => Bool,
        Plus | Minus | Star | Slash => {
            if lhs == Some(Float) || rhs == Float {
                Float
            } else {
                Integer
            }
        }
        Amp | Pipe => {
            if lhs == Some(Integer) && rhs == Integer {
                Integer
            } else {
                Bool
            }
        }
        Not => match rhs {
            Integer => Integer,
            _ => Bool,
        },
        _ => rhs,
    }
}

/// Whether a value of type `from` may be converted to `to`, per the
/// original `checkValidTypeConversion` table (INTEGER<->BOOL,
/// INTEGER<->FLOAT, STRING<->STRING only).
fn is_valid_type_conversion(to: DataType, from: DataType) -> bool {
    use DataType::*;
    match to {
        Integer => matches!(from, Integer | Float | Bool),
        Float => matches!(from, Integer | Float),
        Bool => matches!(from, Integer | Bool),
        String => matches!(from, String),
    }
}

impl<'source> Parser<'source> {
    /// `argList -> expression (',' expression)* | epsilon`
    ///
    /// Returns the parsed argument nodes alongside their resolved types, in
    /// order, for comparison against a procedure's declared parameters.
    pub(crate) fn parse_arg_list(&mut self) -> (Vec<Node>, Vec<DataType>) {
        self.tracer.enter("argList");
        let mut nodes = Vec::new();
        let mut types = Vec::new();

        if self.check(&TokenKind::RParen) {
            return (nodes, types);
        }

        loop {
            let arg = self.parse_expression();
            if let Some(word) = arg.synthesized() {
                if let Some(dt) = word.data_type {
                    types.push(dt);
                }
            }
            nodes.push(arg);
            match self.consume_optional(&TokenKind::Comma) {
                Some(comma) => nodes.push(Node::leaf(comma)),
                None => break,
            }
        }
        (nodes, types)
    }

    /// `name -> identifier ('[' expression ']')?`
    pub(crate) fn parse_name(&mut self) -> Node {
        self.tracer.enter("name");
        let word = self.follow_declared();
        let mut children = vec![Node::leaf(word.clone())];

        if let Some(lbracket) = self.consume_optional(&TokenKind::LBracket) {
            children.push(Node::leaf(lbracket));
            let index = self.parse_expression();
            let bracket_span = index
                .synthesized()
                .map(|w| w.span.clone())
                .unwrap_or(word.span.clone());
            if let Some(idx_word) = index.synthesized() {
                if idx_word.data_type != Some(DataType::Integer) {
                    self.array_bad_bounds_error(bracket_span.clone());
                }
                if let Some(value) = idx_word.int_value() {
                    if value < 0 || value >= word.array_length {
                        self.array_bad_bounds_error(bracket_span);
                    }
                }
            }
            children.push(index);
            children.push(Node::leaf(self.follow(TokenKind::RBracket)));
        }
        Node::internal_typed("name", word, children)
    }

    /// `factor -> '(' expression ')' | '-' (procCall | name) | procCall
    ///          | name | number | string | 'TRUE' | 'FALSE'`
    pub(crate) fn parse_factor(&mut self) -> Node {
        self.tracer.enter("factor");

        if let Some(lparen) = self.consume_optional(&TokenKind::LParen) {
            let inner = self.parse_expression();
            let rparen = self.follow(TokenKind::RParen);
            let grouped = vec![Node::leaf(lparen), inner, Node::leaf(rparen)];
            return match grouped[1].synthesized().cloned() {
                Some(word) => Node::internal_typed("factor", word, grouped),
                None => Node::internal("factor", grouped),
            };
        }

        let minus = self.consume_optional(&TokenKind::Minus);

        let mut node = if self.check(&TokenKind::Identifier) && self.current().is_procedure {
            self.parse_proc_call()
        } else if self.check(&TokenKind::Identifier) {
            self.parse_name()
        } else if self.check(&TokenKind::IntLiteral) {
            Node::leaf(self.follow_literal(TokenKind::IntLiteral))
        } else if self.check(&TokenKind::FloatLiteral) {
            Node::leaf(self.follow_literal(TokenKind::FloatLiteral))
        } else if self.check(&TokenKind::StringLiteral) {
            Node::leaf(self.follow_literal(TokenKind::StringLiteral))
        } else if self.check(&TokenKind::True) || self.check(&TokenKind::False) {
            Node::leaf(self.advance())
        } else {
            self.parsing_error(format!("expected a factor, found {}", self.peek_kind()));
            Node::leaf(self.advance())
        };

        if let Some(minus) = minus {
            if let Some(word) = node.synthesized() {
                let mut negated_word = word.clone();
                negated_word.negated = true;
                if !matches!(negated_word.data_type, Some(DataType::Integer) | Some(DataType::Float)) {
                    let found = negated_word
                        .data_type
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "unresolved".to_string());
                    self.wrong_operator_error(
                        "-",
                        format!("is only valid for INTEGER or FLOAT, found {found}"),
                        minus.span.clone(),
                    );
                }
                node = Node::internal_typed("factor", negated_word, vec![Node::leaf(minus), node]);
            }
        }
        node
    }

    /// `term' -> ('*' | '/') factor term' | epsilon`
    pub(crate) fn parse_term_prime(&mut self, lhs: Node) -> Node {
        self.tracer.enter("termPrime");
        if self.check(&TokenKind::Star) || self.check(&TokenKind::Slash) {
            let op = self.advance();
            let rhs = self.parse_factor();
            let combined = self.combine(lhs, op, rhs, "term");
            self.parse_term_prime(combined)
        } else {
            lhs
        }
    }

    /// `term -> factor term'`
    pub(crate) fn parse_term(&mut self) -> Node {
        self.tracer.enter("term");
        let factor = self.parse_factor();
        self.parse_term_prime(factor)
    }

    /// `relation' -> ('<' | '<=' | '>' | '>=' | '==' | '!=') term relation' | epsilon`
    pub(crate) fn parse_relation_prime(&mut self, lhs: Node) -> Node {
        self.tracer.enter("relationPrime");
        if self.at_any(&[
            TokenKind::Less,
            TokenKind::LessEq,
            TokenKind::Greater,
            TokenKind::GreaterEq,
            TokenKind::Eq,
            TokenKind::NotEq,
        ]) {
            let op = self.advance();
            let rhs = self.parse_term();
            let combined = self.combine(lhs, op, rhs, "relation");
            self.parse_relation_prime(combined)
        } else {
            lhs
        }
    }

    /// `relation -> term relation'`
    pub(crate) fn parse_relation(&mut self) -> Node {
        self.tracer.enter("relation");
        let term = self.parse_term();
        self.parse_relation_prime(term)
    }

    /// `mathOp' -> ('+' | '-') relation mathOp' | epsilon`
    pub(crate) fn parse_math_op_prime(&mut self, lhs: Node) -> Node {
        self.tracer.enter("mathOpPrime");
        if self.check(&TokenKind::Plus) || self.check(&TokenKind::Minus) {
            let op = self.advance();
            let rhs = self.parse_relation();
            let combined = self.combine(lhs, op, rhs, "mathOp");
            self.parse_math_op_prime(combined)
        } else {
            lhs
        }
    }

    /// `mathOp -> relation mathOp'`
    pub(crate) fn parse_math_op(&mut self) -> Node {
        self.tracer.enter("mathOp");
        let relation = self.parse_relation();
        self.parse_math_op_prime(relation)
    }

    /// `expression' -> ('&' | '|') mathOp expression' | epsilon`
    pub(crate) fn parse_expression_prime(&mut self, lhs: Node) -> Node {
        self.tracer.enter("expressionPrime");
        if self.check(&TokenKind::Amp) || self.check(&TokenKind::Pipe) {
            let op = self.advance();
            let rhs = self.parse_math_op();
            let combined = self.combine(lhs, op, rhs, "expression");
            self.parse_expression_prime(combined)
        } else {
            lhs
        }
    }

    /// `expression -> 'NOT'? mathOp expression'`
    pub(crate) fn parse_expression(&mut self) -> Node {
        self.tracer.enter("expression");
        let not_kw = self.consume_optional(&TokenKind::Not);
        let operand = self.parse_math_op();

        let base = if let Some(not_kw) = not_kw {
            match operand.synthesized() {
                Some(word) => {
                    let result_type = find_result_type(
                        None,
                        &TokenKind::Not,
                        word.data_type.unwrap_or(DataType::Bool),
                    );
                    let mut synth = word.clone();
                    synth.data_type = Some(result_type);
                    Node::internal_typed("expression", synth, vec![Node::leaf(not_kw), operand])
                }
                None => operand,
            }
        } else {
            operand
        };

        self.parse_expression_prime(base)
    }

    /// Combines `lhs op rhs` into a single node whose synthesized word
    /// carries the resolved result type, per `findResultType`. Mirrors the
    /// original's `checkValidTypeConversion(lhs, rhs)` guard ahead of
    /// `findResultType`: operands that cannot convert to one another raise
    /// `wrongOperatorError` instead of silently resolving a type.
    fn combine(&mut self, lhs: Node, op: Word, rhs: Node, production: &'static str) -> Node {
        let lhs_type = lhs.synthesized().and_then(|w| w.data_type);
        let rhs_type = rhs.synthesized().and_then(|w| w.data_type);

        let mut synth = op.clone();
        if let Some(rhs_dt) = rhs_type {
            if let Some(lhs_dt) = lhs_type {
                if !is_valid_type_conversion(lhs_dt, rhs_dt) {
                    self.wrong_operator_error(
                        &op.text,
                        format!("is not valid between {lhs_dt} and {rhs_dt}"),
                        op.span.clone(),
                    );
                }
            }
            synth.data_type = Some(find_result_type(lhs_type, &op.kind, rhs_dt));
        } else {
            self.wrong_type_error("a typed operand", "unresolved expression", op.span.clone());
        }
        Node::internal_typed(production, synth, vec![lhs, rhs])
    }

    /// `procCall -> name '(' argList ')'`
    pub(crate) fn parse_proc_call(&mut self) -> Node {
        self.tracer.enter("procCall");
        let word = self.follow_declared();
        let declared_params = word.proc_param_types.clone();
        let call_span = word.span.clone();
        let name = word.text.clone();

        let mut children = vec![Node::leaf(word.clone())];
        children.push(Node::leaf(self.follow(TokenKind::LParen)));
        let (args, arg_types) = self.parse_arg_list();
        children.extend(args);
        children.push(Node::leaf(self.follow(TokenKind::RParen)));

        if arg_types != declared_params {
            self.arg_list_mismatch_error(&name, call_span);
        }

        Node::internal_typed("procCall", word, children)
    }

    /// Checks whether an assignment/argument value of type `from` may flow
    /// into a destination of type `to`, emitting a diagnostic if not.
    pub(crate) fn check_assignment_conversion(
        &mut self,
        to: DataType,
        from: DataType,
        span: crate::span::Span,
    ) {
        if !is_valid_type_conversion(to, from) {
            self.wrong_type_error(&to.to_string(), &from.to_string(), span);
        }
    }
}
