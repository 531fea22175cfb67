//! Top-level grammar: `program`, `progHead`, `progBody`, `decl`,
//! `procDecl`, `procHeader`, `procBody`, `paramList`, `param`, `varDecl`,
//! `typeMark`.
//!
//! Grounded in `Parser::parse`/`programHeader`/`programBody`/`declaration`/
//! `procDeclaration`/`procHeader`/`procBody`/`paramList`/`param`/
//! `varDeclaration`/`typeMark` (`parser.cpp` lines 334-602).

use crate::parser::base::Parser;
use crate::symbol_table::Record;
use crate::tree::Node;
use crate::word::{type_mark_data_type, DataType, TokenKind, Word};

impl<'source> Parser<'source> {
    /// `program -> progHead progBody '.'`
    pub fn parse_program(&mut self) -> Node {
        self.tracer.enter("program");
        let head = self.parse_prog_head();
        let body = self.parse_prog_body();
        let dot = self.follow(TokenKind::Dot);
        Node::internal("program", vec![head, body, Node::leaf(dot)])
    }

    /// `progHead -> 'PROGRAM' identifier 'IS'`
    fn parse_prog_head(&mut self) -> Node {
        self.tracer.enter("progHead");
        let program_kw = self.follow(TokenKind::Program);
        let name = self.advance();
        let is_kw = self.follow(TokenKind::Is);
        Node::internal(
            "progHead",
            vec![Node::leaf(program_kw), Node::leaf(name), Node::leaf(is_kw)],
        )
    }

    /// `progBody -> decl* 'BEGIN' stmt* 'END' 'PROGRAM'`
    fn parse_prog_body(&mut self) -> Node {
        self.tracer.enter("progBody");
        let mut children = Vec::new();

        while self.at_declaration_start() {
            children.push(self.parse_decl());
            children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
        }

        children.push(Node::leaf(self.follow(TokenKind::Begin)));

        while self.at_statement_start() {
            children.push(self.parse_stmt());
            children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
        }

        children.push(Node::leaf(self.follow(TokenKind::End)));
        children.push(Node::leaf(self.follow(TokenKind::Program)));
        Node::internal("progBody", children)
    }

    /// `decl -> 'GLOBAL'? (procDecl | varDecl)`
    fn parse_decl(&mut self) -> Node {
        self.tracer.enter("decl");
        let global_kw = self.consume_optional(&TokenKind::Global);
        let global = global_kw.is_some();

        let mut node = if self.check(&TokenKind::Procedure) {
            self.parse_proc_decl(global)
        } else if self.check(&TokenKind::Variable) {
            self.parse_var_decl(global)
        } else {
            self.parsing_error(format!(
                "expected a declaration, found {}",
                self.peek_kind()
            ));
            self.synchronize_at_statement();
            Node::internal("decl", vec![])
        };

        if let Some(global_kw) = global_kw {
            if let Node::Internal { children, .. } = &mut node {
                children.insert(0, Node::leaf(global_kw));
            }
        }
        node
    }

    /// `procHeader -> 'PROCEDURE' identifier ':' typeMark '(' paramList ')'`
    ///
    /// Declares the procedure name in the scope active *before* the push
    /// (global when `global` is set), pushes a fresh scope named after the
    /// procedure identifier, parses the parameter list inside that new
    /// scope, then patches the parameter types back onto the procedure
    /// record declared in the outer scope.
    fn parse_proc_header(&mut self, global: bool) -> (Node, Word) {
        self.tracer.enter("procHeader");
        let proc_kw = self.follow(TokenKind::Procedure);
        let name_token = self.consume_identifier();

        let colon = self.follow(TokenKind::Colon);
        let (type_node, return_type) = self.parse_type_mark_pair();
        let return_type = return_type.unwrap_or(DataType::Integer);

        self.declare(&name_token, Record::procedure(return_type), global);
        let mut name_word = name_token.clone();
        name_word.data_type = Some(return_type);

        let scope = Word::scope_name(name_word.text.clone(), name_word.line, name_word.col);
        self.scopes.push(scope.clone());
        self.symbols.create_scope(scope.clone());

        let lparen = self.follow(TokenKind::LParen);
        let (param_nodes, param_types) = self.parse_param_list();
        let rparen = self.follow(TokenKind::RParen);

        let declaring_scope = if global {
            crate::symbol_table::global_scope()
        } else {
            self.scopes[self.scopes.len() - 2].clone()
        };
        self.symbols
            .set_param_types(&declaring_scope, &name_word.text, param_types);

        let mut children = vec![
            Node::leaf(proc_kw),
            Node::leaf(name_token),
            Node::leaf(colon),
            type_node,
            Node::leaf(lparen),
        ];
        children.extend(param_nodes);
        children.push(Node::leaf(rparen));

        (Node::internal("procHeader", children), name_word)
    }

    /// `typeMark -> 'INTEGER' | 'FLOAT' | 'STRING' | 'BOOL'`
    fn parse_type_mark_pair(&mut self) -> (Node, Option<DataType>) {
        self.tracer.enter("typeMark");
        let token = self.current().clone();
        let data_type = type_mark_data_type(&token.kind);
        if data_type.is_none() {
            self.parsing_error(format!("expected a type mark, found {}", token.kind));
        }
        let mut typed_token = self.advance();
        typed_token.data_type = data_type;
        (Node::leaf(typed_token), data_type)
    }

    /// `procDecl -> procHeader procBody`
    fn parse_proc_decl(&mut self, global: bool) -> Node {
        self.tracer.enter("procDecl");
        let (header, proc_word) = self.parse_proc_header(global);
        let body = self.parse_proc_body();

        let scope = Word::scope_name(proc_word.text.clone(), proc_word.line, proc_word.col);
        self.symbols.remove_scope(&scope);
        self.scopes.pop();

        Node::internal("procDecl", vec![header, body])
    }

    /// `procBody -> decl* 'BEGIN' stmt* 'END' 'PROCEDURE'`
    fn parse_proc_body(&mut self) -> Node {
        self.tracer.enter("procBody");
        let mut children = Vec::new();

        while self.at_declaration_start() {
            children.push(self.parse_decl());
            children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
        }

        children.push(Node::leaf(self.follow(TokenKind::Begin)));

        while self.at_statement_start() {
            children.push(self.parse_stmt());
            children.push(Node::leaf(self.follow(TokenKind::Semicolon)));
        }

        children.push(Node::leaf(self.follow(TokenKind::End)));
        children.push(Node::leaf(self.follow(TokenKind::Procedure)));
        Node::internal("procBody", children)
    }

    /// `paramList -> param (',' param)* | epsilon`
    fn parse_param_list(&mut self) -> (Vec<Node>, Vec<DataType>) {
        self.tracer.enter("paramList");
        let mut nodes = Vec::new();
        let mut types = Vec::new();

        if self.check(&TokenKind::RParen) {
            return (nodes, types);
        }

        loop {
            let (node, data_type) = self.parse_param();
            nodes.push(node);
            if let Some(dt) = data_type {
                types.push(dt);
            }
            match self.consume_optional(&TokenKind::Comma) {
                Some(comma) => nodes.push(Node::leaf(comma)),
                None => break,
            }
        }
        (nodes, types)
    }

    /// `param -> varDecl`, evaluated inside the procedure's own scope.
    fn parse_param(&mut self) -> (Node, Option<DataType>) {
        self.tracer.enter("param");
        let node = self.parse_var_decl(false);
        let data_type = node.synthesized().and_then(|w| w.data_type);
        (node, data_type)
    }

    /// `varDecl -> 'VARIABLE' identifier ':' typeMark ('[' intLiteral ']')?`
    fn parse_var_decl(&mut self, global: bool) -> Node {
        self.tracer.enter("varDecl");
        let var_kw = self.follow(TokenKind::Variable);
        let name_token = self.consume_identifier();
        let colon = self.follow(TokenKind::Colon);
        let (type_node, data_type) = self.parse_type_mark_pair();
        let data_type = data_type.unwrap_or(DataType::Integer);

        let mut array_length: i64 = 1;
        let mut children = vec![
            Node::leaf(var_kw),
            Node::leaf(name_token.clone()),
            Node::leaf(colon),
            type_node,
        ];

        if let Some(lbracket) = self.consume_optional(&TokenKind::LBracket) {
            children.push(Node::leaf(lbracket));
            let len_token = self.follow_literal(TokenKind::IntLiteral);
            array_length = len_token.int_value().unwrap_or(1);
            children.push(Node::leaf(len_token));
            children.push(Node::leaf(self.follow(TokenKind::RBracket)));
        }

        self.declare(&name_token, Record::variable(data_type, array_length), global);
        let mut synthesized = name_token;
        synthesized.data_type = Some(data_type);
        synthesized.array_length = array_length;

        Node::internal_typed("varDecl", synthesized, children)
    }
}
