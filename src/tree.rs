//! Parse tree nodes and depth-first serialization.
//!
//! An internal node is tagged with the grammar production that produced it
//! and, once semantic analysis has run, the [`Word`] synthesizing its
//! propagated type/value; a leaf wraps exactly one [`Word`] token. Printing
//! a tree never touches the filesystem — callers write the result wherever
//! they like.

use std::fmt::Write as _;

use crate::word::Word;

/// One node of the parse tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// An internal grammar-production node with its children, in order.
    Internal {
        production: &'static str,
        /// Synthesized type/value, present once semantic analysis resolves it.
        word: Option<Word>,
        children: Vec<Node>,
    },
    /// A single scanned token.
    Leaf(Word),
}

impl Node {
    pub fn internal(production: &'static str, children: Vec<Node>) -> Self {
        Node::Internal {
            production,
            word: None,
            children,
        }
    }

    pub fn internal_typed(production: &'static str, word: Word, children: Vec<Node>) -> Self {
        Node::Internal {
            production,
            word: Some(word),
            children,
        }
    }

    pub fn leaf(token: Word) -> Self {
        Node::Leaf(token)
    }

    /// The synthesized word at this node, for an internal node that has one.
    pub fn synthesized(&self) -> Option<&Word> {
        match self {
            Node::Internal { word, .. } => word.as_ref(),
            Node::Leaf(token) => Some(token),
        }
    }

    /// Serializes the tree depth-first into a fresh `String`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0).expect("writing to a String never fails");
        out
    }

    /// Writes the tree depth-first into `w`, indenting by `depth` levels.
    pub fn write_tree(&self, w: &mut impl std::fmt::Write, depth: usize) -> std::fmt::Result {
        let indent = "\t".repeat(depth);
        match self {
            Node::Leaf(token) => {
                writeln!(w, "{indent}{}({},{})", token.text, token.line, token.col)?;
            }
            Node::Internal { production, word, children } => {
                match word {
                    Some(w0) => {
                        let type_str = w0.data_type.map(|t| t.to_string()).unwrap_or_default();
                        writeln!(w, "{indent}{production} {{'dataType' = {type_str}}}")?;
                    }
                    None => writeln!(w, "{indent}{production}")?,
                }
                for child in children {
                    child.write_tree(w, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}
