//! Scope stack and symbol records.
//!
//! Scopes are identified by value, not by a generated id: the scope a
//! declaration lives in is itself a [`Word`] (its own declaring identifier,
//! or the synthetic `GLOBAL` word for the outermost scope). Looking a name
//! up walks the caller-supplied scope chain from innermost to `GLOBAL`,
//! mirroring the original implementation's `vector<Word>` scope stack.

use std::collections::HashMap;

use crate::word::{DataType, Word};

/// What kind of thing a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Variable,
    Procedure,
}

/// The declaration a symbol table entry carries.
#[derive(Debug, Clone)]
pub struct Record {
    pub kind: RecordKind,
    pub data_type: DataType,
    pub array_length: i64,
    /// Declared parameter types, in order, for a procedure; empty otherwise.
    pub param_types: Vec<DataType>,
}

impl Record {
    pub fn variable(data_type: DataType, array_length: i64) -> Self {
        Self {
            kind: RecordKind::Variable,
            data_type,
            array_length,
            param_types: Vec::new(),
        }
    }

    pub fn procedure(return_type: DataType) -> Self {
        Self {
            kind: RecordKind::Procedure,
            data_type: return_type,
            array_length: 1,
            param_types: Vec::new(),
        }
    }
}

/// The synthetic scope word used for the outermost, program-level scope.
pub fn global_scope() -> Word {
    Word::scope_name("GLOBAL", 0, 0)
}

/// A two-level map: scope `Word` -> name -> `Record`.
///
/// The outer scope keyed by [`global_scope`] is seeded at construction with
/// the built-in procedures so that a lookup for, say, `PUTINTEGER` succeeds
/// without any explicit declaration. Reserved words and punctuation are not
/// seeded here: a `Record` only models a variable's or procedure's declared
/// type/arity, and the parser never looks a keyword or punctuation token up
/// by name — `Parser::follow` (`parser/base.rs`) matches on `TokenKind`
/// directly, so a symbol-table entry for `IF` or `;` would never be read.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    scopes: HashMap<Word, HashMap<String, Record>>,
}

impl SymbolTable {
    /// Builds a table with only the global scope, seeded with built-ins.
    pub fn new() -> Self {
        let mut table = Self {
            scopes: HashMap::new(),
        };
        table.create_scope(global_scope());
        table.seed_builtins();
        table
    }

    fn seed_builtins(&mut self) {
        let global = global_scope();
        let builtins: &[(&str, DataType, &[DataType])] = &[
            ("GETBOOL", DataType::Bool, &[]),
            ("GETINTEGER", DataType::Integer, &[]),
            ("GETFLOAT", DataType::Float, &[]),
            ("GETSTRING", DataType::String, &[]),
            ("PUTBOOL", DataType::Bool, &[DataType::Bool]),
            ("PUTINTEGER", DataType::Bool, &[DataType::Integer]),
            ("PUTFLOAT", DataType::Bool, &[DataType::Float]),
            ("PUTSTRING", DataType::Bool, &[DataType::String]),
            ("SQRT", DataType::Float, &[DataType::Integer]),
        ];
        for (name, return_type, params) in builtins {
            let mut record = Record::procedure(*return_type);
            record.param_types = params.to_vec();
            self.scopes
                .get_mut(&global)
                .expect("global scope just created")
                .insert((*name).to_string(), record);
        }
    }

    /// Pushes a new, empty scope. No-op if the scope already exists.
    pub fn create_scope(&mut self, scope: Word) {
        self.scopes.entry(scope).or_default();
    }

    /// Pops a scope, discarding every symbol declared in it.
    pub fn remove_scope(&mut self, scope: &Word) {
        self.scopes.remove(scope);
    }

    /// Inserts `record` under `name` in `scope`.
    ///
    /// Returns `false`, leaving the table unchanged, if `name` is already
    /// declared in `scope` (a double declaration); the caller is
    /// responsible for turning that into a diagnostic.
    pub fn insert(&mut self, scope: &Word, name: &str, record: Record) -> bool {
        let table = self.scopes.entry(scope.clone()).or_default();
        if table.contains_key(name) {
            return false;
        }
        table.insert(name.to_string(), record);
        true
    }

    /// Looks `name` up in exactly one scope, without walking outward.
    pub fn lookup_in(&self, scope: &Word, name: &str) -> Option<&Record> {
        self.scopes.get(scope)?.get(name)
    }

    /// Looks `name` up by walking `scope_stack` from innermost to outermost,
    /// returning the first match.
    pub fn lookup(&self, scope_stack: &[Word], name: &str) -> Option<&Record> {
        scope_stack
            .iter()
            .rev()
            .find_map(|scope| self.lookup_in(scope, name))
    }

    /// Sets the parameter-type list on an already-declared procedure.
    ///
    /// Mirrors the original two-pass procedure header handling: the
    /// procedure name is declared before its parameter list is parsed, so
    /// the parameter types are patched in once `paramList` finishes.
    pub fn set_param_types(&mut self, scope: &Word, name: &str, param_types: Vec<DataType>) {
        if let Some(record) = self.scopes.get_mut(scope).and_then(|t| t.get_mut(name)) {
            record.param_types = param_types;
        }
    }
}
