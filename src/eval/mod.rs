//! Keyword dispatch over completed forms.
//!
//! There's no general evaluator. A completed top-level form is inspected
//! for a keyword at its head; the keyword's builtin rewrites the form.
//! Anything else is reported and dropped.
//!
//! The evaluator owns the session's symbol table, which `def` binds into.

mod builtins;
pub mod symbols;

pub use builtins::KEYWORDS;
use symbols::SymbolTable;

use crate::data::{Node, Sexpr};
use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// Result of dispatching a form: a tree, or nothing (e.g. for a definition).
pub type EvalResult = Result<Option<Node>, Diagnostic>;

/// A Builtin rewrites a form whose head is its keyword.
/// The form still has the keyword at its head.
pub type Builtin = fn(eval: &mut Evaluator, form: Sexpr) -> EvalResult;

#[derive(Debug, Default)]
pub struct Evaluator {
    symbols: SymbolTable,
}

impl Evaluator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_buckets(buckets: usize) -> Self {
        Evaluator {
            symbols: SymbolTable::new(buckets),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Dispatch a completed form.
    ///
    /// The tree is consumed; on error, it is dropped.
    pub fn eval(&mut self, tree: Node) -> EvalResult {
        let form = match tree {
            Node::Sexpr(form) => form,
            Node::Leaf(token) => {
                return Err(Diagnostic::new(
                    token.position(),
                    DiagnosticKind::Unevaluatable,
                ))
            }
        };
        let Some(head) = form.head_identifier() else {
            let at = form.children().first().map_or(form.position(), Node::position);
            return Err(Diagnostic::new(at, DiagnosticKind::Unevaluatable));
        };

        match KEYWORDS.iter().find(|(name, _)| *name == head.text()) {
            Some((name, builtin)) => {
                tracing::trace!("dispatching {name} at {}", form.position());
                builtin(self, form)
            }
            None => Err(Diagnostic::new(
                head.position(),
                DiagnosticKind::UndefinedSymbol(head.text().to_owned()),
            )),
        }
    }
}
