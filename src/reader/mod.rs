//! Support for reading Lisp forms from interactive input.
//!
//! Input arrives a chunk at a time (typically, a line at a time from a REPL).
//! The reader keeps whatever it hasn't finished with, and picks up where it
//! left off when the next chunk arrives.
//!
//! A feed can end three ways:
//! - a top-level form was completed, and its tree is returned;
//! - the input ran out inside a form (or a token), and more input may complete it;
//! - the input ran out between forms.
//!
//! If input is coming in interactively, the second case is a prompt for more
//! input, not an error. Actual errors (e.g. "())") are reported as diagnostics
//! on a side channel; see [`Reader::take_diagnostics`].

mod cursor;
mod lexer;
mod token;

pub use cursor::Position;
pub use token::{Token, TokenKind};

use crate::data::{Node, Sexpr};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use cursor::Cursor;
use lexer::State;

/// Outcome of feeding input to a reader.
#[derive(Debug, PartialEq, Eq)]
pub enum Feed {
    /// A complete top-level form.
    TreeReady(Node),
    /// Input ran out within a form; `depth` forms are open.
    Suspended { depth: usize },
    /// Input ran out between forms.
    /// Any diagnostics raised along the way are still pending.
    Idle,
}

/// Reader state for one session.
///
/// Not shareable between threads; a session has exactly one reader.
#[derive(Debug)]
pub struct Reader {
    cursor: Cursor,
    state: State,

    /// Forms currently accepting children, outermost first.
    /// The length of the stack is the nesting depth.
    open: Vec<Sexpr>,

    /// Where the token being read started.
    token_start: Position,

    diagnostics: Vec<Diagnostic>,
}

impl Default for Reader {
    fn default() -> Self {
        Reader {
            cursor: Cursor::default(),
            state: State::Start,
            open: Vec::new(),
            token_start: Position::default(),
            diagnostics: Vec::new(),
        }
    }
}

impl Reader {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a chunk of input, and read as far as it allows.
    ///
    /// At most one tree is returned per call. Input after the end of that
    /// tree is retained; see [`Reader::has_pending_input`].
    pub fn feed(&mut self, chunk: &str) -> Feed {
        tracing::trace!(
            retained = self.cursor.retained(),
            chunk = chunk.len(),
            "appending input"
        );
        self.cursor.append(chunk);
        self.resume()
    }

    /// Continue reading from input already provided.
    pub fn resume(&mut self) -> Feed {
        loop {
            match self.step() {
                lexer::Step::Next(state) => {
                    tracing::trace!(from = ?self.state, to = ?state, "transition");
                    self.state = state;
                }
                lexer::Step::Complete(tree) => {
                    self.state = State::Start;
                    tracing::debug!("read complete form at {}", tree.position());
                    return Feed::TreeReady(tree);
                }
                lexer::Step::Suspend => {
                    return if self.state == State::Start {
                        Feed::Idle
                    } else {
                        Feed::Suspended {
                            depth: self.depth(),
                        }
                    };
                }
            }
        }
    }

    /// Whether input remains that hasn't been read yet.
    ///
    /// After a tree is returned, the rest of the chunk may hold more forms;
    /// call [`Reader::resume`] to read them.
    pub fn has_pending_input(&self) -> bool {
        !self.cursor.is_exhausted()
    }

    /// Current nesting depth: the number of unclosed `(`.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether the reader is between top-level forms.
    pub fn is_idle(&self) -> bool {
        self.state == State::Start
    }

    /// Drain the diagnostics raised since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn report(&mut self, at: Position, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(at, kind);
        tracing::debug!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests;
