//! Diagnostics reported while reading and dispatching forms.
//!
//! None of these are fatal to a session. A diagnostic means the offending
//! character, token, or form was dropped; reading carries on after it.
//!
//! Running out of input in the middle of a form is not a diagnostic;
//! that's a suspended read, which more input may complete.

use crate::reader::Position;

/// A diagnostic, along with where in the input it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub kind: DiagnosticKind,
}

/// Number of arguments a keyword accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, got: usize) -> bool {
        match self {
            Arity::Exactly(n) => got == n,
            Arity::AtLeast(n) => got >= n,
        }
    }
}

/// What the reader was looking for when it found an unexpected character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Between top-level forms, only `(` starts anything.
    OpenParen,
    /// Inside a form.
    AtomOrClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A character that can't start anything in the current state.
    UnexpectedCharacter(char, Expected),
    /// A `)` with no open form to close.
    UnbalancedCloseParen,
    /// A `"` string that hit a newline before its closing quote.
    UnterminatedString,
    /// The head of a form is an identifier that isn't a keyword.
    UndefinedSymbol(String),
    ArityMismatch {
        keyword: &'static str,
        expected: Arity,
        got: usize,
    },
    /// `def` was asked to bind something other than an identifier.
    InvalidBindingTarget,
    /// An empty form, a form with a non-identifier head,
    /// or a value that produced nothing to bind.
    Unevaluatable,
}

impl Diagnostic {
    pub fn new(at: Position, kind: DiagnosticKind) -> Self {
        Diagnostic {
            line: at.line,
            column: at.column,
            kind,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(1) => write!(f, "exactly 1 argument"),
            Arity::Exactly(n) => write!(f, "exactly {n} arguments"),
            Arity::AtLeast(1) => write!(f, "at least 1 argument"),
            Arity::AtLeast(n) => write!(f, "at least {n} arguments"),
        }
    }
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::OpenParen => write!(f, "'(' to start a form"),
            Expected::AtomOrClose => write!(f, "an atom or ')'"),
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UnexpectedCharacter(c, expected) => {
                write!(f, "looking for {expected}, found {c:?}")
            }
            DiagnosticKind::UnbalancedCloseParen => write!(f, "too many end parens"),
            DiagnosticKind::UnterminatedString => {
                write!(f, "string literal is missing its closing quote before end of line")
            }
            DiagnosticKind::UndefinedSymbol(name) => write!(f, "undefined symbol {name:?}"),
            DiagnosticKind::ArityMismatch {
                keyword,
                expected,
                got,
            } => write!(f, "{keyword} takes {expected}, got {got}"),
            DiagnosticKind::InvalidBindingTarget => {
                write!(f, "def can only bind to an identifier")
            }
            DiagnosticKind::Unevaluatable => write!(f, "unevaluatable form"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}:{}: {}", self.line, self.column, self.kind)
    }
}

impl std::error::Error for Diagnostic {}
