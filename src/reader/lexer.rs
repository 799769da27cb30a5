//! The reader's state machine.
//!
//! Each state consumes characters from the cursor until it either hands off
//! to another state, completes a top-level form, or runs out of input.
//! Running out is a suspension: the state is kept, and the same state picks
//! up again once more input is appended.

use super::{Reader, Token, TokenKind};
use crate::data::{Node, Sexpr};
use crate::diagnostic::{DiagnosticKind, Expected};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum State {
    /// Between top-level forms.
    Start,
    /// Within a form, between tokens.
    Sexpr,
    Ident,
    RawString,
    Str,
    LineComment,
}

pub(super) enum Step {
    Next(State),
    /// Out of input; resume in the current state.
    Suspend,
    Complete(Node),
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl Reader {
    pub(super) fn step(&mut self) -> Step {
        match self.state {
            State::Start => self.start(),
            State::Sexpr => self.sexpr(),
            State::Ident => self.ident(),
            State::RawString => self.raw_string(),
            State::Str => self.string(),
            State::LineComment => self.line_comment(),
        }
    }

    fn start(&mut self) -> Step {
        loop {
            let at = self.cursor.position();
            let Some(c) = self.cursor.advance() else {
                return Step::Suspend;
            };
            self.cursor.discard_span();
            match c {
                '(' => {
                    self.open.push(Sexpr::new(Token::open(at)));
                    return Step::Next(State::Sexpr);
                }
                ')' => self.report(at, DiagnosticKind::UnbalancedCloseParen),
                c if is_whitespace(c) => (),
                c => self.report(
                    at,
                    DiagnosticKind::UnexpectedCharacter(c, Expected::OpenParen),
                ),
            }
        }
    }

    fn sexpr(&mut self) -> Step {
        loop {
            let at = self.cursor.position();
            let Some(c) = self.cursor.advance() else {
                return Step::Suspend;
            };
            if is_ident_start(c) {
                // Leave the first character in the span; it's part of the token.
                self.token_start = at;
                return Step::Next(State::Ident);
            }
            self.cursor.discard_span();
            match c {
                '(' => self.open.push(Sexpr::new(Token::open(at))),
                ')' => {
                    let Some(form) = self.open.pop() else {
                        self.report(at, DiagnosticKind::UnbalancedCloseParen);
                        continue;
                    };
                    match self.open.last_mut() {
                        Some(parent) => parent.push(form),
                        None => return Step::Complete(form.into()),
                    }
                }
                ']' => {
                    tracing::debug!(depth = self.open.len(), "abandoning open forms at {at}");
                    self.open.clear();
                    return Step::Next(State::Start);
                }
                '`' => {
                    self.token_start = at;
                    return Step::Next(State::RawString);
                }
                '"' => {
                    self.token_start = at;
                    return Step::Next(State::Str);
                }
                ';' => {
                    self.token_start = at;
                    return Step::Next(State::LineComment);
                }
                c if is_whitespace(c) => (),
                c => self.report(
                    at,
                    DiagnosticKind::UnexpectedCharacter(c, Expected::AtomOrClose),
                ),
            }
        }
    }

    fn ident(&mut self) -> Step {
        loop {
            match self.cursor.advance() {
                None => return Step::Suspend,
                Some(c) if is_ident_char(c) => (),
                Some(_) => break,
            }
        }
        self.cursor.retreat();
        self.emit(TokenKind::Identifier)
    }

    fn raw_string(&mut self) -> Step {
        self.delimited(TokenKind::RawString, '`')
    }

    fn line_comment(&mut self) -> Step {
        self.delimited(TokenKind::Comment, '\n')
    }

    fn string(&mut self) -> Step {
        loop {
            match self.cursor.advance() {
                None => return Step::Suspend,
                Some('"') => break,
                Some('\n') => {
                    self.cursor.discard_span();
                    let at = self.token_start;
                    self.report(at, DiagnosticKind::UnterminatedString);
                    return Step::Next(State::Sexpr);
                }
                Some(_) => (),
            }
        }
        self.cursor.retreat();
        let step = self.emit(TokenKind::String);
        self.skip_delimiter();
        step
    }

    /// Read up to (not including) the terminator, and emit the token.
    /// The terminator is consumed and discarded.
    fn delimited(&mut self, kind: TokenKind, terminator: char) -> Step {
        loop {
            match self.cursor.advance() {
                None => return Step::Suspend,
                Some(c) if c == terminator => break,
                Some(_) => (),
            }
        }
        self.cursor.retreat();
        let step = self.emit(kind);
        self.skip_delimiter();
        step
    }

    fn skip_delimiter(&mut self) {
        self.cursor.advance();
        self.cursor.discard_span();
    }

    /// Harvest the current span as a token, and add it to the innermost open form.
    fn emit(&mut self, kind: TokenKind) -> Step {
        let token = Token::new(kind, self.cursor.commit_span(), self.token_start);
        tracing::trace!("token {token}");
        self.append_leaf(token);
        Step::Next(State::Sexpr)
    }

    fn append_leaf(&mut self, token: Token) {
        match self.open.last_mut() {
            Some(form) => form.push(Node::leaf(token)),
            // Token states are only entered from within a form.
            None => tracing::warn!("dropping {token}: no open form"),
        }
    }
}
