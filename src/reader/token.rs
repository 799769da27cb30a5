//! Tokens harvested from the input.

use super::Position;

/// The classes of token the reader knows about.
///
/// Integer, Float, and Character are reserved:
/// no reader state produces them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    OpenForm,
    CloseForm,
    Integer,
    Float,
    Character,
    String,
    RawString,
    Comment,
}

impl TokenKind {
    /// Whether this kind marks structure rather than content.
    pub fn is_structural(self) -> bool {
        matches!(self, TokenKind::OpenForm | TokenKind::CloseForm)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::OpenForm => "open",
            TokenKind::CloseForm => "close",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Character => "character",
            TokenKind::String => "string",
            TokenKind::RawString => "raw string",
            TokenKind::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// A token, along with the position of its first character.
///
/// For delimited tokens (strings, raw strings, comments) the position is
/// that of the opening delimiter; the text excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: usize,
    column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, at: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            line: at.line,
            column: at.column,
        }
    }

    /// The marker token for a `(`.
    pub fn open(at: Position) -> Self {
        Token::new(TokenKind::OpenForm, String::new(), at)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}; {} {:?}", self.line, self.column, self.kind, self.text)
    }
}
