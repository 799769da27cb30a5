//! Syntax trees built by the reader.
//!
//! A tree is either a leaf, carrying a single content token,
//! or a form (`Sexpr`), which owns its children in source order.
//!
//! Trees are built bottom-up by the reader and rewritten by the dispatcher;
//! the only independent operations here are rendering and comparison.
//!
//! Rendering goes through `Display`; the output can be read back as the same tree.
//! Equality is structural. Positions are carried along for diagnostics,
//! but two trees that differ only in where they were read are equal.

#[cfg(feature = "render")]
pub mod render;

use crate::reader::{Position, Token, TokenKind};

#[derive(Debug, Clone)]
pub enum Node {
    Leaf(Token),
    Sexpr(Sexpr),
}

/// A parenthesized form.
#[derive(Debug, Clone)]
pub struct Sexpr {
    open: Token,
    children: Vec<Node>,
}

impl Sexpr {
    pub fn new(open: Token) -> Self {
        debug_assert_eq!(open.kind(), TokenKind::OpenForm);
        Sexpr {
            open,
            children: Vec::new(),
        }
    }

    /// Append a child, after all existing children.
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The first child, if it is an identifier.
    pub fn head_identifier(&self) -> Option<&Token> {
        self.children.first().and_then(Node::as_identifier)
    }

    /// Remove and return the first child, shifting the rest left.
    pub fn pop_front(&mut self) -> Option<Node> {
        if self.children.is_empty() {
            None
        } else {
            Some(self.children.remove(0))
        }
    }

    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Position of the opening paren.
    pub fn position(&self) -> Position {
        self.open.position()
    }
}

impl Node {
    /// Make a leaf from a content token.
    pub fn leaf(token: Token) -> Self {
        debug_assert!(!token.kind().is_structural());
        Node::Leaf(token)
    }

    pub fn as_sexpr(&self) -> Option<&Sexpr> {
        match self {
            Node::Sexpr(s) => Some(s),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Token> {
        match self {
            Node::Leaf(t) if t.kind() == TokenKind::Identifier => Some(t),
            _ => None,
        }
    }

    /// Position of the token this node starts with.
    pub fn position(&self) -> Position {
        match self {
            Node::Leaf(t) => t.position(),
            Node::Sexpr(s) => s.position(),
        }
    }
}

impl From<Sexpr> for Node {
    fn from(value: Sexpr) -> Self {
        Node::Sexpr(value)
    }
}

impl From<Token> for Node {
    fn from(value: Token) -> Self {
        Node::leaf(value)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => a.kind() == b.kind() && a.text() == b.text(),
            (Node::Sexpr(a), Node::Sexpr(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl PartialEq for Sexpr {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl Eq for Sexpr {}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Sexpr(s) => std::fmt::Display::fmt(s, f),
            Node::Leaf(t) => match t.kind() {
                TokenKind::String => write!(f, "\"{}\"", t.text()),
                TokenKind::RawString => write!(f, "`{}`", t.text()),
                // Comments run to end-of-line; close the line so whatever follows is still read.
                TokenKind::Comment => writeln!(f, ";{}", t.text()),
                _ => f.write_str(t.text()),
            },
        }
    }
}

impl std::fmt::Display for Sexpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, child) in self.children.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            std::fmt::Display::fmt(child, f)?;
        }
        write!(f, ")")
    }
}

/// Render a tree back to text.
pub fn render(tree: &Node) -> String {
    tree.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    fn ident(s: &str) -> Node {
        Node::leaf(Token::new(TokenKind::Identifier, s, at(1, 1)))
    }

    fn form(children: impl IntoIterator<Item = Node>) -> Node {
        let mut s = Sexpr::new(Token::open(at(1, 1)));
        for c in children {
            s.push(c);
        }
        s.into()
    }

    #[test]
    fn render_nested() {
        let tree = form([ident("a"), form([ident("b"), ident("c")]), ident("d")]);
        assert_eq!(render(&tree), "(a (b c) d)");
    }

    #[test]
    fn render_literals() {
        let tree = form([
            Node::leaf(Token::new(TokenKind::String, "hi there", at(1, 2))),
            Node::leaf(Token::new(TokenKind::RawString, "raw \"q\"", at(1, 13))),
            Node::leaf(Token::new(TokenKind::Comment, " note", at(1, 24))),
        ]);
        assert_eq!(render(&tree), "(\"hi there\" `raw \"q\"` ; note\n)");
    }

    #[test]
    fn render_empty() {
        assert_eq!(render(&form([])), "()");
    }

    #[test]
    fn equality_ignores_position() {
        let a = Node::leaf(Token::new(TokenKind::Identifier, "x", at(1, 1)));
        let b = Node::leaf(Token::new(TokenKind::Identifier, "x", at(9, 4)));
        assert_eq!(a, b);
    }

    #[test]
    fn equality_compares_kind() {
        let a = Node::leaf(Token::new(TokenKind::Identifier, "x", at(1, 1)));
        let b = Node::leaf(Token::new(TokenKind::String, "x", at(1, 1)));
        assert_ne!(a, b);
        assert_ne!(form([a.clone()]), a);
    }

    #[test]
    fn equality_is_ordered() {
        let ab = form([ident("a"), ident("b")]);
        let ba = form([ident("b"), ident("a")]);
        assert_ne!(ab, ba);
        assert_eq!(ab, form([ident("a"), ident("b")]));
    }

    #[test]
    fn pop_front_shifts() {
        let mut s = Sexpr::new(Token::open(at(1, 1)));
        s.push(ident("list"));
        s.push(ident("a"));
        s.push(ident("b"));
        assert_eq!(s.head_identifier().map(Token::text), Some("list"));
        assert_eq!(s.pop_front(), Some(ident("list")));
        assert_eq!(s.children(), &[ident("a"), ident("b")]);
    }
}
