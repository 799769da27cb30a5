use super::*;
use crate::data::render;
use crate::diagnostic::Expected;

/// Feed the whole input as one chunk, and expect a tree.
fn read_one(input: &str) -> Node {
    let mut reader = Reader::new();
    match reader.feed(input) {
        Feed::TreeReady(tree) => tree,
        v => panic!("unexpected read result for {input:?}: {v:?}"),
    }
}

fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind.clone()).collect()
}

#[test]
fn nested_form() {
    let tree = read_one("(a (b c) d)");
    let root = tree.as_sexpr().expect("root should be a form");
    assert_eq!(root.len(), 3);
    let inner = root.children()[1].as_sexpr().expect("second child should be a form");
    assert_eq!(inner.len(), 2);
    assert_eq!(render(&tree), "(a (b c) d)");
}

#[test]
fn normalizes_whitespace() {
    let tree = read_one("(  a\t(b\n   c )d )");
    assert_eq!(render(&tree), "(a (b c) d)");
}

#[test]
fn literals_and_comments() {
    let tree = read_one("(say \"hi there\" `raw\nstring` ; trailing note\n)");
    let root = tree.as_sexpr().unwrap();
    let got: Vec<(TokenKind, &str)> = root
        .children()
        .iter()
        .map(|n| match n {
            Node::Leaf(t) => (t.kind(), t.text()),
            Node::Sexpr(_) => panic!("unexpected form: {n}"),
        })
        .collect();
    assert_eq!(
        got,
        [
            (TokenKind::Identifier, "say"),
            (TokenKind::String, "hi there"),
            (TokenKind::RawString, "raw\nstring"),
            (TokenKind::Comment, " trailing note"),
        ]
    );
}

#[test]
fn split_anywhere() {
    let input = "(def _x1 (list `a b` \"c d\" ; note\n (q)) e)";
    let want = read_one(input);

    for (split, _) in input.char_indices().skip(1) {
        let (first, second) = input.split_at(split);
        let mut reader = Reader::new();
        let got = match reader.feed(first) {
            Feed::TreeReady(_) => panic!("completed early at split {split}"),
            Feed::Idle => panic!("went idle at split {split}"),
            Feed::Suspended { .. } => reader.feed(second),
        };
        assert_eq!(got, Feed::TreeReady(want.clone()), "split at {split}");
        assert!(reader.take_diagnostics().is_empty(), "split at {split}");
    }
}

#[test]
fn one_char_at_a_time() {
    let input = "(a (b `c`) \"d\")";
    let want = read_one(input);
    let mut reader = Reader::new();
    let mut got = None;
    for (i, c) in input.char_indices() {
        match reader.feed(&c.to_string()) {
            Feed::TreeReady(tree) => {
                assert_eq!(i, input.len() - 1, "completed early");
                got = Some(tree);
            }
            Feed::Suspended { .. } => (),
            Feed::Idle => panic!("went idle at {i}"),
        }
    }
    assert_eq!(got, Some(want));
}

#[test]
fn nesting_survives_feeds() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("("), Feed::Suspended { depth: 1 });
    assert_eq!(reader.depth(), 1);
    match reader.feed(")") {
        Feed::TreeReady(tree) => {
            assert!(tree.as_sexpr().unwrap().is_empty());
        }
        v => panic!("unexpected read result: {v:?}"),
    }
    assert_eq!(reader.depth(), 0);
    assert!(reader.is_idle());
}

#[test]
fn depth_tracks_open_forms() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("(a (b (c\n"), Feed::Suspended { depth: 3 });
    assert_eq!(reader.feed(")\n"), Feed::Suspended { depth: 2 });
    assert!(matches!(reader.feed("))\n"), Feed::TreeReady(_)));
}

#[test]
fn unbalanced_close() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("))"), Feed::Idle);
    assert_eq!(
        kinds(&reader.take_diagnostics()),
        [
            DiagnosticKind::UnbalancedCloseParen,
            DiagnosticKind::UnbalancedCloseParen
        ]
    );
    // Recoverable: the next form reads fine.
    assert!(matches!(reader.feed("(ok)"), Feed::TreeReady(_)));
    assert!(reader.take_diagnostics().is_empty());
}

#[test]
fn extra_close_after_form() {
    let mut reader = Reader::new();
    let tree = match reader.feed("(a))") {
        Feed::TreeReady(tree) => tree,
        v => panic!("unexpected read result: {v:?}"),
    };
    assert_eq!(render(&tree), "(a)");
    assert!(reader.has_pending_input());
    assert_eq!(reader.resume(), Feed::Idle);
    let diagnostics = reader.take_diagnostics();
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::UnbalancedCloseParen]);
    assert_eq!(diagnostics[0].position(), Position { line: 1, column: 4 });
}

#[test]
fn several_forms_in_one_chunk() {
    let mut reader = Reader::new();
    let mut got = Vec::new();
    let mut outcome = reader.feed("(a) (b c)\n(d");
    loop {
        match outcome {
            Feed::TreeReady(tree) => got.push(render(&tree)),
            Feed::Suspended { depth } => {
                assert_eq!(depth, 1);
                break;
            }
            Feed::Idle => panic!("went idle with a form open"),
        }
        outcome = reader.resume();
    }
    assert_eq!(got, ["(a)", "(b c)"]);
    assert!(!reader.has_pending_input());
}

#[test]
fn unexpected_characters() {
    let mut reader = Reader::new();
    let outcome = reader.feed("x (a 1 b)");
    let diagnostics = reader.take_diagnostics();
    assert_eq!(
        kinds(&diagnostics),
        [
            DiagnosticKind::UnexpectedCharacter('x', Expected::OpenParen),
            DiagnosticKind::UnexpectedCharacter('1', Expected::AtomOrClose),
        ]
    );
    assert_eq!(diagnostics[0].position(), Position { line: 1, column: 1 });
    assert_eq!(diagnostics[1].position(), Position { line: 1, column: 6 });
    match outcome {
        Feed::TreeReady(tree) => assert_eq!(render(&tree), "(a b)"),
        v => panic!("unexpected read result: {v:?}"),
    }
}

#[test]
fn unterminated_string() {
    let mut reader = Reader::new();
    assert_eq!(
        reader.feed("(a \"oops\n"),
        Feed::Suspended { depth: 1 }
    );
    let diagnostics = reader.take_diagnostics();
    assert_eq!(kinds(&diagnostics), [DiagnosticKind::UnterminatedString]);
    assert_eq!(diagnostics[0].position(), Position { line: 1, column: 4 });

    match reader.feed("b)") {
        Feed::TreeReady(tree) => assert_eq!(render(&tree), "(a b)"),
        v => panic!("unexpected read result: {v:?}"),
    }
}

#[test]
fn string_waits_for_more() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("(\"no end yet"), Feed::Suspended { depth: 1 });
    match reader.feed(" here\")") {
        Feed::TreeReady(tree) => assert_eq!(render(&tree), "(\"no end yet here\")"),
        v => panic!("unexpected read result: {v:?}"),
    }
}

#[test]
fn raw_string_spans_lines() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("(`first\n"), Feed::Suspended { depth: 1 });
    assert_eq!(reader.feed("second\n"), Feed::Suspended { depth: 1 });
    match reader.feed("third` done)\n") {
        Feed::TreeReady(tree) => {
            assert_eq!(render(&tree), "(`first\nsecond\nthird` done)")
        }
        v => panic!("unexpected read result: {v:?}"),
    }
    assert!(reader.take_diagnostics().is_empty());
}

#[test]
fn abort_discards_open_forms() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("(a (b (c\n"), Feed::Suspended { depth: 3 });
    assert_eq!(reader.feed("]\n"), Feed::Idle);
    assert_eq!(reader.depth(), 0);
    assert!(reader.take_diagnostics().is_empty());
    match reader.feed("(fresh)") {
        Feed::TreeReady(tree) => assert_eq!(render(&tree), "(fresh)"),
        v => panic!("unexpected read result: {v:?}"),
    }
}

#[test]
fn abort_then_more_input() {
    let mut reader = Reader::new();
    match reader.feed("(a ] (b)") {
        Feed::TreeReady(tree) => assert_eq!(render(&tree), "(b)"),
        v => panic!("unexpected read result: {v:?}"),
    }
}

#[test]
fn token_positions() {
    let tree = read_one("(first\n  (second \"third\")\n ;fourth\n)");
    let root = tree.as_sexpr().unwrap();
    assert_eq!(root.position(), Position { line: 1, column: 1 });
    let children = root.children();
    assert_eq!(children[0].position(), Position { line: 1, column: 2 });
    assert_eq!(children[1].position(), Position { line: 2, column: 3 });
    let inner = children[1].as_sexpr().unwrap().children();
    assert_eq!(inner[0].position(), Position { line: 2, column: 4 });
    assert_eq!(inner[1].position(), Position { line: 2, column: 11 });
    assert_eq!(children[2].position(), Position { line: 3, column: 2 });
}

#[test]
fn positions_continue_across_feeds() {
    let mut reader = Reader::new();
    reader.feed("(a\n");
    reader.feed("  b\n");
    let tree = match reader.feed(")\n") {
        Feed::TreeReady(tree) => tree,
        v => panic!("unexpected read result: {v:?}"),
    };
    let children = tree.as_sexpr().unwrap().children();
    assert_eq!(children[1].position(), Position { line: 2, column: 3 });
}

#[test]
fn identifier_continues_across_feeds() {
    let mut reader = Reader::new();
    assert_eq!(reader.feed("(ab"), Feed::Suspended { depth: 1 });
    match reader.feed("c_9 d)") {
        Feed::TreeReady(tree) => assert_eq!(render(&tree), "(abc_9 d)"),
        v => panic!("unexpected read result: {v:?}"),
    }
}

#[test]
fn rendered_tree_reads_back() {
    let input = "(a ;c\n (`r` \"s\") ;d\n)";
    let tree = read_one(input);
    let again = read_one(&render(&tree));
    assert_eq!(tree, again);
}
