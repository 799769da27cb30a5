//! Render a syntax tree as a Graphviz graph.
//!
//! Forms are drawn as small ovals, with an edge to each child in order;
//! leaves are tables of token kind, position, and text.

use dot_writer::{Attributes, DotWriter, Scope};
use maud::PreEscaped;

use super::Node;

struct GraphState {
    node_count: usize,
}

impl GraphState {
    fn next_name(&mut self) -> String {
        let name = format!("node{}", self.node_count);
        self.node_count += 1;
        name
    }
}

fn leaf_label(token: &crate::reader::Token) -> PreEscaped<String> {
    maud::html!(
        table border="0" cellborder="1" cellspacing="0" {
            tr {
                td { (token.kind()) }
                td { (token.position()) }
            }
            tr { td colspan="2" { b { (token.text()) } } }
        }
    )
}

/// Add the node (and its children) to the graph; return the node's name.
fn render_node(state: &mut GraphState, graph: &mut Scope, tree: &Node) -> String {
    let name = state.next_name();
    let mut node = graph.node_named(&name);
    match tree {
        Node::Leaf(token) => {
            node.set_shape(dot_writer::Shape::None);
            node.set_html(&format!("<{}>", leaf_label(token).into_string()));
        }
        Node::Sexpr(form) => {
            node.set_label(&format!("() {}", form.position()));
            std::mem::drop(node);
            for child in form.children() {
                let child_name = render_node(state, graph, child);
                graph.edge(&name, child_name);
            }
        }
    }
    name
}

/// Render the tree as a DOT digraph.
pub fn render_graphviz(tree: &Node) -> Vec<u8> {
    let mut outbuf = Vec::new();
    {
        let mut writer = DotWriter::from(&mut outbuf);
        let mut graph = writer.digraph();
        graph.node_attributes().set_font("monospace");
        let mut state = GraphState { node_count: 0 };
        render_node(&mut state, &mut graph, tree);
    }
    outbuf
}
