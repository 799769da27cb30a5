//! Render unevaluated Lisp trees as Graphviz.
//!
//! Reads stdin a line at a time, the way the REPL does, and writes one
//! digraph per completed top-level form. Diagnostics go to stderr.
//! If `SEXPISH_SAVE_GRAPH` is set, the DOT source is also kept in a
//! temporary file, whose path is logged.
//!
//! Usage:
//!
//! ```ignore
//! <input.lisp tree_to_graphviz | dot -T png >output.png
//! ```

use std::io::{BufRead, Write};

use sexpish::data::render::render_graphviz;
use sexpish::{Feed, Reader};

fn save_graph(gv: &[u8]) {
    let _ = tempfile::NamedTempFile::new()
        .and_then(|mut f| {
            f.write_all(gv)?;
            let (_, pathbuf) = f.keep()?;
            Ok(pathbuf)
        })
        .map(|pathbuf| {
            tracing::info!("DOT source in {}", pathbuf.display());
        })
        .map_err(|e| tracing::warn!("could not save DOT source: {e}"));
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let save = std::env::var_os("SEXPISH_SAVE_GRAPH").is_some();
    let mut reader = Reader::new();
    let mut stdout = std::io::stdout().lock();

    for line in std::io::stdin().lock().lines() {
        let mut line = line?;
        line.push('\n');
        let mut outcome = reader.feed(&line);
        loop {
            if let Feed::TreeReady(tree) = &outcome {
                let gv = render_graphviz(tree);
                if save {
                    save_graph(&gv);
                }
                stdout.write_all(&gv)?;
                writeln!(stdout)?;
            }
            for diagnostic in reader.take_diagnostics() {
                eprintln!("{diagnostic}");
            }
            if !reader.has_pending_input() {
                break;
            }
            outcome = reader.resume();
        }
    }

    if !reader.is_idle() {
        eprintln!("end of input inside a form of depth {}", reader.depth());
    }
    Ok(())
}
