//! Incremental Lisp reader, for line-at-a-time input.
//!
//! A [`Session`] pairs a [`reader::Reader`], which builds syntax trees from
//! chunks of input, with an [`eval::Evaluator`], which dispatches the three
//! built-in keywords (`def`, `list`, `quote`) over each completed form.

pub mod data;
pub mod diagnostic;
pub mod eval;
pub mod reader;

use std::io::{BufRead, Write};

pub use data::{render, Node};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use reader::{Feed, Reader};

use eval::Evaluator;

/// Runtime settings for a session and its REPL.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bucket count for the symbol table.
    pub symbol_buckets: usize,
    /// Print the symbol table after each line that leaves no form open.
    pub show_symbols: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            symbol_buckets: eval::symbols::DEFAULT_BUCKETS,
            show_symbols: false,
        }
    }
}

impl Config {
    /// Defaults, overridden by `SEXPISH_BUCKETS` and `SEXPISH_SHOW_SYMBOLS`.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(buckets) = std::env::var_os("SEXPISH_BUCKETS") {
            match buckets.to_string_lossy().parse::<usize>() {
                Ok(n) if n > 0 => config.symbol_buckets = n,
                _ => tracing::warn!("ignoring invalid SEXPISH_BUCKETS={buckets:?}"),
            }
        }
        if std::env::var_os("SEXPISH_SHOW_SYMBOLS").is_some() {
            config.show_symbols = true;
        }
        config
    }
}

/// A reader and the evaluator it feeds.
#[derive(Debug, Default)]
pub struct Session {
    reader: Reader,
    evaluator: Evaluator,
    diagnostics: Vec<Diagnostic>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Session {
            reader: Reader::new(),
            evaluator: Evaluator::with_buckets(config.symbol_buckets),
            diagnostics: Vec::new(),
        }
    }

    /// Add a chunk of input; dispatch the next form, if it completes.
    ///
    /// A completed form that produces nothing (a definition, or an error)
    /// is reported as `Idle`. Input beyond the first completed form is kept;
    /// see [`Session::has_pending_input`].
    pub fn feed(&mut self, chunk: &str) -> Feed {
        let read = self.reader.feed(chunk);
        self.dispatch(read)
    }

    /// Continue with input already provided.
    pub fn resume(&mut self) -> Feed {
        let read = self.reader.resume();
        self.dispatch(read)
    }

    fn dispatch(&mut self, read: Feed) -> Feed {
        let Feed::TreeReady(tree) = read else {
            return read;
        };
        match self.evaluator.eval(tree) {
            Ok(Some(result)) => Feed::TreeReady(result),
            Ok(None) => Feed::Idle,
            Err(diagnostic) => {
                tracing::debug!("{diagnostic}");
                // Anything the reader raised came first.
                self.diagnostics.append(&mut self.reader.take_diagnostics());
                self.diagnostics.push(diagnostic);
                Feed::Idle
            }
        }
    }

    pub fn has_pending_input(&self) -> bool {
        self.reader.has_pending_input()
    }

    /// Nesting depth of the form being read.
    pub fn depth(&self) -> usize {
        self.reader.depth()
    }

    /// Drain diagnostics from reading and dispatch, in the order raised.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.append(&mut self.reader.take_diagnostics());
        std::mem::take(&mut self.diagnostics)
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}

fn prompt(depth: usize) -> String {
    if depth > 0 {
        format!("{depth:<2}> ")
    } else {
        ">>> ".to_owned()
    }
}

/// Run a read-dispatch-print loop until `input` is exhausted.
///
/// Results are written to `output`, along with prompts;
/// diagnostics go to `errors`.
pub fn repl(
    input: &mut impl BufRead,
    output: &mut impl Write,
    errors: &mut impl Write,
    config: &Config,
) -> std::io::Result<()> {
    let mut session = Session::new(config);
    let mut line = String::new();
    loop {
        write!(output, "{}", prompt(session.depth()))?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let mut outcome = session.feed(&line);
        loop {
            if let Feed::TreeReady(tree) = &outcome {
                writeln!(output, "{tree}")?;
            }
            for diagnostic in session.take_diagnostics() {
                writeln!(errors, "{diagnostic}")?;
            }
            if !session.has_pending_input() {
                break;
            }
            outcome = session.resume();
        }
        if config.show_symbols && session.depth() == 0 {
            for (name, tree) in session.evaluator().symbols().iter() {
                writeln!(output, "{name}: {tree}")?;
            }
        }
    }
    writeln!(output)?;
    Ok(())
}
