//! Interactive reader: reads forms a line at a time from stdin,
//! dispatches each completed form, and prints the result.
//!
//! Diagnostics go to stderr. `SEXPISH_LOG` sets the tracing level
//! (e.g. `debug`, `trace`); `SEXPISH_SHOW_SYMBOLS` prints the symbol table
//! as it changes.
//!
//! ```ignore
//! sexpish
//! >>> (quote (a b))
//! (a b)
//! ```

fn main() -> std::io::Result<()> {
    let level = std::env::var("SEXPISH_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = sexpish::Config::from_env();
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    sexpish::repl(&mut stdin, &mut stdout, &mut stderr, &config)
}
