use crate::data::{Node, Sexpr};
use crate::diagnostic::{Arity, Diagnostic, DiagnosticKind};
use crate::reader::TokenKind;

use super::{Builtin, EvalResult, Evaluator};

/// The keywords, and the builtins that implement them.
///
/// A form is dispatched by comparing its head against each name in turn.
pub const KEYWORDS: &[(&str, Builtin)] = &[
    ("def", builtin_def),
    ("list", builtin_list),
    ("quote", builtin_quote),
];

/// Remove the keyword from the form, and check the number of arguments left.
fn take_keyword(mut form: Sexpr, keyword: &'static str, arity: Arity) -> Result<Sexpr, Diagnostic> {
    let at = form.position();
    let _ = form.pop_front();
    if arity.accepts(form.len()) {
        Ok(form)
    } else {
        Err(Diagnostic::new(
            at,
            DiagnosticKind::ArityMismatch {
                keyword,
                expected: arity,
                got: form.len(),
            },
        ))
    }
}

/// `(def name value)`: bind `name` to `value`. Produces nothing.
///
/// A form in value position is dispatched first, and its result is bound.
/// Rebinding a name drops whatever it was bound to before.
fn builtin_def(eval: &mut Evaluator, form: Sexpr) -> EvalResult {
    let at = form.position();
    let mut args = take_keyword(form, "def", Arity::Exactly(2))?.into_children();
    let value = args.pop().expect("arity checked");
    let target = args.pop().expect("arity checked");

    let name = match target {
        Node::Leaf(token) if token.kind() == TokenKind::Identifier => token.into_text(),
        other => {
            return Err(Diagnostic::new(
                other.position(),
                DiagnosticKind::InvalidBindingTarget,
            ))
        }
    };

    let value = match value {
        Node::Sexpr(_) => {
            let value_at = value.position();
            eval.eval(value)?
                .ok_or_else(|| Diagnostic::new(value_at, DiagnosticKind::Unevaluatable))?
        }
        leaf => leaf,
    };

    let symbols = eval.symbols_mut();
    if let Ok(old) = symbols.remove(&name) {
        tracing::debug!("{at}: redefining {name}, dropping {old}");
    }
    symbols.insert(&name, value);
    Ok(None)
}

/// `(list a b ...)`: the form itself, without the keyword.
fn builtin_list(_eval: &mut Evaluator, form: Sexpr) -> EvalResult {
    let form = take_keyword(form, "list", Arity::AtLeast(1))?;
    Ok(Some(form.into()))
}

/// `(quote x)`: just `x`.
fn builtin_quote(_eval: &mut Evaluator, form: Sexpr) -> EvalResult {
    let mut args = take_keyword(form, "quote", Arity::Exactly(1))?.into_children();
    Ok(args.pop())
}
