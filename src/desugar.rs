//! Interpolation desugaring: turning Groovy fragment text into something
//! shellcheck can parse.
//!
//! Groovy's `${EXPR}` interpolation means nothing to shellcheck, so each
//! occurrence is rewritten to a plain `$EXPR` variable reference. Backslashes
//! only exist in the fragment to escape the Groovy string delimiter, so they
//! are stripped afterwards.

/// One interpolation expression rewritten during desugaring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The inner expression text of `${EXPR}`.
    pub expression: String,
    /// What it was rewritten to (`$EXPR`).
    pub placeholder: String,
}

/// Fragment text ready for the external linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desugared {
    pub text: String,
    /// Ordered table of rewrites, one entry per `${...}` occurrence.
    pub substitutions: Vec<Substitution>,
}

/// Rewrite `${EXPR}` occurrences to `$EXPR` and strip backslashes.
///
/// Each occurrence is matched lazily up to the first `}` and rewritten
/// independently; an unterminated `${` passes through verbatim.
pub fn desugar(fragment: &str) -> Desugared {
    let mut text = String::with_capacity(fragment.len());
    let mut substitutions = Vec::new();

    let mut rest = fragment;
    while let Some(pos) = rest.find("${") {
        text.push_str(&rest[..pos]);
        let inner = &rest[pos + 2..];
        match inner.find('}') {
            Some(len) => {
                let expression = &inner[..len];
                text.push('$');
                text.push_str(expression);
                substitutions.push(Substitution {
                    expression: expression.to_string(),
                    placeholder: format!("${expression}"),
                });
                rest = &inner[len + 1..];
            }
            None => {
                text.push_str(&rest[pos..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    text.retain(|c| c != '\\');

    Desugared {
        text,
        substitutions,
    }
}
