//! Namespace wrapping and final cleanup of Ruby output.

use crate::common::builder::SourceBuilder;
use crate::emitln;

/// Writes `bodies` inside nested `module` blocks, one per segment.
///
/// Bodies are separated by one blank line. With no segments the bodies are
/// written at top level.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::SourceBuilder;
/// use yarpc_codegen::ruby::concat::wrap_in_modules;
///
/// let mut b = SourceBuilder::with_indent_unit("  ");
/// wrap_in_modules(&mut b, &["Acme".to_string(), "Shop".to_string()], &["X = 1\n"]);
/// assert_eq!(b.as_str(), "module Acme\n  module Shop\n    X = 1\n  end\nend\n");
/// ```
pub fn wrap_in_modules<S: AsRef<str>>(b: &mut SourceBuilder, modules: &[String], bodies: &[S]) {
    if let Some((outer, rest)) = modules.split_first() {
        emitln!(b, "module {outer}");
        b.indent(|b| wrap_in_modules(b, rest, bodies));
        emitln!(b, "end");
        return;
    }

    for (i, body) in bodies.iter().enumerate() {
        if i > 0 {
            emitln!(b);
        }
        for line in body.as_ref().lines() {
            b.println(line);
        }
    }
}

/// Replaces whitespace-only lines with empty ones.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::ruby::concat::cleanup;
///
/// assert_eq!(cleanup("a\n   \n\tb\n"), "a\n\n\tb\n");
/// ```
#[must_use]
pub fn cleanup(text: &str) -> String {
    text.split('\n')
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}
