//! Indentation-aware source accumulator.
//!
//! Backends build output incrementally with [`SourceBuilder`]. Indentation is
//! applied lazily: the indent prefix is written only when a non-blank line
//! begins, so blank lines never carry trailing whitespace.
//!
//! # Examples
//!
//! ```
//! use yarpc_codegen::{SourceBuilder, emitln};
//!
//! let mut b = SourceBuilder::with_indent_unit("  ");
//! emitln!(b, "class {} < Yarp::Structure", "Item");
//! b.indent(|b| {
//!     emitln!(b, "primitive :name, :string, {}", 1);
//!     b.blank_line();
//! });
//! emitln!(b, "end");
//!
//! assert_eq!(
//!     b.as_str(),
//!     "class Item < Yarp::Structure\n  primitive :name, :string, 1\n\nend\n"
//! );
//! ```

use std::fmt;

/// Appends formatted text to a [`SourceBuilder`] without a trailing newline.
#[macro_export]
macro_rules! emit {
    ($b:expr, $($arg:tt)*) => {
        $b.print(&::std::format!($($arg)*))
    };
}

/// Appends formatted text followed by a newline to a [`SourceBuilder`].
///
/// With only the builder argument, appends a blank line.
#[macro_export]
macro_rules! emitln {
    ($b:expr) => {
        $b.blank_line()
    };
    ($b:expr, $($arg:tt)*) => {
        $b.println(&::std::format!($($arg)*))
    };
}

/// String accumulator with nested, scoped indentation.
#[derive(Debug, Clone)]
pub struct SourceBuilder {
    buf: String,
    level: usize,
    unit: &'static str,
    at_line_start: bool,
}

impl SourceBuilder {
    /// Creates a builder indenting with one tab per level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent_unit("\t")
    }

    /// Creates a builder indenting with `unit` per level.
    #[must_use]
    pub fn with_indent_unit(unit: &'static str) -> Self {
        Self {
            buf: String::new(),
            level: 0,
            unit,
            at_line_start: true,
        }
    }

    /// Appends `text`, indenting every non-blank line it begins.
    pub fn print(&mut self, text: &str) {
        for piece in text.split_inclusive('\n') {
            let content = piece.strip_suffix('\n').unwrap_or(piece);
            let blank = content.trim().is_empty();
            if self.at_line_start && self.level > 0 && !blank {
                for _ in 0..self.level {
                    self.buf.push_str(self.unit);
                }
            }
            self.buf.push_str(piece);
            self.at_line_start = piece.ends_with('\n') || (self.at_line_start && blank);
        }
    }

    /// Appends `text` followed by a newline.
    pub fn println(&mut self, text: &str) {
        self.print(text);
        self.print("\n");
    }

    /// Appends an empty line.
    pub fn blank_line(&mut self) {
        self.print("\n");
    }

    /// Runs `body` one indentation level deeper.
    ///
    /// The caller's level is restored afterwards no matter how deep `body`
    /// nested.
    pub fn indent<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Self),
    {
        let saved = self.level;
        self.level += 1;
        body(self);
        self.level = saved;
    }

    /// Appends the full content of `other` verbatim.
    pub fn absorb(&mut self, other: &Self) {
        if other.buf.is_empty() {
            return;
        }
        self.buf.push_str(&other.buf);
        self.at_line_start = other.buf.ends_with('\n');
    }

    /// Current indentation level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns `true` if nothing was written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Accumulated text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the builder, returning the accumulated text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Default for SourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for SourceBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}

impl fmt::Display for SourceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn test_blank_lines_are_not_indented() {
        let mut b = SourceBuilder::new();
        b.indent(|b| {
            b.println("a");
            b.blank_line();
            b.println("b");
        });
        assert_eq!(b.as_str(), "\ta\n\n\tb\n");
    }

    #[test]
    fn test_indent_restores_level() {
        let mut b = SourceBuilder::with_indent_unit("  ");
        b.indent(|b| {
            b.indent(|b| {
                b.indent(|b| b.println("deep"));
                assert_eq!(b.level(), 2);
            });
            b.println("one");
        });
        assert_eq!(b.level(), 0);
        b.println("zero");
        assert_eq!(b.as_str(), "      deep\n  one\nzero\n");
    }

    #[test]
    fn test_embedded_newlines_indent_each_line() {
        let mut b = SourceBuilder::with_indent_unit("  ");
        b.indent(|b| b.print("x = 1\ny = 2\n\nz"));
        assert_eq!(b.as_str(), "  x = 1\n  y = 2\n\n  z");
    }

    #[test]
    fn test_partial_lines_indent_once() {
        let mut b = SourceBuilder::new();
        b.indent(|b| {
            emit!(b, "res, err := ");
            emit!(b, "call({})", 1);
            emitln!(b);
        });
        assert_eq!(b.as_str(), "\tres, err := call(1)\n");
    }

    #[test]
    fn test_absorb_appends_verbatim() {
        let mut inner = SourceBuilder::new();
        inner.indent(|b| b.println("body"));

        let mut outer = SourceBuilder::new();
        outer.println("head");
        outer.indent(|b| b.absorb(&inner));
        outer.println("tail");

        assert_eq!(outer.into_string(), "head\n\tbody\ntail\n");
    }

    #[test]
    fn test_fmt_write() {
        let mut b = SourceBuilder::with_indent_unit("    ");
        b.indent(|b| {
            writeln!(b, "{} + {}", 1, 2).unwrap();
        });
        assert_eq!(b.to_string(), "    1 + 2\n");
        assert!(!b.is_empty());
    }
}
