//! Block-structure check for emitted Ruby.
//!
//! Verifies that every block opener (`module`, `class`, `def`, `if`,
//! `unless`, `case`, `begin`, `while`, `until`, trailing `do`) is closed by
//! exactly one `end`. Comment lines are ignored, as are modifier forms like
//! `raise Error unless ok`, since only the first word of a line is treated as
//! a keyword.

use regex::Regex;
use std::sync::LazyLock;
use yarpc_core::{Error, Result};

const OPENERS: &[&str] = &[
    "begin", "case", "class", "def", "for", "if", "module", "unless", "until", "while",
];

static TRAILING_DO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdo(\s*\|[^|]*\|)?\s*$").expect("valid regex"));

/// Checks the block balance of a Ruby source buffer.
///
/// # Errors
///
/// Returns [`Error::FormatError`] carrying the buffer when an `end` has no
/// opener or an opener is never closed.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::ruby::check_source;
///
/// assert!(check_source("class A\n  def x\n    [1].each do |i|\n    end\n  end\nend\n").is_ok());
/// assert!(check_source("class A\n  def x\n  end\n").is_err());
/// ```
pub fn check_source(source: &str) -> Result<()> {
    let mut open: Vec<(String, usize)> = Vec::new();

    for (offset, raw) in source.lines().enumerate() {
        let number = offset + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let first = line
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .next()
            .unwrap_or_default();

        if first == "end" {
            if open.pop().is_none() {
                return Err(failure(source, format!("unexpected 'end' on line {number}")));
            }
        } else if OPENERS.contains(&first) || TRAILING_DO.is_match(line) {
            let keyword = if OPENERS.contains(&first) { first } else { "do" };
            open.push((keyword.to_string(), number));
        }
    }

    if let Some((keyword, number)) = open.last() {
        return Err(failure(
            source,
            format!("'{keyword}' on line {number} is never closed"),
        ));
    }
    Ok(())
}

fn failure(source: &str, message: String) -> Error {
    Error::FormatError {
        language: "ruby".to_string(),
        message,
        source_text: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_are_not_openers() {
        let src = "def get(req)\n  raise Yarp::IncompatibleTypeError unless ok\n  return enum_for(:get) unless block_given?\nend\n";
        assert!(check_source(src).is_ok());
    }

    #[test]
    fn test_comment_lines_are_ignored() {
        assert!(check_source("# class without end\nmodule A\nend\n").is_ok());
    }

    #[test]
    fn test_do_blocks() {
        assert!(check_source("oneof(3) do\n  primitive :a, :int8, 4\nend\n").is_ok());
        assert!(check_source("request_streamed(1, req) do |v|\nend\n").is_ok());
        assert!(check_source("request_streamed(1, req) do |v|\n").is_err());
    }

    #[test]
    fn test_stray_end() {
        let err = check_source("module A\nend\nend\n").unwrap_err();
        assert!(err.is_format_error());
        assert!(err.to_string().contains("unexpected 'end' on line 3"));
    }

    #[test]
    fn test_unclosed_reports_opener() {
        let err = check_source("module A\n  class B\nend\n").unwrap_err();
        assert!(err.to_string().contains("'module' on line 1 is never closed"));
    }
}
