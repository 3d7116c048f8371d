//! Canonical layout and well-formedness check for emitted Go.
//!
//! [`format_source`] is a small lexical formatter, not a Go parser. It knows
//! enough of the token grammar to skip interpreted strings, runes, raw strings
//! and comments, and uses what remains to:
//!
//! - verify that `()`, `[]` and `{}` are balanced and correctly nested,
//! - re-indent every line with tabs according to its bracket depth,
//! - trim trailing whitespace,
//! - collapse runs of blank lines and drop leading and trailing ones.
//!
//! Lines inside a multi-line raw string are copied untouched.
//!
//! # Limitations
//!
//! Balance is the only structural check. Declarations, statements and
//! expressions are not parsed, so a buffer with balanced brackets but invalid
//! Go (a `func` without a name, a missing operand) is accepted and only
//! rejected later by the Go toolchain.
//!
//! # Examples
//!
//! ```
//! use yarpc_codegen::golang::format_source;
//!
//! let src = "package shop\n\n\n\nfunc f() {\n    return   \n}\n";
//! assert_eq!(
//!     format_source(src).unwrap(),
//!     "package shop\n\nfunc f() {\n\treturn\n}\n"
//! );
//!
//! assert!(format_source("func f() {\n").is_err());
//!
//! // Balanced but not valid Go: passes, see the limitations above.
//! assert!(format_source("package shop\n\nfunc {}\n").is_ok());
//! ```

use yarpc_core::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Raw,
    BlockComment,
}

#[derive(Debug, Clone, Copy)]
struct Open {
    bracket: char,
    line: usize,
}

const fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Scans one line starting in `state`, updating the bracket stack.
///
/// Returns the lexical state at the end of the line.
fn scan_line(
    line: &str,
    mut state: Lexeme,
    stack: &mut Vec<Open>,
    number: usize,
) -> std::result::Result<Lexeme, String> {
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            Lexeme::Raw => {
                if c == '`' {
                    state = Lexeme::Code;
                }
            }
            Lexeme::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Lexeme::Code;
                }
            }
            Lexeme::Code => match c {
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Lexeme::BlockComment;
                }
                '`' => state = Lexeme::Raw,
                '"' | '\'' => {
                    let mut closed = false;
                    while let Some(inner) = chars.next() {
                        if inner == '\\' {
                            chars.next();
                        } else if inner == c {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        let what = if c == '"' { "string" } else { "rune" };
                        return Err(format!("unterminated {what} literal on line {number}"));
                    }
                }
                '(' | '[' | '{' => stack.push(Open {
                    bracket: c,
                    line: number,
                }),
                ')' | ']' | '}' => match stack.pop() {
                    Some(open) if closing_for(open.bracket) == c => {}
                    Some(open) => {
                        return Err(format!(
                            "unexpected '{c}' on line {number}; '{}' from line {} is still open",
                            open.bracket, open.line
                        ));
                    }
                    None => return Err(format!("unexpected '{c}' on line {number}")),
                },
                _ => {}
            },
        }
    }

    Ok(state)
}

/// Normalizes and validates a Go source buffer.
///
/// # Errors
///
/// Returns [`Error::FormatError`] carrying the original buffer if brackets
/// are unbalanced or a literal or comment is left unterminated. Other
/// syntax errors are not detected; see the module documentation.
pub fn format_source(source: &str) -> Result<String> {
    layout(source).map_err(|message| Error::FormatError {
        language: "go".to_string(),
        message,
        source_text: source.to_string(),
    })
}

fn layout(source: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(source.len());
    let mut stack: Vec<Open> = Vec::new();
    let mut state = Lexeme::Code;
    let mut pending_blank = false;

    for (offset, raw) in source.lines().enumerate() {
        let number = offset + 1;

        if state == Lexeme::Raw {
            state = scan_line(raw, state, &mut stack, number)?;
            out.push_str(raw);
            out.push('\n');
            continue;
        }

        let line = if state == Lexeme::BlockComment {
            raw.trim_end()
        } else {
            raw.trim()
        };
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }

        let leading_closers = line
            .chars()
            .take_while(|c| matches!(c, ')' | ']' | '}'))
            .count();
        let depth = if state == Lexeme::Code {
            stack.len().saturating_sub(leading_closers)
        } else {
            0
        };

        state = scan_line(line, state, &mut stack, number)?;

        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str(line);
        out.push('\n');
    }

    match state {
        Lexeme::Raw => return Err("unterminated raw string literal".to_string()),
        Lexeme::BlockComment => return Err("unterminated block comment".to_string()),
        Lexeme::Code => {}
    }
    if let Some(open) = stack.last() {
        return Err(format!(
            "'{}' opened on line {} is never closed",
            open.bracket, open.line
        ));
    }

    Ok(out)
}
