//! Output formatters for command summaries.
//!
//! Every command reports through [`format_output`], so the JSON, text and
//! pretty modes stay consistent across commands.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use yarpc_core::cli::OutputFormat;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use yarpc_cli::formatters::format_output;
/// use yarpc_core::cli::OutputFormat;
///
/// #[derive(Serialize)]
/// struct Summary {
///     package: String,
///     files: Vec<String>,
/// }
///
/// let summary = Summary {
///     package: "shop".to_string(),
///     files: vec!["shop.yarp.go".to_string()],
/// };
///
/// let output = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(output, "package: shop\nfiles:\n  - shop.yarp.go");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain `key: value` output, suitable for scripts and logs.
pub mod text {
    use super::{Result, Serialize, Style, render};

    /// Format data as uncolored `key: value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(render(&serde_json::to_value(data)?, Style::Plain))
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Result, Serialize, Style, render};

    /// Format data as colorized `key: value` lines.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(render(&serde_json::to_value(data)?, Style::Colored))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Colored,
}

impl Style {
    fn key(self, key: &str) -> String {
        match self {
            Self::Plain => key.to_string(),
            Self::Colored => key.blue().bold().to_string(),
        }
    }

    fn scalar(self, value: &Value) -> String {
        let raw = match value {
            Value::String(s) => s.clone(),
            Value::Null => "-".to_string(),
            other => other.to_string(),
        };
        match (self, value) {
            (Self::Plain, _) => raw,
            (Self::Colored, Value::String(_)) => raw.green().to_string(),
            (Self::Colored, Value::Number(_)) => raw.cyan().to_string(),
            (Self::Colored, Value::Bool(_)) => raw.yellow().to_string(),
            (Self::Colored, _) => raw.dimmed().to_string(),
        }
    }
}

fn render(value: &Value, style: Style) -> String {
    let mut lines = Vec::new();
    render_into(value, style, 0, &mut lines);
    lines.join("\n")
}

fn render_into(value: &Value, style: Style, depth: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(entries) => {
            for (key, entry) in entries {
                match entry {
                    Value::Array(items) if items.is_empty() => {
                        let none = style.scalar(&Value::Null);
                        lines.push(format!("{pad}{}: {none}", style.key(key)));
                    }
                    Value::Array(_) | Value::Object(_) => {
                        lines.push(format!("{pad}{}:", style.key(key)));
                        render_into(entry, style, depth + 1, lines);
                    }
                    scalar => {
                        lines.push(format!("{pad}{}: {}", style.key(key), style.scalar(scalar)));
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    lines.push(format!("{pad}-"));
                    render_into(item, style, depth + 1, lines);
                } else {
                    lines.push(format!("{pad}- {}", style.scalar(item)));
                }
            }
        }
        scalar => lines.push(format!("{pad}{}", style.scalar(scalar))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Report {
        language: String,
        files: Vec<String>,
        warnings: Vec<String>,
        count: u32,
    }

    fn report() -> Report {
        Report {
            language: "go".to_string(),
            files: vec!["a.go".to_string(), "b.go".to_string()],
            warnings: vec![],
            count: 2,
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&report()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["language"], "go");
        assert_eq!(value["files"][1], "b.go");
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_text_format_lists_and_empties() {
        let output = text::format(&report()).unwrap();
        assert_eq!(
            output,
            "language: go\nfiles:\n  - a.go\n  - b.go\nwarnings: -\ncount: 2"
        );
    }

    #[test]
    fn test_pretty_format_keeps_content() {
        colored::control::set_override(false);
        let output = pretty::format(&report()).unwrap();
        assert!(output.contains("language: go"));
        assert!(output.contains("  - b.go"));
    }

    #[test]
    fn test_nested_objects_are_indented() {
        let value = serde_json::json!({"outer": {"inner": [{"name": "x"}]}});
        assert_eq!(
            render(&value, Style::Plain),
            "outer:\n  inner:\n    -\n      name: x"
        );
    }

    #[test]
    fn test_format_output_dispatch() {
        let data = report();
        assert!(format_output(&data, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(format_output(&data, OutputFormat::Text).unwrap().starts_with("language"));
    }
}
