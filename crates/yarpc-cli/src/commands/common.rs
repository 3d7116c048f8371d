//! Common utilities shared across generator commands.
//!
//! Covers the steps every backend run goes through: building the generator
//! configuration from flags and `yarpc.toml`, loading inputs, writing the
//! emitted files and reporting the outcome.

use crate::cli::SourceArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use yarpc_codegen::{GeneratedCode, GenerationOutput, Warning};
use yarpc_core::cli::{ExitCode, OutputFormat};
use yarpc_core::{Error, FileSet, GeneratorConfig, ImportProviders, load_file_set};

/// Builds the generator configuration for one run.
///
/// Starts from the configuration file when one is given, then merges the
/// `--provided-by` flags on top so a flag overrides a file entry for the
/// same package.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or parsed, or
/// if a provider flag is not in `PACKAGE=LOCATION` form.
///
/// # Examples
///
/// ```
/// use yarpc_cli::cli::SourceArgs;
/// use yarpc_cli::commands::common::build_config;
///
/// let source = SourceArgs {
///     inputs: vec!["shop.json".into()],
///     provided_by: vec!["acme.billing=github.com/acme/billing".to_string()],
///     config: None,
/// };
///
/// let config = build_config(&source).unwrap();
/// assert_eq!(config.providers.get("acme.billing"), Some("github.com/acme/billing"));
/// ```
pub fn build_config(source: &SourceArgs) -> Result<GeneratorConfig> {
    let mut config = match &source.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let flags = ImportProviders::from_specs(&source.provided_by)?;
    config.providers.extend(flags);

    tracing::debug!("{} import provider(s) configured", config.providers.len());
    Ok(config)
}

/// Loads and merges every input model.
///
/// # Errors
///
/// Returns [`Error::LoadFailed`] listing every input that could not be used.
pub fn load_inputs(source: &SourceArgs) -> Result<FileSet> {
    let set = load_file_set(&source.inputs)?;
    tracing::info!(
        "Loaded package {} ({} message(s), {} service(s))",
        set.package(),
        set.messages.len(),
        set.services.len()
    );
    Ok(set)
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the path that could not be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, content).map_err(io_error)?;

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Where emitted files go relative to `--out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// `--out` names the single emitted file.
    File,
    /// `--out` is a directory; emitted paths are joined onto it.
    Directory,
}

/// Writes every emitted file according to `layout`, returning the paths
/// written.
///
/// # Errors
///
/// Returns an error if a file cannot be written, or if [`OutputLayout::File`]
/// is requested for anything but exactly one emitted file.
pub fn write_output(
    code: &GeneratedCode,
    out: &Path,
    layout: OutputLayout,
) -> Result<Vec<PathBuf>> {
    match layout {
        OutputLayout::File => {
            let [file] = code.files.as_slice() else {
                bail!(
                    "expected exactly one generated file for {}, got {}",
                    out.display(),
                    code.file_count()
                );
            };
            write_file(out, file.content())?;
            Ok(vec![out.to_path_buf()])
        }
        OutputLayout::Directory => code
            .files()
            .map(|file| -> Result<PathBuf> {
                let path = out.join(file.path());
                write_file(&path, file.content())?;
                Ok(path)
            })
            .collect(),
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Target language
    pub language: String,
    /// Model package
    pub package: String,
    /// Files written, in emission order
    pub files: Vec<PathBuf>,
    /// Providers referenced by the emitted code
    pub used_providers: Vec<String>,
    /// Advisory diagnostics
    pub warnings: Vec<String>,
}

impl GenerationReport {
    /// Builds the report for `output` written to `files`.
    #[must_use]
    pub fn new(
        language: &str,
        set: &FileSet,
        output: &GenerationOutput,
        files: Vec<PathBuf>,
    ) -> Self {
        Self {
            language: language.to_string(),
            package: set.package().to_string(),
            files,
            used_providers: output.used_providers.iter().cloned().collect(),
            warnings: output.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Prints warnings to stderr.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }
}

/// Prints the summary of a finished run to stdout.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn print_report(report: &GenerationReport, output_format: OutputFormat) -> Result<()> {
    println!("{}", format_output(report, output_format)?);
    Ok(())
}

/// Maps an error to the exit code the process reports.
///
/// Errors raised by the compiler carry their own code; anything else is a
/// generic failure.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<Error>()
        .map_or(ExitCode::ERROR, Error::exit_code)
}

/// Renders an error for the terminal.
///
/// Load failures are expanded to one line per offending input.
#[must_use]
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<Error>() {
        Some(Error::LoadFailed { failures }) => {
            let mut text = err.to_string();
            for failure in failures {
                text.push_str("\n  ");
                text.push_str(&failure.to_string());
            }
            text
        }
        _ => format!("{err:#}"),
    }
}
