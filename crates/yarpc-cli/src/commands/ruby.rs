//! Ruby generation command.

use super::common::{
    GenerationReport, OutputLayout, build_config, load_inputs, print_report, print_warnings,
    write_output,
};
use crate::cli::SourceArgs;
use anyhow::Result;
use std::path::Path;
use yarpc_codegen::Backend;
use yarpc_codegen::ruby::RubyBackend;
use yarpc_core::NamespacePath;
use yarpc_core::cli::{ExitCode, OutputFormat};

/// Compiles the inputs of `source` into Ruby sources.
///
/// In single-file mode `out` is the file to write; otherwise it is the
/// directory the per-message and per-service files are placed under.
/// `class_path` overrides the configured namespace, and `single_file`
/// turns single-file mode on even when the configuration leaves it off.
///
/// # Errors
///
/// Returns an error if the class path, configuration or inputs are
/// invalid, generation fails, or the output cannot be written.
pub fn run(
    source: &SourceArgs,
    out: &Path,
    class_path: Option<&str>,
    single_file: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mut config = build_config(source)?;
    if let Some(path) = class_path {
        config.namespace = Some(path.parse::<NamespacePath>()?);
    }
    config.single_file |= single_file;

    let set = load_inputs(source)?;
    let backend = RubyBackend::from_config(&config);
    let output = backend.generate(&set, &config.providers)?;
    print_warnings(&output.warnings);

    let layout = if config.single_file {
        OutputLayout::File
    } else {
        OutputLayout::Directory
    };
    let files = write_output(&output.code, out, layout)?;
    tracing::info!("Wrote {} Ruby file(s) to {}", files.len(), out.display());

    let report = GenerationReport::new(backend.language(), &set, &output, files);
    print_report(&report, output_format)?;

    Ok(ExitCode::SUCCESS)
}
