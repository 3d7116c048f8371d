//! Go generation command.

use super::common::{
    GenerationReport, OutputLayout, build_config, load_inputs, print_report, print_warnings,
    write_output,
};
use crate::cli::SourceArgs;
use anyhow::Result;
use std::path::Path;
use yarpc_codegen::Backend;
use yarpc_codegen::golang::GoBackend;
use yarpc_core::cli::{ExitCode, OutputFormat};

/// Compiles the inputs of `source` into one Go file written to `out`.
///
/// `package` overrides the configured Go package name.
///
/// # Errors
///
/// Returns an error if configuration or inputs are invalid, generation
/// fails, or the output cannot be written.
pub fn run(
    source: &SourceArgs,
    out: &Path,
    package: Option<String>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mut config = build_config(source)?;
    if package.is_some() {
        config.package = package;
    }

    let set = load_inputs(source)?;
    let backend = GoBackend::from_config(&config);
    let output = backend.generate(&set, &config.providers)?;
    print_warnings(&output.warnings);

    let files = write_output(&output.code, out, OutputLayout::File)?;
    tracing::info!("Wrote {}", out.display());

    let report = GenerationReport::new(backend.language(), &set, &output, files);
    print_report(&report, output_format)?;

    Ok(ExitCode::SUCCESS)
}
