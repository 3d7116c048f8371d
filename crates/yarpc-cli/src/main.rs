//! yarpc - the Yarp IDL compiler.
//!
//! Compiles resolved IDL models into Go and Ruby sources.
//!
//! # Examples
//!
//! ```bash
//! # One Go file for the whole package
//! yarpc go --out shop/shop.yarp.go shop.json
//!
//! # One Ruby file per message and service under lib/
//! yarpc ruby --out lib --provided-by acme.billing=acme/billing shop.json
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use yarpc_cli::cli::Cli;
use yarpc_cli::commands::common::{describe_error, exit_code_for};
use yarpc_cli::runner::{execute_command, init_logging};
use yarpc_core::cli::OutputFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = match execute_command(cli.command, output_format) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), describe_error(&err));
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code.as_i32());
}
