//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `SourceArgs` - Inputs and import providers shared by generators

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// yarpc - compiles resolved yarp IDL models into Go and Ruby sources.
#[derive(Parser, Debug)]
#[command(name = "yarpc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Summary format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Arguments shared by every generator subcommand.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Resolved model files (JSON); all must declare the same package
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Location providing a foreign package, as PACKAGE=LOCATION
    ///
    /// May be repeated. Overrides entries of the configuration file.
    #[arg(long = "provided-by", value_name = "PACKAGE=LOCATION", num_args = 1)]
    pub provided_by: Vec<String>,

    /// Configuration file (yarpc.toml)
    #[arg(long, env = "YARPC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compiles resolved models into a Go source file.
    ///
    /// # Examples
    ///
    /// ```bash
    /// yarpc go --out shop/shop.yarp.go shop.json
    ///
    /// # Types from acme.billing come from another Go module
    /// yarpc go --out shop.yarp.go \
    ///     --provided-by acme.billing=github.com/acme/billing shop.json
    /// ```
    Go {
        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Go package name (default: last segment of the model package)
        #[arg(long)]
        package: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compiles resolved models into Ruby sources.
    ///
    /// Writes one file per message and service below `--out`, or a single
    /// file at `--out` with `--single-file`.
    ///
    /// # Examples
    ///
    /// ```bash
    /// yarpc ruby --out lib shop.json
    /// yarpc ruby --single-file --class-path Acme::Shop --out lib/shop.rb shop.json
    /// ```
    Ruby {
        /// Output directory, or output file with `--single-file`
        #[arg(long)]
        out: PathBuf,

        /// Namespace modules, as Module[::Module...]
        #[arg(long = "class-path", value_name = "MODULE[::MODULE...]")]
        class_path: Option<String>,

        /// Emit everything into one file
        #[arg(long)]
        single_file: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Bash
    /// yarpc completions bash > /etc/bash_completion.d/yarpc
    ///
    /// # Zsh
    /// yarpc completions zsh > ~/.zfunc/_yarpc
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
