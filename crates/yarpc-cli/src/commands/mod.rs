//! Command implementations for the yarpc CLI.
//!
//! Each generator command loads its inputs, runs one backend, writes the
//! emitted files and prints a summary in the requested format.

pub mod common;
pub mod completions;
pub mod go;
pub mod ruby;
