//! yarpc CLI library.
//!
//! Exposes the argument definitions, command implementations and summary
//! formatters behind the `yarpc` binary so they can be tested.

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;
