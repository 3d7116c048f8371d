//! Core types and errors for the yarpc compiler.
//!
//! This crate provides the foundational types used across all other crates
//! in the yarpc workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - The resolved IDL model (`FileSet`, `Message`, `Service`, ...) handed to
//!   the generator by the model provider
//! - A loader that reads resolved models from JSON documents
//! - Generation configuration (`ImportProviders`, `NamespacePath`)
//! - Error hierarchy with contextual information
//! - CLI value types (`ExitCode`, `OutputFormat`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod loader;

pub mod cli;
pub mod model;

pub use config::{GeneratorConfig, ImportProviders, NamespacePath, ProviderSpec};
pub use error::{Error, LoadFailure, Result};
pub use loader::{load_file_set, parse_file_set};
pub use model::{
    Annotation, Field, FileSet, Member, Message, Method, OneOfField, PrimitiveType, Service, Type,
};
