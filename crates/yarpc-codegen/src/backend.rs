//! Backend abstraction.
//!
//! A backend turns one resolved [`FileSet`] into target-language sources.
//! Backends are pure: they perform no I/O, and the only state they keep for
//! the duration of a call is the output buffer and the set of import
//! providers referenced while emitting.

use crate::common::types::GenerationOutput;
use yarpc_core::{FileSet, ImportProviders, Result};

/// A target-language code generator.
pub trait Backend {
    /// Short language name, used in logs and error reports.
    fn language(&self) -> &'static str;

    /// Emits sources for `set`.
    ///
    /// Foreign type references are resolved through `providers`; every
    /// provider never referenced yields one warning in the returned output.
    ///
    /// # Errors
    ///
    /// Returns [`yarpc_core::Error::UnexpectedType`] if the model contains a
    /// shape the backend does not model, or [`yarpc_core::Error::FormatError`]
    /// if the emitted text fails the backend's syntax check.
    fn generate(&self, set: &FileSet, providers: &ImportProviders) -> Result<GenerationOutput>;
}
