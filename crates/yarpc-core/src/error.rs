//! Error types for the yarpc compiler.
//!
//! This module provides the error hierarchy shared by the model loader, the
//! generation engine and the CLI. Every variant carries enough context to
//! name the offending input, entity or buffer.
//!
//! # Examples
//!
//! ```
//! use yarpc_core::{Error, Result};
//!
//! fn check_namespace(path: &str) -> Result<()> {
//!     if path.contains('.') {
//!         return Err(Error::ConfigError {
//!             message: format!("invalid namespace path '{path}'"),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_namespace("Foo.Bar").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use crate::cli::ExitCode;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the yarpc compiler.
///
/// All errors in the system use this type, providing consistent error handling
/// across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// Raised when configuration is invalid, such as a malformed namespace
    /// path or an import provider without a location. Generation is aborted.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One or more input models failed to load.
    ///
    /// Every input is attempted before this error is raised, so `failures`
    /// lists all offending files rather than only the first one.
    #[error("Errors found processing input files ({} failed)", failures.len())]
    LoadFailed {
        /// Per-input failures, in the order the inputs were given
        failures: Vec<LoadFailure>,
    },

    /// The resolved model contains a shape the generator does not model.
    ///
    /// This indicates a contract breach between the model provider and the
    /// generator, not a user-correctable condition.
    #[error("BUG: unexpected IDL shape in {entity}: {found}")]
    UnexpectedType {
        /// Message, field or method where the shape was found
        entity: String,
        /// Debug description of the unexpected shape
        found: String,
    },

    /// Emitted text failed target-language syntax validation.
    ///
    /// Treated as a generator bug; the full buffer is kept for diagnosis.
    #[error("BUG: error formatting {language} source: {message}\n\n{source_text}")]
    FormatError {
        /// Target language of the rejected buffer
        language: String,
        /// What the checker rejected
        message: String,
        /// The complete emitted buffer
        source_text: String,
    },

    /// Filesystem error while reading inputs or writing outputs.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use yarpc_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad class path".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. } | Self::InvalidArgument(_))
    }

    /// Returns `true` if one or more inputs failed to load.
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::LoadFailed { .. })
    }

    /// Returns `true` if this error signals a generator bug or a model
    /// provider contract breach.
    ///
    /// # Examples
    ///
    /// ```
    /// use yarpc_core::Error;
    ///
    /// let err = Error::UnexpectedType {
    ///     entity: "shop.Item.price".to_string(),
    ///     found: "Tuple".to_string(),
    /// };
    /// assert!(err.is_internal());
    /// ```
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::UnexpectedType { .. } | Self::FormatError { .. })
    }

    /// Returns `true` if emitted source failed syntax validation.
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::FormatError { .. })
    }

    /// Maps the error to the process exit code the CLI reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use yarpc_core::Error;
    /// use yarpc_core::cli::ExitCode;
    ///
    /// let err = Error::LoadFailed { failures: vec![] };
    /// assert_eq!(err.exit_code(), ExitCode::INVALID_INPUT);
    /// ```
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::ConfigError { .. } | Self::InvalidArgument(_) => ExitCode::CONFIG_ERROR,
            Self::LoadFailed { .. } => ExitCode::INVALID_INPUT,
            Self::UnexpectedType { .. } | Self::FormatError { .. } => ExitCode::INTERNAL_ERROR,
            Self::Io { .. } => ExitCode::ERROR,
        }
    }
}

/// A single input that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Path of the offending input
    pub path: PathBuf,
    /// Description of the failure
    pub message: String,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result type alias for yarpc operations.
///
/// # Examples
///
/// ```
/// use yarpc_core::{Error, Result};
///
/// fn non_empty(inputs: &[&str]) -> Result<usize> {
///     if inputs.is_empty() {
///         return Err(Error::InvalidArgument("no input files".to_string()));
///     }
///     Ok(inputs.len())
/// }
///
/// assert!(non_empty(&["a.json"]).is_ok());
/// assert!(non_empty(&[]).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
