//! Loading resolved models from JSON documents.
//!
//! The model provider serializes each resolved compilation unit as JSON.
//! Several documents for the same package are merged into one [`FileSet`].
//! Failures are accumulated across all inputs instead of stopping at the
//! first one.

use crate::model::FileSet;
use crate::{Error, LoadFailure, Result};
use std::fs;
use std::path::Path;

/// Parses a single resolved model document.
///
/// # Errors
///
/// Returns the underlying JSON error if the document is not a valid model.
///
/// # Examples
///
/// ```
/// use yarpc_core::parse_file_set;
///
/// let set = parse_file_set(r#"{"package": "shop"}"#).unwrap();
/// assert_eq!(set.package(), "shop");
/// assert!(set.messages.is_empty());
/// ```
pub fn parse_file_set(json: &str) -> serde_json::Result<FileSet> {
    serde_json::from_str(json)
}

/// Loads and merges every input document.
///
/// All paths are attempted. Unreadable files, malformed documents and
/// documents declaring a different package than the first one are reported
/// together.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] when `paths` is empty
/// - [`Error::LoadFailed`] listing every input that failed
pub fn load_file_set<P: AsRef<Path>>(paths: &[P]) -> Result<FileSet> {
    if paths.is_empty() {
        return Err(Error::InvalidArgument("no input files".to_string()));
    }

    let mut merged: Option<FileSet> = None;
    let mut failures = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let outcome = read_one(path).and_then(|set| match merged.as_mut() {
            Some(current) => current.merge(set).map_err(|e| e.to_string()),
            None => {
                merged = Some(set);
                Ok(())
            }
        });

        match outcome {
            Ok(()) => tracing::debug!("Loaded resolved model from {}", path.display()),
            Err(message) => {
                tracing::error!("{}: {}", path.display(), message);
                failures.push(LoadFailure {
                    path: path.to_path_buf(),
                    message,
                });
            }
        }
    }

    if !failures.is_empty() {
        return Err(Error::LoadFailed { failures });
    }

    merged.ok_or_else(|| Error::InvalidArgument("no input files".to_string()))
}

fn read_one(path: &Path) -> std::result::Result<FileSet, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_file_set(&text).map_err(|e| e.to_string())
}
