//! Output types of a generation pass.
//!
//! # Examples
//!
//! ```
//! use yarpc_codegen::{GeneratedCode, GeneratedFile};
//!
//! let mut code = GeneratedCode::new();
//! code.add_file(GeneratedFile {
//!     path: "shop.yarp.go".to_string(),
//!     content: "package shop\n".to_string(),
//! });
//!
//! assert_eq!(code.file_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use yarpc_core::ImportProviders;

/// Result of code generation containing all generated files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Generated files, in emission order
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    /// Creates a new empty generated code container.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a generated file to the collection.
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Returns the number of generated files.
    #[inline]
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Returns an iterator over the generated files.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Finds a file by its relative path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

/// A single generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output location
    pub path: String,
    /// File content
    pub content: String,
}

impl GeneratedFile {
    /// Returns the file path.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the file content.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Non-fatal diagnostics produced during generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An import provider was configured but no emitted type referenced it.
    UnusedProvider {
        /// The provider's package
        package: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusedProvider { package } => {
                write!(f, "import provider set, but unused: {package}")
            }
        }
    }
}

/// Everything one backend run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// Emitted files
    pub code: GeneratedCode,
    /// Providers referenced by the emitted code
    pub used_providers: BTreeSet<String>,
    /// Advisory diagnostics
    pub warnings: Vec<Warning>,
}

impl GenerationOutput {
    /// Bundles emitted code with its provider usage, deriving one
    /// [`Warning::UnusedProvider`] per configured provider never referenced.
    #[must_use]
    pub fn new(
        code: GeneratedCode,
        providers: &ImportProviders,
        used_providers: BTreeSet<String>,
    ) -> Self {
        let warnings = providers
            .iter()
            .filter(|(package, _)| !used_providers.contains(*package))
            .map(|(package, _)| {
                tracing::warn!("Import provider set, but unused: {}", package);
                Warning::UnusedProvider {
                    package: package.to_string(),
                }
            })
            .collect();

        Self {
            code,
            used_providers,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_new() {
        let code = GeneratedCode::new();
        assert_eq!(code.file_count(), 0);
        assert_eq!(code, GeneratedCode::default());
    }

    #[test]
    fn test_get_by_path() {
        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: "shop/item.rb".to_string(),
            content: "class Item".to_string(),
        });
        assert_eq!(code.get("shop/item.rb").unwrap().content(), "class Item");
        assert!(code.get("missing.rb").is_none());
        assert_eq!(code.files().count(), 1);
    }

    #[test]
    fn test_unused_provider_warnings() {
        let providers =
            ImportProviders::from_specs(["billing=github.com/acme/billing", "geo=github.com/acme/geo"])
                .unwrap();
        let used = BTreeSet::from(["billing".to_string()]);

        let output = GenerationOutput::new(GeneratedCode::new(), &providers, used);
        assert_eq!(
            output.warnings,
            vec![Warning::UnusedProvider {
                package: "geo".to_string()
            }]
        );
        assert_eq!(output.warnings[0].to_string(), "import provider set, but unused: geo");
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = Warning::UnusedProvider {
            package: "geo".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&warning).unwrap(),
            serde_json::json!({"kind": "unused_provider", "package": "geo"})
        );
    }
}
