//! Generation configuration.
//!
//! Configuration reaches the generator from CLI flags, from a `yarpc.toml`
//! file, or both (flags win). It is built once per run and read-only
//! afterwards.
//!
//! # Examples
//!
//! ```
//! use yarpc_core::{ImportProviders, NamespacePath};
//!
//! let providers = ImportProviders::from_specs(["foo.bar=github.com/x/y"]).unwrap();
//! assert_eq!(providers.get("foo.bar"), Some("github.com/x/y"));
//!
//! let ns: NamespacePath = "Acme::Shop".parse().unwrap();
//! assert_eq!(ns.segments(), ["Acme", "Shop"]);
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A single `PACKAGE=LOCATION` import provider declaration.
///
/// # Examples
///
/// ```
/// use yarpc_core::ProviderSpec;
///
/// let spec: ProviderSpec = "billing=github.com/acme/billing".parse().unwrap();
/// assert_eq!(spec.package, "billing");
/// assert_eq!(spec.location, "github.com/acme/billing");
///
/// assert!("billing".parse::<ProviderSpec>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Foreign package name
    pub package: String,
    /// Module path, import path or require path providing it
    pub location: String,
}

impl FromStr for ProviderSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((package, location)) = s.split_once('=') else {
            return Err(Error::ConfigError {
                message: format!("invalid import provider '{s}' (expected PACKAGE=LOCATION)"),
            });
        };
        let (package, location) = (package.trim(), location.trim());
        if package.is_empty() || location.is_empty() {
            return Err(Error::ConfigError {
                message: format!("invalid import provider '{s}' (expected PACKAGE=LOCATION)"),
            });
        }
        Ok(Self {
            package: package.to_string(),
            location: location.to_string(),
        })
    }
}

/// Table mapping foreign packages to the location that provides them.
///
/// Iteration order is sorted by package name so every generation pass over
/// the same configuration emits identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportProviders {
    entries: BTreeMap<String, String>,
}

impl ImportProviders {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `PACKAGE=LOCATION` declarations. Later declarations for the
    /// same package replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] for a malformed declaration.
    pub fn from_specs<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut providers = Self::new();
        for spec in specs {
            let spec: ProviderSpec = spec.as_ref().parse()?;
            providers.insert(spec.package, spec.location);
        }
        Ok(providers)
    }

    /// Declares a provider, replacing any previous location for `package`.
    pub fn insert(&mut self, package: impl Into<String>, location: impl Into<String>) {
        self.entries.insert(package.into(), location.into());
    }

    /// Returns the location providing `package`.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&str> {
        self.entries.get(package).map(String::as_str)
    }

    /// Returns `true` if `package` has a provider.
    #[must_use]
    pub fn contains(&self, package: &str) -> bool {
        self.entries.contains_key(package)
    }

    /// Iterates `(package, location)` pairs in package order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of declared providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no provider is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlays `other` on top of this table.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

/// A `Module[::Module...]` namespace path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    /// Derives a namespace from a dot-separated package, casing each
    /// segment with `case`.
    ///
    /// # Examples
    ///
    /// ```
    /// use yarpc_core::NamespacePath;
    ///
    /// let ns = NamespacePath::from_package("acme.shop", |s| s.to_uppercase());
    /// assert_eq!(ns.to_string(), "ACME::SHOP");
    /// ```
    #[must_use]
    pub fn from_package(package: &str, case: impl Fn(&str) -> String) -> Self {
        Self(
            package
                .split('.')
                .filter(|s| !s.is_empty())
                .map(case)
                .collect(),
        )
    }

    /// Returns the module segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Checks that every segment is a valid module constant: an ASCII
    /// uppercase letter followed by ASCII letters, digits or underscores.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first invalid segment, or
    /// if the path has no segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use yarpc_core::NamespacePath;
    ///
    /// let derived = NamespacePath::from_package("acme.2fa", str::to_string);
    /// assert!(derived.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::ConfigError {
                message: "namespace path has no segments".to_string(),
            });
        }
        for segment in &self.0 {
            let mut chars = segment.chars();
            let starts_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
            if !starts_upper || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::ConfigError {
                    message: format!(
                        "invalid namespace segment '{segment}' in '{self}': \
                         must start with an uppercase letter and contain only \
                         letters, digits and underscores"
                    ),
                });
            }
        }
        Ok(())
    }
}

impl FromStr for NamespacePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::ConfigError {
            message: format!(
                "invalid namespace path '{s}': expected path in format Module[::Module...]"
            ),
        };
        if s.contains('.') {
            return Err(invalid());
        }
        let segments: Vec<String> = s.split("::").map(str::to_string).collect();
        if segments.iter().any(|seg| seg.trim().is_empty()) {
            return Err(invalid());
        }
        let path = Self(segments);
        path.validate()?;
        Ok(path)
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("::"))
    }
}

/// Options for one generation run.
///
/// # Examples
///
/// ```
/// use yarpc_core::GeneratorConfig;
///
/// let config = GeneratorConfig::from_toml_str(r#"
/// package = "shopapi"
/// single_file = true
///
/// [providers]
/// "acme.billing" = "github.com/acme/billing"
/// "#).unwrap();
///
/// assert_eq!(config.package.as_deref(), Some("shopapi"));
/// assert!(config.single_file);
/// assert_eq!(config.providers.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Import provider table
    pub providers: ImportProviders,
    /// Explicit output package or module name
    pub package: Option<String>,
    /// Explicit namespace path for backends that nest output in modules
    pub namespace: Option<NamespacePath>,
    /// Emit one aggregated file instead of one file per message
    pub single_file: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    package: Option<String>,
    namespace: Option<String>,
    #[serde(default)]
    single_file: bool,
    #[serde(default)]
    providers: BTreeMap<String, String>,
}

impl GeneratorConfig {
    /// Parses a `yarpc.toml` document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] for invalid TOML, unknown keys or an
    /// invalid namespace path.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: e.to_string(),
        })?;

        let mut providers = ImportProviders::new();
        for (package, location) in file.providers {
            if location.trim().is_empty() {
                return Err(Error::ConfigError {
                    message: format!("import provider for '{package}' has an empty location"),
                });
            }
            providers.insert(package, location);
        }

        Ok(Self {
            providers,
            package: file.package,
            namespace: file.namespace.as_deref().map(str::parse::<NamespacePath>).transpose()?,
            single_file: file.single_file,
        })
    }

    /// Reads and parses a `yarpc.toml` file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or any error of
    /// [`GeneratorConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }
}
