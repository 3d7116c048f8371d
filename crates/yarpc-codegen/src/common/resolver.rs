//! IDL type expression resolution.
//!
//! [`TypeResolver`] turns IDL types into target-language type strings. The
//! target syntax is supplied by a [`TypeSyntax`] implementation; the
//! resolution rules (same-package shortcut, import providers, best-effort
//! fallback) are shared by every backend.
//!
//! The resolver owns the set of import providers referenced during one
//! generation pass. Callers take it back with [`TypeResolver::into_used`],
//! so no state outlives the pass.
//!
//! # Examples
//!
//! ```
//! use yarpc_codegen::{TypeResolver, TypeSyntax};
//! use yarpc_core::{FileSet, ImportProviders, PrimitiveType};
//!
//! struct Dotted;
//!
//! impl TypeSyntax for Dotted {
//!     fn primitive(&self, _: PrimitiveType) -> &'static str { "prim" }
//!     fn array(&self, element: &str) -> String { format!("[]{element}") }
//!     fn map(&self, key: &str, value: &str) -> String { format!("map[{key}]{value}") }
//!     fn optional(&self, inner: &str) -> String { format!("*{inner}") }
//!     fn qualified(&self, alias: &str, name: &str) -> String { format!("{alias}.{name}") }
//! }
//!
//! let set = FileSet::new("shop");
//! let providers = ImportProviders::from_specs(["foo.bar=github.com/x/y"]).unwrap();
//! let mut resolver = TypeResolver::new(&set, &providers, Dotted);
//!
//! assert_eq!(resolver.reference("shop.Item"), "Item");
//! assert_eq!(resolver.reference("foo.bar.Baz"), "y.Baz");
//! assert!(resolver.into_used().contains("foo.bar"));
//! ```

use crate::common::naming::titleize;
use std::collections::BTreeSet;
use yarpc_core::{Error, Field, FileSet, ImportProviders, PrimitiveType, Result, Type};

/// Target-language spelling of type expressions.
pub trait TypeSyntax {
    /// Name of a primitive type.
    fn primitive(&self, primitive: PrimitiveType) -> &'static str;

    /// Sequence of `element`.
    fn array(&self, element: &str) -> String;

    /// Mapping from `key` to `value`.
    fn map(&self, key: &str, value: &str) -> String;

    /// Nullable or pointer-like `inner`.
    fn optional(&self, inner: &str) -> String;

    /// Reference to `name` exported by the package imported as `alias`.
    fn qualified(&self, alias: &str, name: &str) -> String;

    /// Collection wrapper applied by the `repeated` annotation.
    fn repeated(&self, inner: &str) -> String {
        self.array(inner)
    }
}

/// Import alias for a provider location: its final `/`-separated segment.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::common::resolver::import_alias;
///
/// assert_eq!(import_alias("github.com/x/y"), "y");
/// assert_eq!(import_alias("billing"), "billing");
/// ```
#[must_use]
pub fn import_alias(location: &str) -> &str {
    location.rsplit('/').next().unwrap_or(location)
}

/// Resolves IDL types for one generation pass.
#[derive(Debug)]
pub struct TypeResolver<'a, S> {
    set: &'a FileSet,
    providers: &'a ImportProviders,
    syntax: S,
    used: BTreeSet<String>,
}

impl<'a, S: TypeSyntax> TypeResolver<'a, S> {
    /// Creates a resolver for `set` with the given provider table.
    #[must_use]
    pub const fn new(set: &'a FileSet, providers: &'a ImportProviders, syntax: S) -> Self {
        Self {
            set,
            providers,
            syntax,
            used: BTreeSet::new(),
        }
    }

    /// The target syntax in use.
    #[must_use]
    pub const fn syntax(&self) -> &S {
        &self.syntax
    }

    /// Resolves a reference to a named message.
    ///
    /// - Same package: the bare short name.
    /// - Foreign package with a provider: `alias.Name`, alias taken from the
    ///   provider location; the package is recorded as used.
    /// - Foreign package without a provider: the last package segment is
    ///   used as alias and nothing is recorded.
    pub fn reference(&mut self, name: &str) -> String {
        let (package, short) = FileSet::split_components(name);
        let short = titleize(short);

        if self.set.from_same_package(name) {
            return short;
        }

        if let Some(location) = self.providers.get(package) {
            self.used.insert(package.to_string());
            return self.syntax.qualified(import_alias(location), &short);
        }

        let alias = package.rsplit('.').next().unwrap_or(package);
        tracing::debug!("No import provider for '{}', assuming alias '{}'", package, alias);
        self.syntax.qualified(alias, &short)
    }

    /// Resolves a type expression. `entity` names the declaration being
    /// emitted, for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedType`] for type shapes this generator does
    /// not model.
    pub fn resolve(&mut self, ty: &Type, entity: &str) -> Result<String> {
        match ty {
            Type::Primitive(primitive) => Ok(self.syntax.primitive(*primitive).to_string()),
            Type::Array(of) => {
                let element = self.resolve(of, entity)?;
                Ok(self.syntax.array(&element))
            }
            Type::Map { key, value } => {
                let key = self.syntax.primitive(*key);
                let value = self.resolve(value, entity)?;
                Ok(self.syntax.map(key, &value))
            }
            Type::Unresolved(name) => Ok(self.reference(name)),
            other => Err(Error::UnexpectedType {
                entity: entity.to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    /// Resolves a field's type including its annotations.
    ///
    /// `repeated` wraps the type in a collection first; `optional` then wraps
    /// the result, so a field with both yields an optional collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedType`] for type shapes this generator does
    /// not model.
    pub fn field_type(&mut self, field: &Field, entity: &str) -> Result<String> {
        let mut resolved = self.resolve(&field.ty, entity)?;
        if field.is_repeated() {
            resolved = self.syntax.repeated(&resolved);
        }
        if field.is_optional() {
            resolved = self.syntax.optional(&resolved);
        }
        Ok(resolved)
    }

    /// Providers referenced so far.
    #[must_use]
    pub const fn used(&self) -> &BTreeSet<String> {
        &self.used
    }

    /// Consumes the resolver, returning the providers it referenced.
    #[must_use]
    pub fn into_used(self) -> BTreeSet<String> {
        self.used
    }
}
