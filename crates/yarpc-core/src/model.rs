//! Resolved IDL model.
//!
//! These types describe the already-parsed, already-validated graph of
//! messages and services that the model provider hands to the generator.
//! The generator only reads them; nothing here is mutated during a
//! generation pass.
//!
//! All types round-trip through serde so a resolved model can be exchanged
//! as a JSON document.
//!
//! # Examples
//!
//! ```
//! use yarpc_core::{Field, FileSet, Message, PrimitiveType, Type};
//!
//! let mut set = FileSet::new("shop");
//! set.messages.push(
//!     Message::new("Item")
//!         .with_field(Field::new("name", Type::Primitive(PrimitiveType::String), 1)),
//! );
//!
//! assert!(set.from_same_package("Item"));
//! assert!(set.from_same_package("shop.Item"));
//! assert!(!set.from_same_package("billing.Invoice"));
//! ```

use serde::{Deserialize, Serialize};

/// Sentinel type name for methods without an argument or return value.
pub const VOID: &str = "void";

fn void() -> String {
    VOID.to_string()
}

/// Primitive IDL types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Unsigned 8-bit integer
    Uint8,
    /// Unsigned 16-bit integer
    Uint16,
    /// Unsigned 32-bit integer
    Uint32,
    /// Unsigned 64-bit integer
    Uint64,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// 32-bit float
    Float32,
    /// 64-bit float
    Float64,
    /// Boolean
    Bool,
    /// UTF-8 string
    String,
    /// Generic structure
    Struct,
}

/// An IDL type expression.
///
/// Marked non-exhaustive: a generator must treat shapes it does not know as
/// a contract breach with the model provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Type {
    /// A primitive type.
    Primitive(PrimitiveType),
    /// A sequence of another type.
    Array(Box<Type>),
    /// A mapping from a primitive key to another type.
    Map {
        /// Key type; composite keys are not modeled
        key: PrimitiveType,
        /// Value type
        value: Box<Type>,
    },
    /// A reference to a message declared elsewhere, possibly qualified.
    Unresolved(String),
}

/// Field annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Annotation {
    /// The field holds a collection of values.
    Repeated,
    /// The field may be absent.
    Optional,
}

/// A plain message field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, usually `snake_case`
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub ty: Type,
    /// Wire index, unique within the message
    pub index: u32,
    /// Annotation set
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Field {
    /// Creates a field without annotations.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type, index: u32) -> Self {
        Self {
            name: name.into(),
            ty,
            index,
            annotations: Vec::new(),
        }
    }

    /// Adds the `repeated` annotation.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.annotations.push(Annotation::Repeated);
        self
    }

    /// Adds the `optional` annotation.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.annotations.push(Annotation::Optional);
        self
    }

    /// Returns `true` if the field is annotated as repeated.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.annotations.contains(&Annotation::Repeated)
    }

    /// Returns `true` if the field is annotated as optional.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.annotations.contains(&Annotation::Optional)
    }
}

/// A discriminated set of mutually exclusive members sharing one wire index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOfField {
    /// Wire index of the whole group
    pub index: u32,
    /// Members; may contain further oneofs
    pub items: Vec<Member>,
}

/// A member of a message body or of a oneof group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Member {
    /// Leaf field
    Field(Field),
    /// Nested discriminated group
    #[serde(rename = "oneof")]
    OneOf(OneOfField),
}

impl From<Field> for Member {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<OneOfField> for Member {
    fn from(oneof: OneOfField) -> Self {
        Self::OneOf(oneof)
    }
}

/// A message declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Declared name
    pub name: String,
    /// Comment lines, without comment markers
    #[serde(default)]
    pub comments: Vec<String>,
    /// Members in wire-index order
    #[serde(default)]
    pub fields: Vec<Member>,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Appends a member.
    #[must_use]
    pub fn with_field(mut self, member: impl Into<Member>) -> Self {
        self.fields.push(member.into());
        self
    }

    /// Appends a comment line.
    #[must_use]
    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }
}

/// An RPC method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    /// Declared name
    pub name: String,
    /// Comment lines
    #[serde(default)]
    pub comments: Vec<String>,
    /// Argument message name, or `"void"`
    #[serde(default = "void")]
    pub argument_type: String,
    /// Return message name, or `"void"`
    #[serde(default = "void")]
    pub return_type: String,
    /// Whether the server produces a sequence of responses
    #[serde(default)]
    pub return_streaming: bool,
}

impl Method {
    /// Creates a unary method.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        argument_type: impl Into<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            argument_type: argument_type.into(),
            return_type: return_type.into(),
            return_streaming: false,
        }
    }

    /// Marks the method as streaming its responses.
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.return_streaming = true;
        self
    }

    /// Returns `true` if the method takes no argument.
    #[must_use]
    pub fn accepts_void(&self) -> bool {
        self.argument_type == VOID
    }

    /// Returns `true` if the method returns nothing.
    #[must_use]
    pub fn returns_void(&self) -> bool {
        self.return_type == VOID
    }

    /// Returns `true` if responses are delivered as a sequence.
    ///
    /// A streaming flag on a void method is ignored: there is nothing to
    /// stream, so such a method behaves like a unary void call.
    #[must_use]
    pub fn is_streamed(&self) -> bool {
        self.return_streaming && !self.returns_void()
    }
}

/// An RPC service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Declared name
    pub name: String,
    /// Comment lines
    #[serde(default)]
    pub comments: Vec<String>,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Service {
    /// Creates a service without methods.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// The resolved model of one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
    /// Dot-separated package name
    pub package: String,
    /// Messages in declaration order
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Services in declaration order
    #[serde(default)]
    pub services: Vec<Service>,
}

impl FileSet {
    /// Creates an empty file set for `package`.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            messages: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Returns the package name.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Splits a possibly qualified type name into package and short name.
    ///
    /// # Examples
    ///
    /// ```
    /// use yarpc_core::FileSet;
    ///
    /// assert_eq!(FileSet::split_components("foo.bar.Baz"), ("foo.bar", "Baz"));
    /// assert_eq!(FileSet::split_components("Baz"), ("", "Baz"));
    /// ```
    #[must_use]
    pub fn split_components(name: &str) -> (&str, &str) {
        name.rsplit_once('.').unwrap_or(("", name))
    }

    /// Returns `true` if `name` refers to a type declared in this package.
    #[must_use]
    pub fn from_same_package(&self, name: &str) -> bool {
        let (package, _) = Self::split_components(name);
        package.is_empty() || package == self.package
    }

    /// Appends the declarations of `other`, which must share this package.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the packages differ.
    pub fn merge(&mut self, other: Self) -> crate::Result<()> {
        if other.package != self.package {
            return Err(crate::Error::InvalidArgument(format!(
                "package mismatch: expected '{}', found '{}'",
                self.package, other.package
            )));
        }
        self.messages.extend(other.messages);
        self.services.extend(other.services);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_components() {
        assert_eq!(FileSet::split_components("a.b.C"), ("a.b", "C"));
        assert_eq!(FileSet::split_components("C"), ("", "C"));
    }

    #[test]
    fn test_from_same_package() {
        let set = FileSet::new("shop.v1");
        assert!(set.from_same_package("Item"));
        assert!(set.from_same_package("shop.v1.Item"));
        assert!(!set.from_same_package("shop.Item"));
    }

    #[test]
    fn test_field_annotations() {
        let field = Field::new("tags", Type::Primitive(PrimitiveType::String), 3)
            .repeated()
            .optional();
        assert!(field.is_repeated());
        assert!(field.is_optional());

        let plain = Field::new("name", Type::Primitive(PrimitiveType::String), 1);
        assert!(!plain.is_repeated());
        assert!(!plain.is_optional());
    }

    #[test]
    fn test_method_void_sentinel() {
        let method = Method::new("ping", VOID, VOID);
        assert!(method.accepts_void());
        assert!(method.returns_void());
        assert!(!method.return_streaming);
        assert!(Method::new("watch", "Query", "Event").streaming().is_streamed());
        assert!(!Method::new("fire", "Query", VOID).streaming().is_streamed());
    }

    #[test]
    fn test_merge_rejects_foreign_package() {
        let mut set = FileSet::new("shop");
        let mut other = FileSet::new("shop");
        other.messages.push(Message::new("Item"));
        set.merge(other).unwrap();
        assert_eq!(set.messages.len(), 1);

        let err = set.merge(FileSet::new("billing")).unwrap_err();
        assert!(err.to_string().contains("package mismatch"));
    }

    #[test]
    fn test_deserialize_resolved_model() {
        let json = r#"{
            "package": "shop",
            "messages": [{
                "name": "Item",
                "comments": ["An item for sale"],
                "fields": [
                    {"field": {"name": "name", "type": {"kind": "primitive", "of": "string"}, "index": 1}},
                    {"field": {"name": "price", "type": {"kind": "primitive", "of": "float64"}, "index": 2, "annotations": ["optional"]}},
                    {"field": {"name": "labels", "type": {"kind": "map", "of": {"key": "string", "value": {"kind": "array", "of": {"kind": "unresolved", "of": "Label"}}}}, "index": 3}},
                    {"oneof": {"index": 4, "items": [
                        {"field": {"name": "sku", "type": {"kind": "primitive", "of": "string"}, "index": 5}}
                    ]}}
                ]
            }],
            "services": [{
                "name": "Catalog",
                "methods": [{"name": "get", "argument_type": "Item", "return_type": "Item"}]
            }]
        }"#;

        let set: FileSet = serde_json::from_str(json).unwrap();
        let item = &set.messages[0];
        assert_eq!(item.fields.len(), 4);
        let Member::Field(price) = &item.fields[1] else {
            panic!("expected a field");
        };
        assert!(price.is_optional());
        assert_eq!(
            price.ty,
            Type::Primitive(PrimitiveType::Float64),
        );
        assert!(matches!(item.fields[3], Member::OneOf(OneOfField { index: 4, .. })));

        let get = &set.services[0].methods[0];
        assert!(!get.return_streaming);
        assert!(!get.accepts_void());
    }

    #[test]
    fn test_method_defaults_to_void() {
        let method: Method = serde_json::from_str(r#"{"name": "ping"}"#).unwrap();
        assert!(method.accepts_void());
        assert!(method.returns_void());
    }
}
