//! Code generation for yarp IDL models.
//!
//! Transforms a resolved [`yarpc_core::FileSet`] into Go or Ruby sources.
//! Both backends share the same support services from [`common`]: the
//! indentation-aware [`SourceBuilder`], naming conversions, wire identifier
//! hashing and the [`TypeResolver`].
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "go")]
//! # {
//! use yarpc_codegen::{Backend, golang::GoBackend};
//! use yarpc_core::{Field, FileSet, ImportProviders, Message, PrimitiveType, Type};
//!
//! let mut set = FileSet::new("shop");
//! set.messages.push(
//!     Message::new("Item")
//!         .with_field(Field::new("name", Type::Primitive(PrimitiveType::String), 1)),
//! );
//!
//! let output = GoBackend::new().generate(&set, &ImportProviders::new()).unwrap();
//! assert_eq!(output.code.file_count(), 1);
//! assert!(output.code.files[0].content.contains("type Item struct {"));
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod backend;
pub mod common;
#[cfg(feature = "go")]
pub mod golang;
#[cfg(feature = "ruby")]
pub mod ruby;

pub use backend::Backend;
pub use common::builder::SourceBuilder;
pub use common::resolver::{TypeResolver, TypeSyntax};
pub use common::types::{GeneratedCode, GeneratedFile, GenerationOutput, Warning};
