//! Support services shared by every backend.
//!
//! Nothing in this module knows about a particular target language; the
//! backends plug their syntax in through [`resolver::TypeSyntax`].

pub mod builder;
pub mod id;
pub mod naming;
pub mod resolver;
pub mod streamers;
pub mod types;

pub use builder::SourceBuilder;
pub use id::{WireId, message_id, method_id};
pub use types::{GeneratedCode, GeneratedFile, GenerationOutput, Warning};
