//! Deterministic wire identifiers.
//!
//! Generated code tags every structure and every RPC method with a 64-bit
//! identifier that the runtime uses as a discriminator on the wire. The
//! identifier is the xxHash64 (seed 0) of the fully-qualified name, so it is
//! stable across runs, platforms and generator backends.
//!
//! # Examples
//!
//! ```
//! use yarpc_codegen::common::id::{message_id, method_id};
//!
//! let item = message_id("shop", "Item");
//! assert_eq!(item, message_id("shop", "Item"));
//! assert_ne!(item, message_id("shop", "Order"));
//! assert_ne!(method_id("shop", "Catalog", "get"), method_id("shop", "Catalog", "list"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// A 64-bit wire discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(u64);

impl WireId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Renders the identifier as the hexadecimal literal used in emitted code.
impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<WireId> for u64 {
    fn from(id: WireId) -> Self {
        id.0
    }
}

/// Hashes name components joined with `.`.
#[must_use]
pub fn fingerprint(components: &[&str]) -> WireId {
    WireId(xxh64(components.join(".").as_bytes(), 0))
}

/// Identifier of `package.message`.
#[must_use]
pub fn message_id(package: &str, message: &str) -> WireId {
    fingerprint(&[package, message])
}

/// Identifier of `package.service.method`.
#[must_use]
pub fn method_id(package: &str, service: &str, method: &str) -> WireId {
    fingerprint(&[package, service, method])
}
