//! Go spelling of IDL types.

use crate::common::naming::{snake_to_camel, titleize};
use crate::common::resolver::TypeSyntax;
use yarpc_core::PrimitiveType;

/// [`TypeSyntax`] for Go.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::TypeSyntax;
/// use yarpc_codegen::golang::GoSyntax;
/// use yarpc_core::PrimitiveType;
///
/// let go = GoSyntax;
/// assert_eq!(go.map("string", &go.array("int32")), "map[string][]int32");
/// assert_eq!(go.optional("Item"), "*Item");
/// assert_eq!(go.primitive(PrimitiveType::Float64), "float64");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GoSyntax;

impl TypeSyntax for GoSyntax {
    fn primitive(&self, primitive: PrimitiveType) -> &'static str {
        match primitive {
            PrimitiveType::Uint8 => "uint8",
            PrimitiveType::Uint16 => "uint16",
            PrimitiveType::Uint32 => "uint32",
            PrimitiveType::Uint64 => "uint64",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
            PrimitiveType::Bool => "bool",
            PrimitiveType::String => "string",
            PrimitiveType::Struct => "struct{}",
        }
    }

    fn array(&self, element: &str) -> String {
        format!("[]{element}")
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("map[{key}]{value}")
    }

    fn optional(&self, inner: &str) -> String {
        format!("*{inner}")
    }

    fn qualified(&self, alias: &str, name: &str) -> String {
        format!("{alias}.{name}")
    }
}

/// Name of the streamer type generated for a resolved response type.
///
/// Local types keep their name; foreign types (`alias.Name`) become
/// `ExtAliasName`, so they cannot clash with a local type or with a foreign
/// type of the same short name from another package.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::golang::streamer_name;
///
/// assert_eq!(streamer_name("Item"), "ItemStreamer");
/// assert_eq!(streamer_name("billing.Invoice"), "ExtBillingInvoiceStreamer");
/// ```
#[must_use]
pub fn streamer_name(resolved: &str) -> String {
    match resolved.rsplit_once('.') {
        Some((alias, short)) => {
            format!("Ext{}{}Streamer", snake_to_camel(alias), titleize(short))
        }
        None => format!("{}Streamer", titleize(resolved)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_primitive_has_a_go_name() {
        let all = [
            (PrimitiveType::Uint8, "uint8"),
            (PrimitiveType::Uint16, "uint16"),
            (PrimitiveType::Uint32, "uint32"),
            (PrimitiveType::Uint64, "uint64"),
            (PrimitiveType::Int8, "int8"),
            (PrimitiveType::Int16, "int16"),
            (PrimitiveType::Int32, "int32"),
            (PrimitiveType::Int64, "int64"),
            (PrimitiveType::Float32, "float32"),
            (PrimitiveType::Float64, "float64"),
            (PrimitiveType::Bool, "bool"),
            (PrimitiveType::String, "string"),
            (PrimitiveType::Struct, "struct{}"),
        ];
        for (primitive, name) in all {
            assert_eq!(GoSyntax.primitive(primitive), name);
        }
    }

    #[test]
    fn test_repeated_defaults_to_slice() {
        assert_eq!(GoSyntax.repeated("*Item"), "[]*Item");
        assert_eq!(GoSyntax.qualified("y", "Baz"), "y.Baz");
    }

    #[test]
    fn test_streamer_name() {
        assert_eq!(streamer_name("Event"), "EventStreamer");
        assert_eq!(streamer_name("y.Event"), "ExtYEventStreamer");
        assert_eq!(streamer_name("legacy_billing.Invoice"), "ExtLegacyBillingInvoiceStreamer");
    }
}
