//! Ruby spelling of IDL types and field declarations.

use crate::common::naming::{snake_to_camel, titleize};
use crate::common::resolver::{TypeResolver, TypeSyntax};
use yarpc_core::{Field, PrimitiveType, Result, Type};

/// [`TypeSyntax`] for the yarp Ruby runtime.
///
/// Foreign references become constant paths (`Billing::Invoice`). Ruby has
/// no nullable type expression, so [`TypeSyntax::optional`] is the identity;
/// optional fields are marked with `optional: true` in their declaration.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::TypeSyntax;
/// use yarpc_codegen::ruby::RubySyntax;
/// use yarpc_core::PrimitiveType;
///
/// let rb = RubySyntax;
/// let ints = rb.array(rb.primitive(PrimitiveType::Int32));
/// assert_eq!(rb.map(":string", &ints), "Yarp::Proto::Map[:string, Yarp::Proto::Array[:int32]]");
/// assert_eq!(rb.qualified("billing", "Invoice"), "Billing::Invoice");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RubySyntax;

impl TypeSyntax for RubySyntax {
    fn primitive(&self, primitive: PrimitiveType) -> &'static str {
        match primitive {
            PrimitiveType::Uint8 => ":uint8",
            PrimitiveType::Uint16 => ":uint16",
            PrimitiveType::Uint32 => ":uint32",
            PrimitiveType::Uint64 => ":uint64",
            PrimitiveType::Int8 => ":int8",
            PrimitiveType::Int16 => ":int16",
            PrimitiveType::Int32 => ":int32",
            PrimitiveType::Int64 => ":int64",
            PrimitiveType::Float32 => ":float32",
            PrimitiveType::Float64 => ":float64",
            PrimitiveType::Bool => ":bool",
            PrimitiveType::String => ":string",
            PrimitiveType::Struct => ":struct",
        }
    }

    fn array(&self, element: &str) -> String {
        format!("Yarp::Proto::Array[{element}]")
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("Yarp::Proto::Map[{key}, {value}]")
    }

    fn optional(&self, inner: &str) -> String {
        inner.to_string()
    }

    fn qualified(&self, alias: &str, name: &str) -> String {
        format!("{}::{name}", snake_to_camel(alias))
    }
}

/// Renders the class-body declaration of a plain field.
///
/// Repeated fields become `array` declarations of the full element type;
/// otherwise the declaration keyword follows the type shape. Optional
/// fields get a trailing `optional: true`.
pub(crate) fn field_declaration(
    resolver: &mut TypeResolver<'_, RubySyntax>,
    field: &Field,
    entity: &str,
) -> Result<String> {
    let name = &field.name;
    let index = field.index;

    let mut declaration = if field.is_repeated() {
        let of = resolver.resolve(&field.ty, entity)?;
        format!("array :{name}, {index}, of: {of}")
    } else {
        match &field.ty {
            Type::Primitive(primitive) => {
                let ty = resolver.syntax().primitive(*primitive);
                format!("primitive :{name}, {ty}, {index}")
            }
            Type::Map { key, value } => {
                let key = resolver.syntax().primitive(*key);
                let value = resolver.resolve(value, entity)?;
                format!("map :{name}, {index}, key: {key}, value: {value}")
            }
            Type::Array(of) => {
                let of = resolver.resolve(of, entity)?;
                format!("array :{name}, {index}, of: {of}")
            }
            Type::Unresolved(reference) => {
                let class = resolver.reference(reference);
                format!("struct :{name}, {class}, {index}")
            }
            other => {
                return Err(yarpc_core::Error::UnexpectedType {
                    entity: entity.to_string(),
                    found: format!("{other:?}"),
                });
            }
        }
    };

    if field.is_optional() {
        declaration.push_str(", optional: true");
    }
    Ok(declaration)
}

/// Name of the streamer class generated for a resolved response type.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::ruby::streamer_class;
///
/// assert_eq!(streamer_class("Event"), "EventStreamer");
/// assert_eq!(streamer_class("Billing::Invoice"), "ExtBillingInvoiceStreamer");
/// ```
#[must_use]
pub fn streamer_class(resolved: &str) -> String {
    match resolved.rsplit_once("::") {
        Some((scope, short)) => {
            format!("Ext{}{}Streamer", scope.replace("::", ""), titleize(short))
        }
        None => format!("{}Streamer", titleize(resolved)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yarpc_core::{FileSet, ImportProviders};

    fn declare(field: &Field) -> String {
        let set = FileSet::new("shop");
        let providers = ImportProviders::from_specs(["acme.billing=acme/billing"]).unwrap();
        let mut resolver = TypeResolver::new(&set, &providers, RubySyntax);
        field_declaration(&mut resolver, field, "shop.Item.f").unwrap()
    }

    #[test]
    fn test_primitive_declarations() {
        let string = Type::Primitive(PrimitiveType::String);
        assert_eq!(
            declare(&Field::new("name", string.clone(), 1)),
            "primitive :name, :string, 1"
        );
        assert_eq!(
            declare(&Field::new("tags", string.clone(), 2).repeated()),
            "array :tags, 2, of: :string"
        );
        assert_eq!(
            declare(&Field::new("nick", string, 3).optional()),
            "primitive :nick, :string, 3, optional: true"
        );
    }

    #[test]
    fn test_struct_reference_declarations() {
        let local = Type::Unresolved("Price".to_string());
        assert_eq!(
            declare(&Field::new("price", local, 4)),
            "struct :price, Price, 4"
        );

        let foreign = Type::Unresolved("acme.billing.Invoice".to_string());
        assert_eq!(
            declare(&Field::new("invoices", foreign, 5).repeated().optional()),
            "array :invoices, 5, of: Billing::Invoice, optional: true"
        );
    }

    #[test]
    fn test_container_declarations() {
        let map = Type::Map {
            key: PrimitiveType::String,
            value: Box::new(Type::Primitive(PrimitiveType::Int64)),
        };
        assert_eq!(
            declare(&Field::new("stock", map, 6)),
            "map :stock, 6, key: :string, value: :int64"
        );

        let nested = Type::Array(Box::new(Type::Array(Box::new(Type::Primitive(
            PrimitiveType::Bool,
        )))));
        assert_eq!(
            declare(&Field::new("grid", nested, 7)),
            "array :grid, 7, of: Yarp::Proto::Array[:bool]"
        );
    }

    #[test]
    fn test_streamer_class() {
        assert_eq!(streamer_class("Item"), "ItemStreamer");
        assert_eq!(streamer_class("Acme::Item"), "ExtAcmeItemStreamer");
    }
}
