//! End-to-end tests for the Go backend.

#![cfg(feature = "go")]

use yarpc_codegen::common::id::{message_id, method_id};
use yarpc_codegen::golang::GoBackend;
use yarpc_codegen::{Backend, Warning};
use yarpc_core::{Field, FileSet, ImportProviders, Message, Method, PrimitiveType, Service, Type};

/// `shop` package with `Item` and a `Catalog` service.
fn shop() -> FileSet {
    let mut set = FileSet::new("shop");
    set.messages.push(
        Message::new("Item")
            .with_comment("An item for sale.")
            .with_field(Field::new("name", Type::Primitive(PrimitiveType::String), 1))
            .with_field(Field::new("price", Type::Primitive(PrimitiveType::Float64), 2).optional()),
    );
    set.services.push(
        Service::new("Catalog").with_method(Method::new("get", "Item", "Item")),
    );
    set
}

fn generate(set: &FileSet, providers: &ImportProviders) -> String {
    let output = GoBackend::new().generate(set, providers).unwrap();
    assert_eq!(output.code.file_count(), 1);
    output.code.files[0].content.clone()
}

#[test]
fn test_shop_catalog_scenario() {
    let content = generate(&shop(), &ImportProviders::new());

    assert!(content.contains(
        "import (\n\t\"context\"\n\t\"reflect\"\n\n\t\"github.com/libyarp/yarp\"\n)\n"
    ));
    assert!(content.contains("func RegisterMessages() {\n\tyarp.RegisterStructType(Item{})\n}\n"));

    assert!(content.contains(
        "// An item for sale.\ntype Item struct {\n\t*yarp.Structure\n\tName string `index:\"1\"`\n\tPrice *float64 `index:\"2\"`\n}\n"
    ));
    assert!(content.contains(&format!(
        "func (Item) YarpID() uint64 {{ return {} }}",
        message_id("shop", "Item")
    )));
    assert!(content.contains("func (Item) YarpPackage() string { return \"shop\" }"));

    assert!(content.contains(
        "type CatalogClient interface {\n\tGet(ctx context.Context, req *Item, optHeaders map[string]string) (*Item, yarp.Header, error)\n}\n"
    ));
    assert!(content.contains(
        "type CatalogServer interface {\n\tGet(ctx context.Context, headers yarp.Header, req *Item) (yarp.Header, *Item, error)\n}\n"
    ));

    let get = method_id("shop", "Catalog", "get");
    assert!(content.contains(&format!("\t\tMethod:  {get},\n")));
    assert!(content.contains(&format!(
        "func RegisterCatalog(s *yarp.Server, v CatalogServer) {{\n\ts.RegisterHandler({get}, \"shop.Catalog.get\", v.Get)\n}}\n"
    )));
    assert!(content.contains("Wants:    reflect.TypeOf(&Item{}),"));
}

#[test]
fn test_output_is_deterministic() {
    let set = shop();
    let providers = ImportProviders::new();
    assert_eq!(generate(&set, &providers), generate(&set, &providers));
}

#[test]
fn test_provider_import_and_unused_warning() {
    let mut set = FileSet::new("shop");
    set.messages.push(
        Message::new("Order")
            .with_field(Field::new("invoice", Type::Unresolved("acme.billing.Invoice".into()), 1)),
    );
    let providers = ImportProviders::from_specs([
        "acme.billing=github.com/acme/billing",
        "geo=github.com/acme/geo",
    ])
    .unwrap();

    let output = GoBackend::new().generate(&set, &providers).unwrap();
    let content = &output.code.files[0].content;

    assert!(content.contains("\tInvoice billing.Invoice `index:\"1\"`\n"));
    assert!(content.contains("\t\"github.com/libyarp/yarp\"\n\tbilling \"github.com/acme/billing\"\n"));
    assert!(!content.contains("acme/geo"));

    assert_eq!(output.used_providers.len(), 1);
    assert!(output.used_providers.contains("acme.billing"));
    assert_eq!(
        output.warnings,
        vec![Warning::UnusedProvider {
            package: "geo".to_string()
        }]
    );
}

#[test]
fn test_unprovided_foreign_reference_uses_package_segment() {
    let mut set = FileSet::new("shop");
    set.messages.push(
        Message::new("Order")
            .with_field(Field::new("owner", Type::Unresolved("acme.users.User".into()), 1).optional()),
    );
    let output = GoBackend::new()
        .generate(&set, &ImportProviders::new())
        .unwrap();

    assert!(output.code.files[0].content.contains("\tOwner *users.User `index:\"1\"`\n"));
    assert!(output.used_providers.is_empty());
    assert!(output.warnings.is_empty());
}

#[test]
fn test_streaming_foreign_response() {
    let mut set = FileSet::new("shop");
    set.services.push(
        Service::new("ledger")
            .with_method(Method::new("watch", "void", "acme.billing.Invoice").streaming()),
    );
    let providers = ImportProviders::from_specs(["acme.billing=github.com/acme/billing"]).unwrap();
    let output = GoBackend::new().generate(&set, &providers).unwrap();
    let content = &output.code.files[0].content;

    assert!(content.contains(
        "\tWatch(ctx context.Context, optHeaders map[string]string) (<-chan *billing.Invoice, yarp.Header, error)\n"
    ));
    assert!(content.contains(
        "\tWatch(ctx context.Context, headers yarp.Header, out *ExtBillingInvoiceStreamer) error\n"
    ));
    assert!(content.contains("res, headers, err := cli.c.DoRequestStreamed(ctx, request, nil)"));
    assert!(content.contains("type ExtBillingInvoiceStreamer struct {\n\th  yarp.Header\n\tch chan<- *billing.Invoice\n}\n"));
    assert!(content.contains("func (i ExtBillingInvoiceStreamer) Push(v *billing.Invoice) { i.ch <- v }"));
    assert!(!content.contains("\"reflect\""));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_repeated_optional_and_maps() {
    let mut set = FileSet::new("shop");
    set.messages.push(
        Message::new("Basket")
            .with_field(
                Field::new("items", Type::Unresolved("Item".into()), 1)
                    .repeated()
                    .optional(),
            )
            .with_field(Field::new(
                "counts",
                Type::Map {
                    key: PrimitiveType::String,
                    value: Box::new(Type::Primitive(PrimitiveType::Uint32)),
                },
                2,
            ))
            .with_field(Field::new("callback_url", Type::Primitive(PrimitiveType::String), 3)),
    );
    let content = generate(&set, &ImportProviders::new());

    assert!(content.contains("\tItems *[]Item `index:\"1\"`\n"));
    assert!(content.contains("\tCounts map[string]uint32 `index:\"2\"`\n"));
    assert!(content.contains("\tCallbackURL string `index:\"3\"`\n"));
}

#[test]
fn test_same_short_name_streams_get_separate_sinks() {
    let mut set = FileSet::new("shop");
    set.services.push(
        Service::new("ledger")
            .with_method(Method::new("watch_a", "void", "acme.billing.Invoice").streaming())
            .with_method(Method::new("watch_b", "void", "acme.legacy.Invoice").streaming()),
    );
    let providers = ImportProviders::from_specs([
        "acme.billing=github.com/acme/billing",
        "acme.legacy=github.com/acme/legacy",
    ])
    .unwrap();
    let content = &GoBackend::new().generate(&set, &providers).unwrap().code.files[0].content;

    assert_eq!(content.matches("Streamer struct {").count(), 2);
    assert!(content.contains(
        "\tWatchA(ctx context.Context, headers yarp.Header, out *ExtBillingInvoiceStreamer) error\n"
    ));
    assert!(content.contains(
        "\tWatchB(ctx context.Context, headers yarp.Header, out *ExtLegacyInvoiceStreamer) error\n"
    ));
    assert!(content.contains("func (i ExtBillingInvoiceStreamer) Push(v *billing.Invoice) { i.ch <- v }"));
    assert!(content.contains("func (i ExtLegacyInvoiceStreamer) Push(v *legacy.Invoice) { i.ch <- v }"));
}
