//! End-to-end tests for the `yarpc` command.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use yarpc_cli::cli::Cli;
use yarpc_cli::runner::execute_command;
use yarpc_core::cli::{ExitCode, OutputFormat};

const SHOP: &str = r#"{
    "package": "acme.shop",
    "messages": [{
        "name": "Item",
        "fields": [
            {"field": {"name": "name", "type": {"kind": "primitive", "of": "string"}, "index": 1}},
            {"field": {"name": "invoice", "type": {"kind": "unresolved", "of": "acme.billing.Invoice"}, "index": 2, "annotations": ["optional"]}}
        ]
    }],
    "services": [{
        "name": "Catalog",
        "methods": [{"name": "get", "argument_type": "Item", "return_type": "Item"}]
    }]
}"#;

const ORDERS: &str = r#"{
    "package": "acme.shop",
    "messages": [{"name": "Order"}]
}"#;

fn write_input(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn run(args: &[&str]) -> ExitCode {
    let cli = Cli::try_parse_from(std::iter::once("yarpc").chain(args.iter().copied())).unwrap();
    execute_command(cli.command, OutputFormat::Json).unwrap()
}

fn yarpc(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_yarpc"))
        .args(args)
        .env_remove("YARPC_CONFIG")
        .output()
        .unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_go_writes_single_file() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", SHOP);
    let orders = write_input(&dir, "orders.json", ORDERS);
    let out = dir.path().join("gen/shop.yarp.go");

    let code = run(&[
        "go",
        "--out",
        arg(&out),
        "--provided-by",
        "acme.billing=github.com/acme/billing",
        arg(&shop),
        arg(&orders),
    ]);
    assert_eq!(code, ExitCode::SUCCESS);

    let content = fs::read_to_string(out).unwrap();
    assert!(content.starts_with("// Code generated by yarpc. DO NOT EDIT.\n\npackage shop\n"));
    assert!(content.contains("\tbilling \"github.com/acme/billing\"\n"));
    assert!(content.contains("\tInvoice *billing.Invoice `index:\"2\"`\n"));
    assert!(content.contains("type Order struct {"));
}

#[test]
fn test_go_package_override() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", ORDERS);
    let out = dir.path().join("store.go");

    run(&["go", "--out", arg(&out), "--package", "store", arg(&shop)]);
    assert!(fs::read_to_string(out).unwrap().contains("package store\n"));
}

#[test]
fn test_ruby_multi_file_under_directory() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", SHOP);
    let lib = dir.path().join("lib");

    let code = run(&[
        "ruby",
        "--out",
        arg(&lib),
        "--provided-by",
        "acme.billing=acme/billing",
        arg(&shop),
    ]);
    assert_eq!(code, ExitCode::SUCCESS);

    let item = fs::read_to_string(lib.join("acme/shop/item.rb")).unwrap();
    assert!(item.contains("require \"acme/billing\""));
    assert!(item.contains("module Acme\n  module Shop\n"));
    assert!(lib.join("acme/shop/catalog_service.rb").is_file());
}

#[test]
fn test_ruby_single_file_with_config() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", ORDERS);
    let config = write_input(&dir, "yarpc.toml", "single_file = true\nnamespace = \"Store\"\n");
    let out = dir.path().join("store.rb");

    run(&["ruby", "--out", arg(&out), "--config", arg(&config), arg(&shop)]);

    let content = fs::read_to_string(out).unwrap();
    assert!(content.contains("module Store\n  class Order < Yarp::Structure\n"));
}

#[test]
fn test_binary_reports_summary_as_json() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", ORDERS);
    let out = dir.path().join("shop.yarp.go");

    let output = yarpc(&["--format", "json", "go", "--out", arg(&out), arg(&shop)]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["language"], "go");
    assert_eq!(summary["package"], "acme.shop");
    assert_eq!(summary["files"][0], arg(&out));
}

#[test]
fn test_binary_warns_about_unused_provider() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", ORDERS);
    let out = dir.path().join("shop.yarp.go");

    let output = yarpc(&[
        "go",
        "--out",
        arg(&out),
        "--provided-by",
        "acme.geo=github.com/acme/geo",
        arg(&shop),
    ]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("import provider set, but unused: acme.geo"));
}

#[test]
fn test_binary_aggregates_load_failures() {
    let dir = TempDir::new().unwrap();
    let broken = write_input(&dir, "broken.json", "{");
    let other = write_input(&dir, "other.json", r#"{"package": "other"}"#);
    let shop = write_input(&dir, "shop.json", ORDERS);
    let out = dir.path().join("shop.yarp.go");

    let output = yarpc(&["go", "--out", arg(&out), arg(&shop), arg(&broken), arg(&other)]);
    assert_eq!(output.status.code(), Some(ExitCode::INVALID_INPUT.as_i32()));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.json"));
    assert!(stderr.contains("other.json"));
    assert!(!out.exists());
}

#[test]
fn test_binary_rejects_invalid_class_path() {
    let dir = TempDir::new().unwrap();
    let shop = write_input(&dir, "shop.json", ORDERS);

    for class_path in ["Acme.Shop", "acme::shop", "A:B"] {
        let output = yarpc(&[
            "ruby",
            "--out",
            arg(dir.path()),
            "--class-path",
            class_path,
            arg(&shop),
        ]);
        assert_eq!(
            output.status.code(),
            Some(ExitCode::CONFIG_ERROR.as_i32()),
            "{class_path}"
        );
    }
    assert!(!dir.path().join("acme").exists());
}
