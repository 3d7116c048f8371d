//! Ruby backend.
//!
//! Emits one file per message and one per service, each wrapped in the
//! namespace modules, or a single aggregated file when single-file mode is
//! enabled. Paths follow the Ruby convention of `snake_case` directories
//! mirroring the module nesting, so the output can be autoloaded.

use crate::backend::Backend;
use crate::common::builder::SourceBuilder;
use crate::common::id::{message_id, method_id};
use crate::common::naming::{camel_to_snake, snake_to_camel, titleize};
use crate::common::resolver::TypeResolver;
use crate::common::streamers::StreamerSet;
use crate::common::types::{GeneratedCode, GeneratedFile, GenerationOutput};
use crate::emitln;
use crate::ruby::check::check_source;
use crate::ruby::concat::{cleanup, wrap_in_modules};
use crate::ruby::types::{RubySyntax, field_declaration, streamer_class};
use std::collections::{BTreeMap, BTreeSet};
use yarpc_core::{
    Error, FileSet, GeneratorConfig, ImportProviders, Member, Message, Method, NamespacePath,
    Result, Service,
};

const HEADER: &str = "# Code generated by yarpc. DO NOT EDIT.";
const INDENT: &str = "  ";

/// Ruby code generator.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::{Backend, ruby::RubyBackend};
/// use yarpc_core::{Field, FileSet, ImportProviders, Message, PrimitiveType, Type};
///
/// let mut set = FileSet::new("acme.shop");
/// set.messages.push(
///     Message::new("LineItem")
///         .with_field(Field::new("sku", Type::Primitive(PrimitiveType::String), 1)),
/// );
///
/// let output = RubyBackend::new().generate(&set, &ImportProviders::new()).unwrap();
/// let file = output.code.get("acme/shop/line_item.rb").unwrap();
/// assert!(file.content.contains("module Acme\n  module Shop\n    class LineItem < Yarp::Structure\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RubyBackend {
    namespace: Option<NamespacePath>,
    single_file: bool,
}

/// One logical output unit before namespace wrapping.
struct Unit {
    /// What the unit declares, for diagnostics
    entity: String,
    path: String,
    body: String,
    requires: BTreeSet<String>,
}

impl RubyBackend {
    /// Creates a multi-file backend deriving the namespace from the model
    /// package.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            namespace: None,
            single_file: false,
        }
    }

    /// Overrides the namespace modules.
    #[must_use]
    pub fn with_namespace(mut self, namespace: NamespacePath) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Selects single-file output.
    #[must_use]
    pub const fn with_single_file(mut self, single_file: bool) -> Self {
        self.single_file = single_file;
        self
    }

    /// Creates a backend from generator configuration.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            single_file: config.single_file,
        }
    }

    fn namespace(&self, set: &FileSet) -> Result<NamespacePath> {
        let namespace = self
            .namespace
            .clone()
            .unwrap_or_else(|| NamespacePath::from_package(set.package(), snake_to_camel));
        if namespace.segments().is_empty() {
            return Err(Error::ConfigError {
                message: "cannot derive a Ruby namespace from an empty model package; \
                          set a class path explicitly"
                    .to_string(),
            });
        }
        namespace.validate()?;
        Ok(namespace)
    }

    fn render(
        namespace: &NamespacePath,
        providers: &ImportProviders,
        requires: &BTreeSet<String>,
        bodies: &[String],
    ) -> Result<String> {
        let mut b = SourceBuilder::with_indent_unit(INDENT);
        emitln!(b, "{HEADER}");
        emitln!(b);
        let locations: Vec<&str> = requires.iter().filter_map(|p| providers.get(p)).collect();
        if !locations.is_empty() {
            for location in locations {
                emitln!(b, "require \"{location}\"");
            }
            emitln!(b);
        }
        wrap_in_modules(&mut b, namespace.segments(), bodies);

        let content = cleanup(b.as_str());
        check_source(&content)?;
        Ok(content)
    }
}

impl Backend for RubyBackend {
    fn language(&self) -> &'static str {
        "ruby"
    }

    fn generate(&self, set: &FileSet, providers: &ImportProviders) -> Result<GenerationOutput> {
        let namespace = self.namespace(set)?;
        let dir: Vec<String> = namespace
            .segments()
            .iter()
            .map(|s| camel_to_snake(s))
            .collect();
        let dir = dir.join("/");
        tracing::info!(
            "Generating Ruby sources for {} under {} ({} messages, {} services, single file: {})",
            set.package(),
            namespace,
            set.messages.len(),
            set.services.len(),
            self.single_file
        );

        let mut units = Vec::new();
        let mut streamers = StreamerSet::new();

        for message in &set.messages {
            let mut resolver = TypeResolver::new(set, providers, RubySyntax);
            let body = message_class(&mut resolver, set, message)?;
            units.push(Unit {
                entity: format!("message {}", message.name),
                path: format!("{dir}/{}.rb", camel_to_snake(&message.name)),
                body,
                requires: resolver.into_used(),
            });
        }

        for service in &set.services {
            let mut resolver = TypeResolver::new(set, providers, RubySyntax);
            let body = service_classes(&mut resolver, set, service, &mut streamers);
            units.push(Unit {
                entity: format!("service {}", service.name),
                path: format!("{dir}/{}_service.rb", camel_to_snake(&service.name)),
                body,
                requires: resolver.into_used(),
            });
        }

        if !streamers.is_empty() {
            units.push(Unit {
                entity: "streamer helpers".to_string(),
                path: format!("{dir}/streamers.rb"),
                body: streamer_classes(&streamers),
                requires: BTreeSet::new(),
            });
        }

        let used: BTreeSet<String> = units
            .iter()
            .flat_map(|u| u.requires.iter().cloned())
            .collect();

        let mut code = GeneratedCode::new();
        if self.single_file {
            let bodies: Vec<String> = units.into_iter().map(|u| u.body).collect();
            code.add_file(GeneratedFile {
                path: format!("{dir}.rb"),
                content: Self::render(&namespace, providers, &used, &bodies)?,
            });
        } else {
            check_distinct_paths(&units)?;
            for unit in units {
                let content =
                    Self::render(&namespace, providers, &unit.requires, &[unit.body])?;
                code.add_file(GeneratedFile {
                    path: unit.path,
                    content,
                });
            }
        }

        Ok(GenerationOutput::new(code, providers, used))
    }
}

/// Rejects units that would be written to the same file.
fn check_distinct_paths(units: &[Unit]) -> Result<()> {
    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    for unit in units {
        if let Some(first) = seen.insert(&unit.path, &unit.entity) {
            return Err(Error::ConfigError {
                message: format!(
                    "{first} and {} both map to {}; rename one or use single-file output",
                    unit.entity, unit.path
                ),
            });
        }
    }
    Ok(())
}

fn message_class(
    resolver: &mut TypeResolver<'_, RubySyntax>,
    set: &FileSet,
    message: &Message,
) -> Result<String> {
    let package = set.package();
    tracing::debug!("Emitting Ruby class {}.{}", package, message.name);

    let mut b = SourceBuilder::with_indent_unit(INDENT);
    for line in &message.comments {
        emitln!(b, "# {line}");
    }
    emitln!(b, "class {} < Yarp::Structure", titleize(&message.name));

    let entity = format!("{package}.{}", message.name);
    let mut outcome = Ok(());
    b.indent(|b| {
        emitln!(
            b,
            "yarp_meta id: {}, package: \"{package}\", name: :{}",
            message_id(package, &message.name),
            message.name
        );
        outcome = emit_members(b, resolver, &message.fields, &entity);
    });
    outcome?;

    emitln!(b, "end");
    Ok(b.into_string())
}

/// Emits plain fields and oneof blocks, recursing into nested oneofs.
fn emit_members(
    b: &mut SourceBuilder,
    resolver: &mut TypeResolver<'_, RubySyntax>,
    members: &[Member],
    entity: &str,
) -> Result<()> {
    for member in members {
        match member {
            Member::Field(field) => {
                let declaration =
                    field_declaration(resolver, field, &format!("{entity}.{}", field.name))?;
                emitln!(b, "{declaration}");
            }
            Member::OneOf(oneof) => {
                emitln!(b, "oneof({}) do", oneof.index);
                let mut nested = Ok(());
                b.indent(|b| nested = emit_members(b, resolver, &oneof.items, entity));
                nested?;
                emitln!(b, "end");
            }
            other => {
                return Err(Error::UnexpectedType {
                    entity: entity.to_string(),
                    found: format!("{other:?}"),
                });
            }
        }
    }
    Ok(())
}

fn client_params(method: &Method) -> &'static str {
    match (method.accepts_void(), method.is_streamed()) {
        (true, false) => "headers = {}",
        (false, false) => "req, headers = {}",
        (true, true) => "headers = {}, &block",
        (false, true) => "req, headers = {}, &block",
    }
}

fn service_classes(
    resolver: &mut TypeResolver<'_, RubySyntax>,
    set: &FileSet,
    service: &Service,
    streamers: &mut StreamerSet,
) -> String {
    let package = set.package();
    let name = titleize(&service.name);
    tracing::debug!("Emitting Ruby client and server for {}.{}", package, name);

    let mut b = SourceBuilder::with_indent_unit(INDENT);

    for line in &service.comments {
        emitln!(b, "# {line}");
    }
    emitln!(b, "class {name}Client < Yarp::Client");
    b.indent(|b| {
        for (i, method) in service.methods.iter().enumerate() {
            if i > 0 {
                emitln!(b);
            }
            let ruby_name = camel_to_snake(&method.name);
            let id = method_id(package, &service.name, &method.name);
            let req = if method.accepts_void() { "nil" } else { "req" };

            for line in &method.comments {
                emitln!(b, "# {line}");
            }
            emitln!(b, "def {ruby_name}({})", client_params(method));
            b.indent(|b| {
                if method.is_streamed() {
                    let ret = resolver.reference(&method.return_type);
                    let args = if method.accepts_void() {
                        "headers"
                    } else {
                        "req, headers"
                    };
                    emitln!(b, "return enum_for(:{ruby_name}, {args}) unless block");
                    emitln!(b);
                    emitln!(b, "request_streamed({id}, {req}, headers) do |value|");
                    b.indent(|b| emitln!(b, "yield value if value.is_a?({ret})"));
                    emitln!(b, "end");
                } else if method.returns_void() {
                    emitln!(b, "_, meta = request({id}, {req}, headers)");
                    emitln!(b, "meta");
                } else {
                    let ret = resolver.reference(&method.return_type);
                    emitln!(b, "res, meta = request({id}, {req}, headers)");
                    emitln!(
                        b,
                        "raise Yarp::IncompatibleTypeError.new(received: res, wants: {ret}) \
                         unless res.is_a?({ret})"
                    );
                    emitln!(b);
                    emitln!(b, "[res, meta]");
                }
            });
            emitln!(b, "end");
        }
    });
    emitln!(b, "end");
    emitln!(b);

    for line in &service.comments {
        emitln!(b, "# {line}");
    }
    emitln!(b, "class {name}Server");
    b.indent(|b| {
        for method in &service.methods {
            let ruby_name = camel_to_snake(&method.name);
            let mut params = Vec::with_capacity(3);
            if !method.accepts_void() {
                params.push("req");
            }
            params.push("headers");
            if method.is_streamed() {
                let ret = resolver.reference(&method.return_type);
                streamers.register(&ret, streamer_class);
                params.push("out");
            }

            for line in &method.comments {
                emitln!(b, "# {line}");
            }
            emitln!(b, "def {ruby_name}({})", params.join(", "));
            b.indent(|b| {
                emitln!(
                    b,
                    "raise NotImplementedError, \"{name}Server#{ruby_name} is not implemented\""
                );
            });
            emitln!(b, "end");
            emitln!(b);
        }

        emitln!(b, "def self.register(server, impl)");
        b.indent(|b| {
            for method in &service.methods {
                emitln!(
                    b,
                    "server.register_handler({}, \"{package}.{}.{}\", impl.method(:{}))",
                    method_id(package, &service.name, &method.name),
                    service.name,
                    method.name,
                    camel_to_snake(&method.name)
                );
            }
        });
        emitln!(b, "end");
    });
    emitln!(b, "end");

    b.into_string()
}

fn streamer_classes(streamers: &StreamerSet) -> String {
    let mut b = SourceBuilder::with_indent_unit(INDENT);
    for (i, (class, target)) in streamers.sorted().into_iter().enumerate() {
        if i > 0 {
            emitln!(b);
        }
        emitln!(b, "# Sink for streamed {target} responses.");
        emitln!(b, "class {class}");
        b.indent(|b| {
            emitln!(b, "attr_reader :headers");
            emitln!(b);
            emitln!(b, "def initialize(headers, sink)");
            b.indent(|b| {
                emitln!(b, "@headers = headers");
                emitln!(b, "@sink = sink");
            });
            emitln!(b, "end");
            emitln!(b);
            emitln!(b, "def push(value)");
            b.indent(|b| emitln!(b, "@sink << value"));
            emitln!(b, "end");
        });
        emitln!(b, "end");
    }
    b.into_string()
}
