//! Go backend.
//!
//! Emits one aggregated `<package>.yarp.go` file per model. Its layout,
//! top to bottom:
//!
//! 1. generated-code header and `package` clause,
//! 2. the import block, limited to what the body actually references,
//! 3. `RegisterMessages()`, registering every structure with the runtime,
//! 4. one struct per message with its identity methods,
//! 5. client and server interfaces per service,
//! 6. client constructors and implementations,
//! 7. `Register<Service>` glue binding handlers to method identifiers,
//! 8. streamer helper types, one per streamed response type.
//!
//! The buffer is normalized and checked by [`format_source`] before it is
//! returned.

use crate::backend::Backend;
use crate::common::builder::SourceBuilder;
use crate::common::id::{message_id, method_id};
use crate::common::naming::{snake_to_camel, titleize};
use crate::common::resolver::{TypeResolver, import_alias};
use crate::common::streamers::StreamerSet;
use crate::common::types::{GeneratedCode, GeneratedFile, GenerationOutput};
use crate::emitln;
use crate::golang::format::format_source;
use crate::golang::types::{GoSyntax, streamer_name};
use yarpc_core::{
    Error, FileSet, GeneratorConfig, ImportProviders, Member, Message, Method, Result, Service,
};

/// Import path of the yarp Go runtime.
pub const RUNTIME_IMPORT: &str = "github.com/libyarp/yarp";

/// Capacity of the channel handed to callers of streamed methods.
const STREAM_BUFFER: usize = 10;

const HEADER: &str = "// Code generated by yarpc. DO NOT EDIT.";

/// Go code generator.
///
/// # Examples
///
/// ```
/// use yarpc_codegen::{Backend, golang::GoBackend};
/// use yarpc_core::{FileSet, ImportProviders, Method, Service};
///
/// let mut set = FileSet::new("acme.shop");
/// set.services.push(Service::new("health").with_method(Method::new("ping", "void", "void")));
///
/// let output = GoBackend::new().generate(&set, &ImportProviders::new()).unwrap();
/// let file = &output.code.files[0];
/// assert_eq!(file.path, "shop.yarp.go");
/// assert!(file.content.starts_with("// Code generated by yarpc. DO NOT EDIT.\n\npackage shop\n"));
/// assert!(file.content.contains("Ping(ctx context.Context, optHeaders map[string]string) (yarp.Header, error)"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoBackend {
    package: Option<String>,
}

impl GoBackend {
    /// Creates a backend deriving the Go package from the model package.
    #[must_use]
    pub const fn new() -> Self {
        Self { package: None }
    }

    /// Overrides the emitted Go package name.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Creates a backend from generator configuration.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            package: config.package.clone(),
        }
    }

    /// Go package name for `set`: the override, or the last segment of the
    /// model package.
    fn package_name(&self, set: &FileSet) -> Result<String> {
        let name = match &self.package {
            Some(explicit) => explicit.trim().to_string(),
            None => set
                .package()
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_string(),
        };
        if name.is_empty() {
            return Err(Error::ConfigError {
                message: "cannot derive a Go package name from an empty model package; \
                          set one explicitly"
                    .to_string(),
            });
        }
        Ok(name)
    }
}

impl Backend for GoBackend {
    fn language(&self) -> &'static str {
        "go"
    }

    fn generate(&self, set: &FileSet, providers: &ImportProviders) -> Result<GenerationOutput> {
        let package = self.package_name(set)?;
        tracing::info!(
            "Generating Go package '{}' from '{}' ({} messages, {} services)",
            package,
            set.package(),
            set.messages.len(),
            set.services.len()
        );

        let mut emitter = GoEmitter::new(set, providers);
        let body = emitter.body()?;

        let mut file = SourceBuilder::new();
        emitln!(file, "{HEADER}");
        emitln!(file);
        emitln!(file, "package {package}");
        emitln!(file);
        emitter.imports(&mut file);
        emitter.register_messages(&mut file);
        file.absorb(&body);

        let used = emitter.resolver.into_used();
        let content = format_source(file.as_str())?;

        let mut code = GeneratedCode::new();
        code.add_file(GeneratedFile {
            path: format!("{package}.yarp.go"),
            content,
        });

        Ok(GenerationOutput::new(code, providers, used))
    }
}

/// Per-invocation emission state.
struct GoEmitter<'a> {
    set: &'a FileSet,
    providers: &'a ImportProviders,
    resolver: TypeResolver<'a, GoSyntax>,
    streamers: StreamerSet,
}

impl<'a> GoEmitter<'a> {
    fn new(set: &'a FileSet, providers: &'a ImportProviders) -> Self {
        Self {
            set,
            providers,
            resolver: TypeResolver::new(set, providers, GoSyntax),
            streamers: StreamerSet::new(),
        }
    }

    fn body(&mut self) -> Result<SourceBuilder> {
        let set = self.set;
        let mut b = SourceBuilder::new();

        for message in &set.messages {
            self.message(&mut b, message)?;
        }
        for service in &set.services {
            self.interfaces(&mut b, service);
        }
        for service in &set.services {
            self.client(&mut b, service);
        }
        for service in &set.services {
            self.registration(&mut b, service);
        }
        self.streamer_types(&mut b);

        Ok(b)
    }

    fn imports(&self, b: &mut SourceBuilder) {
        let has_services = !self.set.services.is_empty();
        let has_methods = self.set.services.iter().any(|s| !s.methods.is_empty());
        let needs_reflect = self
            .set
            .services
            .iter()
            .flat_map(|s| &s.methods)
            .any(|m| !m.returns_void() && !m.is_streamed());

        let mut standard = Vec::new();
        if has_methods {
            standard.push("context");
        }
        if needs_reflect {
            standard.push("reflect");
        }

        let mut external = Vec::new();
        if has_services || !self.set.messages.is_empty() {
            external.push(format!("\"{RUNTIME_IMPORT}\""));
        }
        for package in self.resolver.used() {
            if let Some(location) = self.providers.get(package) {
                external.push(format!("{} \"{location}\"", import_alias(location)));
            }
        }

        if standard.is_empty() && external.is_empty() {
            return;
        }

        emitln!(b, "import (");
        b.indent(|b| {
            for path in &standard {
                emitln!(b, "\"{path}\"");
            }
            if !standard.is_empty() && !external.is_empty() {
                emitln!(b);
            }
            for line in &external {
                emitln!(b, "{line}");
            }
        });
        emitln!(b, ")");
        emitln!(b);
    }

    fn register_messages(&self, b: &mut SourceBuilder) {
        if self.set.messages.is_empty() {
            return;
        }
        let items: Vec<String> = self
            .set
            .messages
            .iter()
            .map(|m| format!("{}{{}}", titleize(&m.name)))
            .collect();

        emitln!(b, "func RegisterMessages() {{");
        b.indent(|b| emitln!(b, "yarp.RegisterStructType({})", items.join(", ")));
        emitln!(b, "}}");
        emitln!(b);
    }

    fn message(&mut self, b: &mut SourceBuilder, message: &Message) -> Result<()> {
        let set = self.set;
        let package = set.package();
        let name = titleize(&message.name);
        tracing::debug!("Emitting Go struct {}.{}", package, name);

        for line in &message.comments {
            emitln!(b, "// {line}");
        }
        emitln!(b, "type {name} struct {{");
        let mut fields = Vec::with_capacity(message.fields.len());
        for member in &message.fields {
            match member {
                Member::Field(field) => {
                    let entity = format!("{package}.{}.{}", message.name, field.name);
                    let ty = self.resolver.field_type(field, &entity)?;
                    fields.push(format!(
                        "{} {ty} `index:\"{}\"`",
                        snake_to_camel(&field.name),
                        field.index
                    ));
                }
                Member::OneOf(oneof) => {
                    tracing::debug!(
                        "Skipping oneof #{} of {}.{}: not represented as struct fields",
                        oneof.index,
                        package,
                        message.name
                    );
                }
                other => {
                    return Err(Error::UnexpectedType {
                        entity: format!("{package}.{}", message.name),
                        found: format!("{other:?}"),
                    });
                }
            }
        }
        b.indent(|b| {
            emitln!(b, "*yarp.Structure");
            for field in &fields {
                emitln!(b, "{field}");
            }
        });
        emitln!(b, "}}");
        emitln!(b);

        let id = message_id(package, &message.name);
        emitln!(b, "func ({name}) YarpID() uint64 {{ return {id} }}");
        emitln!(b, "func ({name}) YarpPackage() string {{ return \"{package}\" }}");
        emitln!(
            b,
            "func ({name}) YarpStructName() string {{ return \"{}\" }}",
            message.name
        );
        emitln!(b);
        Ok(())
    }

    fn interfaces(&mut self, b: &mut SourceBuilder, service: &Service) {
        let name = titleize(&service.name);
        tracing::debug!("Emitting Go interfaces for service {}", name);

        let client: Vec<(&Method, String)> = service
            .methods
            .iter()
            .map(|m| (m, self.client_signature(m)))
            .collect();
        let server: Vec<(&Method, String)> = service
            .methods
            .iter()
            .map(|m| (m, self.server_signature(m)))
            .collect();

        for (kind, signatures) in [("Client", client), ("Server", server)] {
            for line in &service.comments {
                emitln!(b, "// {line}");
            }
            emitln!(b, "type {name}{kind} interface {{");
            b.indent(|b| {
                for (method, signature) in &signatures {
                    for line in &method.comments {
                        emitln!(b, "// {line}");
                    }
                    emitln!(b, "{signature}");
                }
            });
            emitln!(b, "}}");
            emitln!(b);
        }
    }

    fn client_signature(&mut self, method: &Method) -> String {
        let args = if method.accepts_void() {
            "ctx context.Context, optHeaders map[string]string".to_string()
        } else {
            format!(
                "ctx context.Context, req *{}, optHeaders map[string]string",
                self.resolver.reference(&method.argument_type)
            )
        };

        let returns = if method.returns_void() {
            "(yarp.Header, error)".to_string()
        } else {
            let ret = self.resolver.reference(&method.return_type);
            let chan = if method.is_streamed() { "<-chan " } else { "" };
            format!("({chan}*{ret}, yarp.Header, error)")
        };

        format!("{}({args}) {returns}", snake_to_camel(&method.name))
    }

    fn server_signature(&mut self, method: &Method) -> String {
        let mut args = vec![
            "ctx context.Context".to_string(),
            "headers yarp.Header".to_string(),
        ];
        if !method.accepts_void() {
            args.push(format!(
                "req *{}",
                self.resolver.reference(&method.argument_type)
            ));
        }

        let returns = if method.is_streamed() {
            let ret = self.resolver.reference(&method.return_type);
            let streamer = self.streamers.register(&ret, streamer_name);
            args.push(format!("out *{streamer}"));
            "error".to_string()
        } else if method.returns_void() {
            "(yarp.Header, error)".to_string()
        } else {
            format!(
                "(yarp.Header, *{}, error)",
                self.resolver.reference(&method.return_type)
            )
        };

        format!(
            "{}({}) {returns}",
            snake_to_camel(&method.name),
            args.join(", ")
        )
    }

    fn client(&mut self, b: &mut SourceBuilder, service: &Service) {
        let set = self.set;
        let name = titleize(&service.name);
        let package = set.package();

        emitln!(
            b,
            "func New{name}Client(addr string, opts ...yarp.Option) {name}Client {{"
        );
        b.indent(|b| emitln!(b, "return &_yarpClient{name}{{c: yarp.NewClient(addr, opts...)}}"));
        emitln!(b, "}}");
        emitln!(b);
        emitln!(b, "type _yarpClient{name} struct {{");
        b.indent(|b| emitln!(b, "c *yarp.Client"));
        emitln!(b, "}}");
        emitln!(b);

        for method in &service.methods {
            let signature = self.client_signature(method);
            let ret = self.resolver.reference(&method.return_type);
            let req = if method.accepts_void() { "nil" } else { "req" };
            let id = method_id(package, &service.name, &method.name);

            emitln!(b, "func (cli *_yarpClient{name}) {signature} {{");
            b.indent(|b| {
                emitln!(b, "request := yarp.Request{{");
                b.indent(|b| {
                    emitln!(b, "Method:  {id},");
                    emitln!(b, "Headers: optHeaders,");
                });
                emitln!(b, "}}");
                emitln!(b);

                if method.is_streamed() {
                    emitln!(
                        b,
                        "res, headers, err := cli.c.DoRequestStreamed(ctx, request, {req})"
                    );
                    emitln!(b, "if err != nil {{");
                    b.indent(|b| emitln!(b, "return nil, nil, err"));
                    emitln!(b, "}}");
                    emitln!(b, "ch := make(chan *{ret}, {STREAM_BUFFER})");
                    emitln!(b, "go func() {{");
                    b.indent(|b| {
                        emitln!(b, "defer close(ch)");
                        emitln!(b, "for i := range res {{");
                        b.indent(|b| {
                            emitln!(b, "if v, ok := i.(*{ret}); ok {{");
                            b.indent(|b| emitln!(b, "ch <- v"));
                            emitln!(b, "}}");
                        });
                        emitln!(b, "}}");
                    });
                    emitln!(b, "}}()");
                    emitln!(b, "return ch, headers, nil");
                } else if method.returns_void() {
                    emitln!(b, "_, headers, err := cli.c.DoRequest(ctx, request, {req})");
                    emitln!(b, "if err != nil {{");
                    b.indent(|b| emitln!(b, "return nil, err"));
                    emitln!(b, "}}");
                    emitln!(b, "return headers, nil");
                } else {
                    emitln!(b, "res, headers, err := cli.c.DoRequest(ctx, request, {req})");
                    emitln!(b, "if err != nil {{");
                    b.indent(|b| emitln!(b, "return nil, nil, err"));
                    emitln!(b, "}}");
                    emitln!(b, "if t, ok := res.(*{ret}); ok {{");
                    b.indent(|b| emitln!(b, "return t, headers, nil"));
                    emitln!(b, "}}");
                    emitln!(b, "return nil, nil, yarp.IncompatibleTypeError{{");
                    b.indent(|b| {
                        emitln!(b, "Received: res,");
                        emitln!(b, "Wants:    reflect.TypeOf(&{ret}{{}}),");
                    });
                    emitln!(b, "}}");
                }
            });
            emitln!(b, "}}");
            emitln!(b);
        }
    }

    fn registration(&self, b: &mut SourceBuilder, service: &Service) {
        let name = titleize(&service.name);
        let package = self.set.package();

        emitln!(b, "func Register{name}(s *yarp.Server, v {name}Server) {{");
        b.indent(|b| {
            for method in &service.methods {
                emitln!(
                    b,
                    "s.RegisterHandler({}, \"{package}.{}.{}\", v.{})",
                    method_id(package, &service.name, &method.name),
                    service.name,
                    method.name,
                    snake_to_camel(&method.name)
                );
            }
        });
        emitln!(b, "}}");
        emitln!(b);
    }

    fn streamer_types(&self, b: &mut SourceBuilder) {
        for (streamer, target) in self.streamers.sorted() {
            emitln!(b, "type {streamer} struct {{");
            b.indent(|b| {
                emitln!(b, "h  yarp.Header");
                emitln!(b, "ch chan<- *{target}");
            });
            emitln!(b, "}}");
            emitln!(b);
            emitln!(
                b,
                "func (i {streamer}) Headers() yarp.Header {{ return i.h }}"
            );
            emitln!(b, "func (i {streamer}) Push(v *{target}) {{ i.ch <- v }}");
            emitln!(b);
        }
    }
}
