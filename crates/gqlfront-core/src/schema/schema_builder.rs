use crate::builtins::builtin_definitions;
use crate::schema::extensions::merge_schema_extensions;
use crate::schema::extensions::merge_type_extensions;
use crate::schema::key_fields::compute_connection_types;
use crate::schema::key_fields::compute_key_fields;
use crate::schema::link::resolve_links;
use crate::schema::schema_validator::SchemaValidator;
use crate::ForeignSchema;
use crate::Schema;
use gqlfront_parser::ast;
use gqlfront_parser::ast::OperationKind;
use gqlfront_parser::has_errors;
use gqlfront_parser::GraphQLParser;
use gqlfront_parser::GraphQLResult;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::ParserOptions;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Utility for building a [`Schema`].
///
/// Load any number of type-system documents, then call
/// [`build()`](Self::build) to merge extensions, resolve `@link`s, validate,
/// and derive cache metadata in one pass:
///
/// ```
/// use gqlfront_core::SchemaBuilder;
///
/// let result = SchemaBuilder::new()
///     .load_str(Some("base.graphql"), "type Query { me: User } type User { id: ID! }")
///     .load_str(Some("ext.graphql"), "extend type User { name: String }")
///     .build();
/// let schema = result.valid_value().unwrap();
/// assert!(schema.field_definition("User", "name").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    definitions: Vec<ast::Definition>,
    load_issues: Vec<Issue>,
    include_builtin_definitions: bool,
    include_cache_policy_definitions: bool,
    foreign_schemas: Vec<ForeignSchema>,
    str_load_counter: usize,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            load_issues: Vec::new(),
            include_builtin_definitions: true,
            include_cache_policy_definitions: true,
            foreign_schemas: vec![ForeignSchema::cache_policy()],
            str_load_counter: 0,
        }
    }

    /// Whether to inject the builtin scalars, directives, and introspection
    /// types. On by default.
    pub fn include_builtin_definitions(mut self, include: bool) -> Self {
        self.include_builtin_definitions = include;
        self
    }

    /// Whether to inject the `cache/v0.1` directives unprefixed when no
    /// `@link` pulls them in explicitly. On by default.
    pub fn include_cache_policy_definitions(mut self, include: bool) -> Self {
        self.include_cache_policy_definitions = include;
        self
    }

    /// Makes `foreign_schema` available to `@link`.
    pub fn add_foreign_schema(mut self, foreign_schema: ForeignSchema) -> Self {
        self.foreign_schemas.push(foreign_schema);
        self
    }

    /// Parses `source` and queues its definitions. Parse errors are reported
    /// by [`build()`](Self::build).
    ///
    /// Sources loaded without a `file_path` are labeled `str://0`,
    /// `str://1`, and so on.
    pub fn load_str(mut self, file_path: Option<&str>, source: &str) -> Self {
        let file_path = match file_path {
            Some(file_path) => file_path.to_string(),
            None => {
                let counter = self.str_load_counter;
                self.str_load_counter += 1;
                format!("str://{counter}")
            },
        };
        let options = ParserOptions::new().file_path(file_path.as_str());
        let (document, issues) = GraphQLParser::with_options(source, options)
            .parse_document()
            .into_parts();
        log::debug!("parsed `{file_path}` with {} issue(s)", issues.len());
        self.load_issues.extend(issues);
        match document {
            Some(document) => self.load_document(document),
            None => self,
        }
    }

    /// Queues the type-system definitions of an already parsed document.
    /// Operations and fragments are ignored.
    pub fn load_document(mut self, document: ast::Document) -> Self {
        self.definitions.extend(
            document
                .definitions
                .into_iter()
                .filter(|definition| !definition.is_executable()),
        );
        self
    }

    pub fn build(self) -> GraphQLResult<Schema> {
        let Self {
            definitions,
            load_issues: mut issues,
            include_builtin_definitions,
            include_cache_policy_definitions,
            foreign_schemas,
            str_load_counter: _,
        } = self;

        if has_errors(&issues) {
            return GraphQLResult::failure(issues);
        }

        let linked = resolve_links(&definitions, &foreign_schemas, &mut issues);
        let mut directives_to_strip = linked.directives_to_strip;
        let mut injected = Vec::new();
        if include_builtin_definitions {
            injected.extend_from_slice(builtin_definitions());
        }
        injected.extend(linked.definitions);
        let cache_is_linked = linked.linked_schemas.iter().any(|name| name.starts_with("cache/"));
        if include_cache_policy_definitions && !cache_is_linked {
            let cache_policy = ForeignSchema::cache_policy();
            injected.extend(cache_policy.definitions);
            directives_to_strip.extend(cache_policy.directives_to_strip);
        }

        let mut partition = Partition::default();
        for definition in injected {
            partition.add(definition, Origin::Builtin, &mut issues);
        }
        for definition in definitions {
            partition.add(definition, Origin::User, &mut issues);
        }
        log::debug!(
            "collected {} types, {} directives, {} type extensions",
            partition.type_definitions.len(),
            partition.directive_definitions.len(),
            partition.type_extensions.len(),
        );

        let mut builtin_names: IndexSet<String> = partition
            .type_definitions
            .iter()
            .filter(|(_, (_, origin))| *origin == Origin::Builtin)
            .map(|(name, _)| name.clone())
            .collect();
        builtin_names.extend(
            partition
                .directive_definitions
                .iter()
                .filter(|(_, (_, origin))| *origin == Origin::Builtin)
                .map(|(name, _)| format!("@{name}")),
        );

        let mut type_definitions: IndexMap<String, ast::TypeDefinition> = partition
            .type_definitions
            .into_iter()
            .map(|(name, (definition, _))| (name, definition))
            .collect();
        let directive_definitions: IndexMap<String, ast::DirectiveDefinition> = partition
            .directive_definitions
            .into_iter()
            .map(|(name, (definition, _))| (name, definition))
            .collect();
        merge_type_extensions(&mut type_definitions, partition.type_extensions, &mut issues);

        let (mut schema_definition, schema_definition_is_implicit) = match partition.schema_definition {
            Some(schema_definition) => (schema_definition, false),
            None => {
                let declared_by_extensions: Vec<OperationKind> = partition
                    .schema_extensions
                    .iter()
                    .flat_map(|extension| &extension.root_operation_types)
                    .map(|root| root.operation_kind)
                    .collect();
                (implicit_schema_definition(&type_definitions, &declared_by_extensions), true)
            },
        };
        merge_schema_extensions(&mut schema_definition, partition.schema_extensions, &mut issues);

        let mut schema = Schema {
            schema_definition,
            schema_definition_is_implicit,
            type_definitions,
            directive_definitions,
            builtin_names,
            key_fields: IndexMap::new(),
            connection_types: IndexSet::new(),
            foreign_names: linked.foreign_names,
            directives_to_strip,
        };

        issues.extend(SchemaValidator::new(&schema).validate());
        schema.key_fields = compute_key_fields(&schema, &mut issues);
        schema.connection_types = compute_connection_types(&schema, &mut issues);

        if has_errors(&issues) {
            log::debug!("schema build failed with {} issue(s)", issues.len());
            GraphQLResult::failure(issues)
        } else {
            GraphQLResult::with_issues(schema, issues)
        }
    }
}

/// The conventional root types that exist as object types, minus any root an
/// `extend schema` will declare.
fn implicit_schema_definition(
    type_definitions: &IndexMap<String, ast::TypeDefinition>,
    declared_by_extensions: &[OperationKind],
) -> ast::SchemaDefinition {
    let root_operation_types = [OperationKind::Query, OperationKind::Mutation, OperationKind::Subscription]
        .into_iter()
        .filter(|kind| !declared_by_extensions.contains(kind))
        .filter_map(|kind| {
            let name = kind.default_root_type_name();
            matches!(type_definitions.get(name), Some(ast::TypeDefinition::Object(_))).then(|| {
                ast::OperationTypeDefinition {
                    operation_kind: kind,
                    named_type: name.to_string(),
                    source_location: None,
                }
            })
        })
        .collect();
    ast::SchemaDefinition {
        description: None,
        directives: Vec::new(),
        root_operation_types,
        source_location: None,
    }
}

// =============================================================================
// Definition partitioning
// =============================================================================

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Origin {
    /// Builtins, the default cache directives, and `@link`ed definitions.
    Builtin,
    User,
}

#[derive(Default)]
struct Partition {
    schema_definition: Option<ast::SchemaDefinition>,
    schema_extensions: Vec<ast::SchemaExtension>,
    type_definitions: IndexMap<String, (ast::TypeDefinition, Origin)>,
    directive_definitions: IndexMap<String, (ast::DirectiveDefinition, Origin)>,
    type_extensions: Vec<ast::TypeExtension>,
}

impl Partition {
    fn add(&mut self, definition: ast::Definition, origin: Origin, issues: &mut Vec<Issue>) {
        match definition {
            ast::Definition::Schema(schema_definition) => match &self.schema_definition {
                Some(first) => issues.push(duplicate(
                    "the schema is defined more than once".to_string(),
                    schema_definition.source_location,
                    first.source_location.clone(),
                )),
                None => self.schema_definition = Some(schema_definition),
            },
            ast::Definition::SchemaExtension(extension) => self.schema_extensions.push(extension),
            ast::Definition::Directive(directive) => {
                match self.directive_definitions.get(&directive.name) {
                    Some((builtin, Origin::Builtin)) if origin == Origin::User => {
                        issues.push(Issue::with_notes(
                            IssueKind::DirectiveRedefinition,
                            format!("directive `@{}` redefines a builtin directive", directive.name),
                            directive.source_location.clone(),
                            smallvec![IssueNote::general_at(
                                "builtin definition",
                                builtin.source_location.clone(),
                            )],
                        ));
                        self.directive_definitions.insert(directive.name.clone(), (directive, origin));
                    },
                    Some((first, _)) => issues.push(duplicate(
                        format!("directive `@{}` is defined more than once", directive.name),
                        directive.source_location,
                        first.source_location.clone(),
                    )),
                    None => {
                        self.directive_definitions.insert(directive.name.clone(), (directive, origin));
                    },
                }
            },
            ast::Definition::Type(type_definition) => {
                let name = type_definition.name().to_string();
                match self.type_definitions.get(&name) {
                    Some((_, Origin::Builtin)) if origin == Origin::User => {
                        log::trace!("`{name}` replaces the builtin definition");
                        self.type_definitions.insert(name, (type_definition, origin));
                    },
                    Some((first, _)) => issues.push(duplicate(
                        format!("type `{name}` is defined more than once"),
                        type_definition.source_location().cloned(),
                        first.source_location().cloned(),
                    )),
                    None => {
                        self.type_definitions.insert(name, (type_definition, origin));
                    },
                }
            },
            ast::Definition::TypeExtension(extension) => self.type_extensions.push(extension),
            ast::Definition::Operation(_) | ast::Definition::Fragment(_) => (),
        }
    }
}

fn duplicate(message: String, location: Option<SourceLocation>, first: Option<SourceLocation>) -> Issue {
    Issue::with_notes(
        IssueKind::DuplicateDefinition,
        message,
        location,
        smallvec![IssueNote::general_at("first defined here", first)],
    )
}
