//! `@link` resolution: pulls foreign-schema definitions into a schema under
//! local names.
//!
//! ```graphql
//! extend schema @link(
//!   url: "https://example.com/cache/v0.1"
//!   import: ["@typePolicy", { name: "@fieldPolicy", as: "@policy" }]
//! )
//! ```
//!
//! Imported names keep their own name (or their `as:` alias). Everything
//! else the foreign schema defines is prefixed: `cache__Type` for types,
//! `@cache__nonnull` for directives, and plain `@cache` for a directive named
//! like the prefix itself.

use crate::foreign_schema::qualified_name;
use crate::ForeignSchema;
use gqlfront_parser::ast;
use gqlfront_parser::ast::Node;
use gqlfront_parser::ast::TransformResult;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::SourceLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Definitions contributed by every resolved `@link`.
#[derive(Debug, Default)]
pub(super) struct LinkedDefinitions {
    pub definitions: Vec<ast::Definition>,
    pub foreign_names: IndexMap<String, String>,
    pub directives_to_strip: Vec<String>,

    /// `name/version` of each foreign schema that was linked.
    pub linked_schemas: IndexSet<String>,
}

struct Import {
    name: String,
    alias: Option<String>,
    location: Option<SourceLocation>,
}

struct Link<'a> {
    url: &'a str,
    prefix: Option<&'a str>,
    imports: Vec<Import>,
    location: Option<SourceLocation>,
}

pub(super) fn resolve_links(
    definitions: &[ast::Definition],
    foreign_schemas: &[ForeignSchema],
    issues: &mut Vec<Issue>,
) -> LinkedDefinitions {
    let mut linked = LinkedDefinitions::default();

    let link_directives = definitions.iter().flat_map(|definition| match definition {
        ast::Definition::Schema(schema) => schema.directives.as_slice(),
        ast::Definition::SchemaExtension(extension) => extension.directives.as_slice(),
        _ => &[],
    });

    for directive in link_directives.filter(|directive| directive.name == "link") {
        let Some(link) = parse_link(directive, issues) else {
            continue;
        };
        let Some((name, version)) = name_and_version(link.url) else {
            log::debug!("ignoring `@link` with unrecognized url `{}`", link.url);
            continue;
        };
        let Some(foreign) = foreign_schemas
            .iter()
            .find(|schema| schema.name == name && schema.version == version)
        else {
            log::debug!("ignoring `@link` to unknown schema `{name}/{version}`");
            continue;
        };
        if !linked.linked_schemas.insert(format!("{name}/{version}")) {
            issues.push(Issue::new(
                IssueKind::InvalidLink,
                format!("`{name}/{version}` is linked more than once"),
                link.location.clone(),
            ));
            continue;
        }

        let prefix = link.prefix.unwrap_or(&foreign.name);
        let renames = rename_map(foreign, prefix, &link.imports, issues);
        log::debug!(
            "linked `{name}/{version}` under prefix `{prefix}` ({} definitions)",
            foreign.definitions.len(),
        );

        linked.definitions.extend(
            foreign
                .definitions
                .iter()
                .filter_map(|definition| rename_definition(definition, &renames)),
        );
        for stripped in &foreign.directives_to_strip {
            let canonical = format!("@{stripped}");
            let local = renames.get(&canonical).map(String::as_str).unwrap_or(&canonical);
            linked.directives_to_strip.push(local.trim_start_matches('@').to_string());
        }
        for (canonical, local) in renames {
            if canonical != local {
                linked.foreign_names.insert(local, canonical);
            }
        }
    }

    linked
}

/// Splits `https://host/.../<name>/<version>` into its last two segments.
fn name_and_version(url: &str) -> Option<(&str, &str)> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let version = segments.next()?;
    let name = segments.next()?;
    (!name.is_empty() && !version.is_empty()).then_some((name, version))
}

// =============================================================================
// Argument parsing
// =============================================================================

fn parse_link<'a>(directive: &'a ast::Directive, issues: &mut Vec<Issue>) -> Option<Link<'a>> {
    let location = directive.source_location.clone();
    let invalid = |message: &str| Issue::new(IssueKind::InvalidLink, message, location.clone());

    let url = match directive.argument("url").map(|argument| &argument.value) {
        Some(ast::Value::String(url)) => url.value.as_str(),
        Some(_) => {
            issues.push(invalid("`@link(url:)` must be a string"));
            return None;
        },
        None => {
            issues.push(invalid("`@link` requires a `url` argument"));
            return None;
        },
    };

    let prefix = match directive.argument("as").map(|argument| &argument.value) {
        None | Some(ast::Value::Null(_)) => None,
        Some(ast::Value::String(alias)) => Some(alias.value.as_str()),
        Some(_) => {
            issues.push(invalid("`@link(as:)` must be a string"));
            return None;
        },
    };

    let import_values: &[ast::Value] = match directive.argument("import").map(|argument| &argument.value) {
        None | Some(ast::Value::Null(_)) => &[],
        Some(ast::Value::List(list)) => &list.values,
        Some(single) => std::slice::from_ref(single),
    };
    let mut imports = Vec::with_capacity(import_values.len());
    for value in import_values {
        match parse_import(value) {
            Some(import) => imports.push(import),
            None => issues.push(Issue::new(
                IssueKind::InvalidLink,
                "a `@link` import must be a name or a `{ name: ..., as: ... }` object",
                value.source_location().cloned().or_else(|| location.clone()),
            )),
        }
    }

    Some(Link {
        url,
        prefix,
        imports,
        location,
    })
}

fn parse_import(value: &ast::Value) -> Option<Import> {
    match value {
        ast::Value::String(name) => Some(Import {
            name: name.value.clone(),
            alias: None,
            location: name.source_location.clone(),
        }),
        ast::Value::Object(object) => {
            let mut name = None;
            let mut alias = None;
            for field in &object.fields {
                match (field.name.as_str(), &field.value) {
                    ("name", ast::Value::String(value)) => name = Some(value.value.clone()),
                    ("as", ast::Value::String(value)) => alias = Some(value.value.clone()),
                    _ => return None,
                }
            }
            Some(Import {
                name: name?,
                alias,
                location: object.source_location.clone(),
            })
        },
        _ => None,
    }
}

// =============================================================================
// Renaming
// =============================================================================

/// Maps every name `foreign` defines (directives with their `@`) to its local
/// name.
fn rename_map(
    foreign: &ForeignSchema,
    prefix: &str,
    imports: &[Import],
    issues: &mut Vec<Issue>,
) -> HashMap<String, String> {
    let mut renames = HashMap::new();

    for import in imports {
        if !foreign.defines(&import.name) {
            issues.push(Issue::new(
                IssueKind::InvalidLink,
                format!(
                    "`{}` is not defined by `{}/{}`",
                    import.name, foreign.name, foreign.version,
                ),
                import.location.clone(),
            ));
            continue;
        }
        let is_directive = import.name.starts_with('@');
        let local = match &import.alias {
            None => import.name.clone(),
            Some(alias) if alias.starts_with('@') == is_directive => alias.clone(),
            Some(alias) if is_directive => format!("@{alias}"),
            Some(alias) => {
                issues.push(Issue::new(
                    IssueKind::InvalidLink,
                    format!("type `{}` cannot be imported as directive `{alias}`", import.name),
                    import.location.clone(),
                ));
                continue;
            },
        };
        renames.insert(import.name.clone(), local);
    }

    for name in foreign.definitions.iter().filter_map(qualified_name) {
        if renames.contains_key(&name) {
            continue;
        }
        let local = match name.strip_prefix('@') {
            Some(directive) if directive == prefix => format!("@{prefix}"),
            Some(directive) => format!("@{prefix}__{directive}"),
            None => format!("{prefix}__{name}"),
        };
        renames.insert(name, local);
    }

    renames
}

/// Rewrites every name in `definition` that appears in `renames`.
///
/// Runs children-first so that a renamed type definition is rebuilt around
/// fields whose types were already renamed.
fn rename_definition(
    definition: &ast::Definition,
    renames: &HashMap<String, String>,
) -> Option<ast::Definition> {
    let rename_type = |name: &str| renames.get(name).cloned();
    let rename_directive = |name: &str| {
        renames
            .get(&format!("@{name}"))
            .map(|local| local.trim_start_matches('@').to_string())
    };

    let mut renamer = |node: &Node| match node {
        Node::Type(ast::Type::Named(named)) => match rename_type(named.name.as_str()) {
            Some(name) => TransformResult::Replace(Node::Type(ast::Type::Named(ast::NamedType {
                name,
                source_location: named.source_location.clone(),
            }))),
            None => TransformResult::Continue,
        },
        Node::Directive(directive) => match rename_directive(directive.name.as_str()) {
            Some(name) => TransformResult::Replace(Node::Directive(ast::Directive {
                name,
                ..directive.clone()
            })),
            None => TransformResult::Continue,
        },
        Node::Definition(ast::Definition::Directive(directive)) => {
            match rename_directive(directive.name.as_str()) {
                Some(name) => TransformResult::Replace(Node::Definition(ast::Definition::Directive(
                    ast::DirectiveDefinition {
                        name,
                        ..directive.clone()
                    },
                ))),
                None => TransformResult::Continue,
            }
        },
        Node::Definition(ast::Definition::Type(type_definition)) => {
            TransformResult::Replace(Node::Definition(ast::Definition::Type(
                rename_type_definition(type_definition, renames),
            )))
        },
        _ => TransformResult::Continue,
    };

    match ast::transform_children_first(&Node::Definition(definition.clone()), &mut renamer) {
        Some(Node::Definition(renamed)) => Some(renamed),
        _ => None,
    }
}

/// Renames a type definition and the interfaces it implements, neither of
/// which are child nodes.
fn rename_type_definition(
    definition: &ast::TypeDefinition,
    renames: &HashMap<String, String>,
) -> ast::TypeDefinition {
    let renamed = |name: &String| renames.get(name).cloned().unwrap_or_else(|| name.clone());
    let renamed_all = |names: &[String]| names.iter().map(renamed).collect::<Vec<_>>();

    let mut definition = definition.clone();
    match &mut definition {
        ast::TypeDefinition::Enum(def) => def.name = renamed(&def.name),
        ast::TypeDefinition::InputObject(def) => def.name = renamed(&def.name),
        ast::TypeDefinition::Interface(def) => {
            def.name = renamed(&def.name);
            def.implements_interfaces = renamed_all(&def.implements_interfaces);
        },
        ast::TypeDefinition::Object(def) => {
            def.name = renamed(&def.name);
            def.implements_interfaces = renamed_all(&def.implements_interfaces);
        },
        ast::TypeDefinition::Scalar(def) => def.name = renamed(&def.name),
        ast::TypeDefinition::Union(def) => def.name = renamed(&def.name),
    }
    definition
}
