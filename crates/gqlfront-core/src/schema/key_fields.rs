//! Cache identity data derived from `@typePolicy`.
//!
//! `keyFields` names the fields whose values identify an object; a type with
//! none of its own inherits them from its interfaces. `connectionFields`
//! names fields returning paginated connections.

use crate::Schema;
use gqlfront_parser::ast;
use gqlfront_parser::GraphQLParser;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::SourceLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::collections::HashSet;

/// The `@typePolicy` applied to `definition`, whatever local name it was
/// linked under.
fn type_policy<'s>(schema: &Schema, definition: &'s ast::TypeDefinition) -> Option<&'s ast::Directive> {
    definition
        .directives()
        .iter()
        .find(|directive| schema.canonical_name(&format!("@{}", directive.name)) == "@typePolicy")
}

fn string_argument<'s>(directive: &'s ast::Directive, name: &str) -> &'s str {
    match directive.argument(name).map(|argument| &argument.value) {
        Some(ast::Value::String(value)) => value.value.as_str(),
        _ => "",
    }
}

/// Parses a field set such as `"id"` or `"{ id version }"` into field names.
fn parse_field_names(source: &str) -> Result<Vec<String>, String> {
    let (selections, issues) = GraphQLParser::new(source).parse_selections().into_parts();
    let Some(selections) = selections else {
        return Err(issues
            .first()
            .map(|issue| issue.message().to_string())
            .unwrap_or_default());
    };
    selections
        .into_iter()
        .map(|selection| match selection {
            ast::Selection::Field(field)
                if field.alias.is_none()
                    && field.arguments.is_empty()
                    && field.directives.is_empty()
                    && field.selections.is_empty() =>
            {
                Ok(field.name)
            },
            _ => Err("only plain field names are allowed".to_string()),
        })
        .collect()
}

// =============================================================================
// Key fields
// =============================================================================

struct DeclaredKeys<'s> {
    fields: Vec<String>,
    location: Option<&'s SourceLocation>,
}

struct KeyFieldsResolver<'s, 'i> {
    schema: &'s Schema,
    declared: IndexMap<&'s str, DeclaredKeys<'s>>,
    resolved: IndexMap<String, Vec<String>>,
    in_progress: HashSet<&'s str>,
    issues: &'i mut Vec<Issue>,
}

pub(super) fn compute_key_fields(schema: &Schema, issues: &mut Vec<Issue>) -> IndexMap<String, Vec<String>> {
    let mut declared = IndexMap::new();
    for definition in schema.type_definitions() {
        let Some(policy) = type_policy(schema, definition) else {
            continue;
        };
        let source = string_argument(policy, "keyFields");
        if source.trim().is_empty() {
            continue;
        }
        let location = policy.source_location.as_ref();
        let invalid = |message: String| Issue::new(IssueKind::InvalidKeyFields, message, location.cloned());
        let fields = match parse_field_names(source) {
            Ok(fields) => fields,
            Err(reason) => {
                issues.push(invalid(format!(
                    "invalid `keyFields` on `{}`: {reason}",
                    definition.name(),
                )));
                continue;
            },
        };

        let mut valid = true;
        if definition.fields().is_some() {
            for field_name in &fields {
                let Some(field) = definition.field(field_name) else {
                    issues.push(invalid(format!("`{}` has no key field `{field_name}`", definition.name())));
                    valid = false;
                    continue;
                };
                let is_leaf = schema
                    .type_definition(field.field_type.innermost_name())
                    .is_some_and(ast::TypeDefinition::is_leaf);
                if !is_leaf {
                    issues.push(invalid(format!(
                        "key field `{}.{field_name}` must be a scalar or enum field",
                        definition.name(),
                    )));
                    valid = false;
                }
            }
        }
        if valid {
            declared.insert(definition.name(), DeclaredKeys { fields, location });
        }
    }

    let mut resolver = KeyFieldsResolver {
        schema,
        declared,
        resolved: IndexMap::new(),
        in_progress: HashSet::new(),
        issues,
    };
    for definition in schema.type_definitions() {
        if definition.is_composite() {
            resolver.resolve(definition.name());
        }
    }

    let mut key_fields = resolver.resolved;
    key_fields.retain(|_, fields| !fields.is_empty());
    log::debug!("{} types have key fields", key_fields.len());
    key_fields
}

impl<'s> KeyFieldsResolver<'s, '_> {
    fn resolve(&mut self, type_name: &'s str) -> Vec<String> {
        if let Some(fields) = self.resolved.get(type_name) {
            return fields.clone();
        }
        // A cycle through `implements` is reported by schema validation.
        if !self.in_progress.insert(type_name) {
            return Vec::new();
        }
        let Some(definition) = self.schema.type_definition(type_name) else {
            return Vec::new();
        };

        let mut inherited: Vec<(&'s str, Vec<String>)> = Vec::new();
        for interface in definition.implements_interfaces() {
            let fields = self.resolve(interface);
            if !fields.is_empty() {
                inherited.push((interface.as_str(), fields));
            }
        }

        if let Some(((first_interface, first_fields), rest)) = inherited.split_first() {
            let first_set: HashSet<&String> = first_fields.iter().collect();
            for (interface, fields) in rest {
                if fields.iter().collect::<HashSet<_>>() != first_set {
                    self.issues.push(Issue::new(
                        IssueKind::InvalidKeyFields,
                        format!(
                            "`{type_name}` inherits different key fields from `{first_interface}` \
                             (`{}`) and `{interface}` (`{}`)",
                            first_fields.join(" "),
                            fields.join(" "),
                        ),
                        definition.source_location().cloned(),
                    ));
                }
            }
        }

        let fields = match self.declared.get(type_name) {
            Some(own) => {
                if let Some((interface, _)) = inherited.first() {
                    self.issues.push(Issue::new(
                        IssueKind::InvalidKeyFields,
                        format!(
                            "`{type_name}` cannot declare key fields because interface \
                             `{interface}` already declares them",
                        ),
                        own.location.cloned(),
                    ));
                }
                own.fields.clone()
            },
            None => inherited.into_iter().next().map(|(_, fields)| fields).unwrap_or_default(),
        };

        self.in_progress.remove(type_name);
        self.resolved.insert(type_name.to_string(), fields.clone());
        fields
    }
}

// =============================================================================
// Connection fields
// =============================================================================

pub(super) fn compute_connection_types(schema: &Schema, issues: &mut Vec<Issue>) -> IndexSet<String> {
    let mut connection_types = IndexSet::new();
    for definition in schema.type_definitions() {
        let Some(policy) = type_policy(schema, definition) else {
            continue;
        };
        let source = string_argument(policy, "connectionFields");
        if source.trim().is_empty() {
            continue;
        }
        let invalid = |message: String| {
            Issue::new(IssueKind::InvalidConnectionFields, message, policy.source_location.clone())
        };
        let field_names = match parse_field_names(source) {
            Ok(field_names) => field_names,
            Err(reason) => {
                issues.push(invalid(format!(
                    "invalid `connectionFields` on `{}`: {reason}",
                    definition.name(),
                )));
                continue;
            },
        };
        for field_name in field_names {
            match definition.field(&field_name) {
                Some(field) => {
                    connection_types.insert(field.field_type.innermost_name().to_string());
                },
                None => issues.push(invalid(format!(
                    "`{}` has no connection field `{field_name}`",
                    definition.name(),
                ))),
            }
        }
    }
    connection_types
}
