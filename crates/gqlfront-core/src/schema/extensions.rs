//! Folding `extend ...` definitions into their base definitions.

use super::schema_validator::with_article;
use gqlfront_parser::ast;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use indexmap::IndexMap;

pub(super) fn merge_schema_extensions(
    schema: &mut ast::SchemaDefinition,
    extensions: Vec<ast::SchemaExtension>,
    issues: &mut Vec<Issue>,
) {
    for extension in extensions {
        schema.directives.extend(extension.directives);
        for root in extension.root_operation_types {
            let existing = schema
                .root_operation_types
                .iter()
                .find(|existing| existing.operation_kind == root.operation_kind);
            match existing {
                Some(existing) => issues.push(Issue::with_notes(
                    IssueKind::InvalidExtension,
                    format!("the `{}` root type is already defined", root.operation_kind),
                    root.source_location.clone(),
                    smallvec![IssueNote::general_at(
                        "first defined here",
                        existing.source_location.clone(),
                    )],
                )),
                None => schema.root_operation_types.push(root),
            }
        }
    }
}

pub(super) fn merge_type_extensions(
    type_definitions: &mut IndexMap<String, ast::TypeDefinition>,
    extensions: Vec<ast::TypeExtension>,
    issues: &mut Vec<Issue>,
) {
    for extension in extensions {
        let Some(base) = type_definitions.get_mut(extension.name()) else {
            issues.push(Issue::new(
                IssueKind::InvalidExtension,
                format!("cannot extend undefined type `{}`", extension.name()),
                extension.source_location().cloned(),
            ));
            continue;
        };
        log::trace!("merging {} extension of `{}`", extension.kind_name(), extension.name());
        merge_type_extension(base, extension, issues);
    }
}

fn merge_type_extension(
    base: &mut ast::TypeDefinition,
    extension: ast::TypeExtension,
    issues: &mut Vec<Issue>,
) {
    let type_name = base.name().to_string();
    let mismatch = |extension: &ast::TypeExtension, base: &ast::TypeDefinition| {
        Issue::new(
            IssueKind::InvalidExtension,
            format!(
                "`{type_name}` is {}, so it cannot be extended as {}",
                with_article(base.kind_name()),
                with_article(extension.kind_name()),
            ),
            extension.source_location().cloned(),
        )
    };

    match (base, extension) {
        (ast::TypeDefinition::Object(base), ast::TypeExtension::Object(extension)) => {
            merge_interfaces(
                &type_name,
                &mut base.implements_interfaces,
                extension.implements_interfaces,
                extension.source_location.as_ref(),
                issues,
            );
            base.directives.extend(extension.directives);
            merge_fields(&type_name, &mut base.fields, extension.fields, issues);
        },
        (ast::TypeDefinition::Interface(base), ast::TypeExtension::Interface(extension)) => {
            merge_interfaces(
                &type_name,
                &mut base.implements_interfaces,
                extension.implements_interfaces,
                extension.source_location.as_ref(),
                issues,
            );
            base.directives.extend(extension.directives);
            merge_fields(&type_name, &mut base.fields, extension.fields, issues);
        },
        (ast::TypeDefinition::Union(base), ast::TypeExtension::Union(extension)) => {
            base.directives.extend(extension.directives);
            merge_named(
                &mut base.member_types,
                extension.member_types,
                |member| &member.name,
                |member| member.source_location.as_ref(),
                |name| format!("`{name}` is already a member of union `{type_name}`"),
                issues,
            );
        },
        (ast::TypeDefinition::Enum(base), ast::TypeExtension::Enum(extension)) => {
            base.directives.extend(extension.directives);
            merge_named(
                &mut base.values,
                extension.values,
                |value| &value.name,
                |value| value.source_location.as_ref(),
                |name| format!("enum value `{type_name}.{name}` is defined more than once"),
                issues,
            );
        },
        (ast::TypeDefinition::InputObject(base), ast::TypeExtension::InputObject(extension)) => {
            base.directives.extend(extension.directives);
            merge_named(
                &mut base.fields,
                extension.fields,
                |field| &field.name,
                |field| field.source_location.as_ref(),
                |name| format!("input field `{type_name}.{name}` is defined more than once"),
                issues,
            );
        },
        (ast::TypeDefinition::Scalar(base), ast::TypeExtension::Scalar(extension)) => {
            base.directives.extend(extension.directives);
        },
        (base, extension) => issues.push(mismatch(&extension, base)),
    }
}

fn merge_fields(
    type_name: &str,
    fields: &mut Vec<ast::FieldDefinition>,
    additions: Vec<ast::FieldDefinition>,
    issues: &mut Vec<Issue>,
) {
    merge_named(
        fields,
        additions,
        |field| &field.name,
        |field| field.source_location.as_ref(),
        |name| format!("field `{type_name}.{name}` is defined more than once"),
        issues,
    );
}

fn merge_interfaces(
    type_name: &str,
    interfaces: &mut Vec<String>,
    additions: Vec<String>,
    location: Option<&SourceLocation>,
    issues: &mut Vec<Issue>,
) {
    for interface in additions {
        if interfaces.contains(&interface) {
            issues.push(Issue::new(
                IssueKind::InvalidExtension,
                format!("`{type_name}` already implements `{interface}`"),
                location.cloned(),
            ));
        } else {
            interfaces.push(interface);
        }
    }
}

/// Appends `additions` to `items`, reporting (and dropping) any whose name is
/// already taken.
fn merge_named<T>(
    items: &mut Vec<T>,
    additions: Vec<T>,
    name_of: impl Fn(&T) -> &String,
    location_of: impl Fn(&T) -> Option<&SourceLocation>,
    describe: impl Fn(&str) -> String,
    issues: &mut Vec<Issue>,
) {
    for addition in additions {
        let existing = items.iter().find(|item| name_of(*item) == name_of(&addition));
        match existing {
            Some(existing) => issues.push(Issue::with_notes(
                IssueKind::DuplicateDefinition,
                describe(name_of(&addition)),
                location_of(&addition).cloned(),
                smallvec![IssueNote::general_at(
                    "first defined here",
                    location_of(existing).cloned(),
                )],
            )),
            None => items.push(addition),
        }
    }
}
