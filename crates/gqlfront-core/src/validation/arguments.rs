//! Argument and directive-application checks shared by the schema validator
//! and the executable validator.

use crate::validation::ValueCoercer;
use gqlfront_parser::ast;
use gqlfront_parser::ast::DirectiveLocation;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use std::collections::HashMap;

/// Checks `arguments` against the `definitions` of the field or directive
/// described by `owner` (e.g. ``field `Query.hero` ``).
///
/// https://spec.graphql.org/September2025/#sec-Validation.Arguments
pub(crate) fn validate_arguments(
    coercer: &mut ValueCoercer<'_>,
    arguments: &[ast::Argument],
    definitions: &[ast::InputValueDefinition],
    owner: &str,
    location: Option<&SourceLocation>,
) {
    let mut seen: HashMap<&str, &ast::Argument> = HashMap::new();
    for argument in arguments {
        if let Some(first) = seen.insert(&argument.name, argument) {
            coercer.push_issue(Issue::with_notes(
                IssueKind::DuplicateArgument,
                format!("argument `{}` is given more than once to {owner}", argument.name),
                argument.source_location.clone(),
                smallvec![IssueNote::general_at("first given here", first.source_location.clone())],
            ));
            continue;
        }
        let Some(definition) = definitions.iter().find(|definition| definition.name == argument.name) else {
            coercer.push_issue(Issue::new(
                IssueKind::UnknownArgument,
                format!("unknown argument `{}` on {owner}", argument.name),
                argument.source_location.clone(),
            ));
            continue;
        };
        coercer.check_deprecated(
            &definition.directives,
            || format!("argument `{}` of {owner}", argument.name),
            argument.source_location.as_ref(),
        );
        coercer.coerce(&argument.value, &definition.value_type, definition.default_value.is_some());
    }

    for definition in definitions {
        if definition.is_required() && !seen.contains_key(definition.name.as_str()) {
            coercer.push_issue(Issue::new(
                IssueKind::MissingArgument,
                format!("missing required argument `{}` on {owner}", definition.name),
                location.cloned(),
            ));
        }
    }
}

/// Checks each directive application in `directives`, all written at
/// `location`.
///
/// https://spec.graphql.org/September2025/#sec-Validation.Directives
pub(crate) fn validate_directives(
    coercer: &mut ValueCoercer<'_>,
    directives: &[ast::Directive],
    location: DirectiveLocation,
) {
    let schema = coercer.schema();
    let mut seen: HashMap<&str, &ast::Directive> = HashMap::new();
    for directive in directives {
        let Some(definition) = schema.directive_definition(&directive.name) else {
            coercer.push_issue(Issue::new(
                IssueKind::UnknownDirective,
                format!("unknown directive `@{}`", directive.name),
                directive.source_location.clone(),
            ));
            continue;
        };
        if !definition.locations.contains(&location) {
            coercer.push_issue(Issue::with_notes(
                IssueKind::InvalidDirectiveLocation,
                format!("directive `@{}` may not be used on {location}", directive.name),
                directive.source_location.clone(),
                smallvec![IssueNote::help(format!(
                    "`@{}` may be used on {}",
                    directive.name,
                    definition
                        .locations
                        .iter()
                        .map(DirectiveLocation::as_str)
                        .collect::<Vec<_>>()
                        .join(" | "),
                ))],
            ));
        }
        if let Some(first) = seen.insert(&directive.name, directive)
            && !definition.repeatable
        {
            coercer.push_issue(Issue::with_notes(
                IssueKind::NonRepeatableDirective,
                format!("directive `@{}` may only be used once here", directive.name),
                directive.source_location.clone(),
                smallvec![IssueNote::general_at("first used here", first.source_location.clone())],
            ));
        }
        validate_arguments(
            coercer,
            &directive.arguments,
            &definition.arguments,
            &format!("directive `@{}`", directive.name),
            directive.source_location.as_ref(),
        );
    }
}
