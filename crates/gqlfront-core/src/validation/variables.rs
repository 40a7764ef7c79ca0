use crate::validation::VariableUsage;
use gqlfront_parser::ast;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::smallvec;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Checks every variable usage collected from `operation` (including the
/// fragments it spreads) against the variables the operation defines.
///
/// https://spec.graphql.org/September2025/#sec-All-Variable-Uses-Defined
/// https://spec.graphql.org/September2025/#sec-All-Variables-Used
/// https://spec.graphql.org/September2025/#sec-All-Variable-Usages-Are-Allowed
pub(super) fn validate_variable_usages(
    operation: &ast::OperationDefinition,
    usages: &[VariableUsage],
    issues: &mut Vec<Issue>,
) {
    let operation_name = operation.name.as_deref().unwrap_or("<anonymous>");
    let definitions: IndexMap<&str, &ast::VariableDefinition> = operation
        .variable_definitions
        .iter()
        .map(|definition| (definition.name.as_str(), definition))
        .collect();
    let mut used = HashSet::new();

    for usage in usages {
        let name = usage.variable.name.as_str();
        let Some(definition) = definitions.get(name) else {
            issues.push(Issue::new(
                IssueKind::UndefinedVariable,
                format!("variable `${name}` is not defined by operation `{operation_name}`"),
                usage.variable.source_location.clone(),
            ));
            continue;
        };
        used.insert(name);
        if !is_variable_usage_allowed(definition, usage) {
            issues.push(Issue::with_notes(
                IssueKind::InvalidVariableUsage,
                format!(
                    "variable `${name}` of type `{}` cannot be used where `{}` is expected",
                    definition.var_type, usage.location_type,
                ),
                usage.variable.source_location.clone(),
                smallvec![IssueNote::general_at("variable defined here", definition.source_location.clone())],
            ));
        }
    }

    for (name, definition) in &definitions {
        if !used.contains(name) {
            issues.push(Issue::new(
                IssueKind::UnusedVariable,
                format!("variable `${name}` is never used in operation `{operation_name}`"),
                definition.source_location.clone(),
            ));
        }
    }
}

// https://spec.graphql.org/September2025/#IsVariableUsageAllowed()
fn is_variable_usage_allowed(definition: &ast::VariableDefinition, usage: &VariableUsage) -> bool {
    let variable_type = &definition.var_type;
    let location_type = &usage.location_type;
    if location_type.is_non_null() && !variable_type.is_non_null() {
        let has_non_null_default = definition
            .default_value
            .as_ref()
            .is_some_and(|value| !matches!(value, ast::Value::Null(_)));
        if !has_non_null_default && !usage.has_location_default_value {
            return false;
        }
        return are_types_compatible(variable_type, location_type.nullable());
    }
    are_types_compatible(variable_type, location_type)
}

// https://spec.graphql.org/September2025/#AreTypesCompatible()
fn are_types_compatible(variable_type: &ast::Type, location_type: &ast::Type) -> bool {
    match (variable_type, location_type) {
        (ast::Type::NonNull(variable), ast::Type::NonNull(location)) => {
            are_types_compatible(&variable.inner_type, &location.inner_type)
        },
        (_, ast::Type::NonNull(_)) => false,
        (ast::Type::NonNull(variable), location) => are_types_compatible(&variable.inner_type, location),
        (ast::Type::List(variable), ast::Type::List(location)) => {
            are_types_compatible(&variable.element_type, &location.element_type)
        },
        (ast::Type::List(_), _) | (_, ast::Type::List(_)) => false,
        (ast::Type::Named(variable), ast::Type::Named(location)) => variable.name == location.name,
    }
}
