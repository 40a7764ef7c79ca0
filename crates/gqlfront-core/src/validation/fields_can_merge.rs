//! The "field selection merging" rule: every field selected under one
//! response key must produce the same response.
//!
//! https://spec.graphql.org/September2025/#sec-Field-Selection-Merging
//!
//! Fields whose parents are two different object types can never both apply
//! to one object, so they only need compatible response shapes. That check
//! is opt-in (`strict_response_shapes`) because some schemas rely on
//! returning different shapes under one key from disjoint types.

use crate::validation::executable_validator::lookup_field;
use crate::Schema;
use gqlfront_parser::ast;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::smallvec;
use indexmap::IndexMap;
use std::collections::HashSet;

/// A field selection together with the type it was selected on.
#[derive(Clone, Copy)]
struct FieldInContext<'d> {
    parent_type: Option<&'d ast::TypeDefinition>,
    field: &'d ast::Field,
    definition: Option<&'d ast::FieldDefinition>,
}

type FieldsByResponseKey<'d> = IndexMap<&'d str, Vec<FieldInContext<'d>>>;

pub(super) struct FieldsCanMerge<'d, 'i> {
    schema: &'d Schema,
    fragments: &'i IndexMap<&'d str, &'d ast::FragmentDefinition>,
    strict_response_shapes: bool,
    checked_selection_sets: HashSet<usize>,
    issues: &'i mut Vec<Issue>,
}

impl<'d, 'i> FieldsCanMerge<'d, 'i> {
    pub fn new(
        schema: &'d Schema,
        fragments: &'i IndexMap<&'d str, &'d ast::FragmentDefinition>,
        strict_response_shapes: bool,
        issues: &'i mut Vec<Issue>,
    ) -> Self {
        Self {
            schema,
            fragments,
            strict_response_shapes,
            checked_selection_sets: HashSet::new(),
            issues,
        }
    }

    /// Checks `selections` and, recursively, every selection set nested in
    /// them.
    pub fn check(&mut self, selections: &'d [ast::Selection], parent_type: Option<&'d ast::TypeDefinition>) {
        if !self.checked_selection_sets.insert(selections.as_ptr() as usize) {
            return;
        }

        let fields = self.collect_fields(selections, parent_type);
        for (response_key, group) in &fields {
            for (index, first) in group.iter().enumerate() {
                for second in &group[index + 1..] {
                    if let Some(reason) = self.find_conflict(first, second, false) {
                        self.report(response_key, first, second, &reason);
                    }
                }
            }
        }

        for field in fields.values().flatten() {
            if !field.field.selections.is_empty() {
                let field_type = self.return_type(field);
                self.check(&field.field.selections, field_type);
            }
        }
    }

    fn report(&mut self, response_key: &str, first: &FieldInContext<'d>, second: &FieldInContext<'d>, reason: &str) {
        let message = format!("response key `{response_key}` has conflicting fields: {reason}");
        for (field, other) in [(first, second), (second, first)] {
            self.issues.push(Issue::with_notes(
                IssueKind::FieldsCannotMerge,
                message.clone(),
                field.field.source_location.clone(),
                smallvec![IssueNote::general_at(
                    "conflicting field selected here",
                    other.field.source_location.clone(),
                )],
            ));
        }
    }

    // =========================================================================
    // Field collection
    // =========================================================================

    fn collect_fields(
        &self,
        selections: &'d [ast::Selection],
        parent_type: Option<&'d ast::TypeDefinition>,
    ) -> FieldsByResponseKey<'d> {
        let mut fields = IndexMap::new();
        let mut visited_fragments = HashSet::new();
        self.collect_fields_into(selections, parent_type, &mut fields, &mut visited_fragments);
        fields
    }

    fn collect_fields_into(
        &self,
        selections: &'d [ast::Selection],
        parent_type: Option<&'d ast::TypeDefinition>,
        fields: &mut FieldsByResponseKey<'d>,
        visited_fragments: &mut HashSet<&'d str>,
    ) {
        for selection in selections {
            match selection {
                ast::Selection::Field(field) => {
                    let definition = parent_type.and_then(|parent| lookup_field(self.schema, parent, &field.name));
                    fields.entry(field.response_key()).or_default().push(FieldInContext {
                        parent_type,
                        field,
                        definition,
                    });
                },
                ast::Selection::InlineFragment(inline) => {
                    let fragment_type = match &inline.type_condition {
                        Some(condition) => self.schema.type_definition(&condition.name),
                        None => parent_type,
                    };
                    self.collect_fields_into(&inline.selections, fragment_type, fields, visited_fragments);
                },
                ast::Selection::FragmentSpread(spread) => {
                    let Some(fragment) = self.fragments.get(spread.name.as_str()) else {
                        continue;
                    };
                    if !visited_fragments.insert(fragment.name.as_str()) {
                        continue;
                    }
                    let fragment_type = self.schema.type_definition(&fragment.type_condition.name);
                    self.collect_fields_into(&fragment.selections, fragment_type, fields, visited_fragments);
                },
            }
        }
    }

    fn return_type(&self, field: &FieldInContext<'d>) -> Option<&'d ast::TypeDefinition> {
        let definition = field.definition?;
        self.schema.type_definition(definition.field_type.innermost_name())
    }

    // =========================================================================
    // Conflict detection
    // =========================================================================

    /// Explains why `first` and `second` can't share a response key, if they
    /// can't.
    fn find_conflict(
        &self,
        first: &FieldInContext<'d>,
        second: &FieldInContext<'d>,
        parents_are_exclusive: bool,
    ) -> Option<String> {
        if std::ptr::eq(first.field, second.field) {
            return None;
        }

        let are_exclusive = parents_are_exclusive
            || match (first.parent_type, second.parent_type) {
                (Some(first_parent), Some(second_parent)) => {
                    first_parent.name() != second_parent.name()
                        && matches!(first_parent, ast::TypeDefinition::Object(_))
                        && matches!(second_parent, ast::TypeDefinition::Object(_))
                },
                _ => false,
            };

        if are_exclusive && !self.strict_response_shapes {
            return None;
        }

        // Type conflicts take precedence over name and argument differences.
        if let (Some(first_definition), Some(second_definition)) = (first.definition, second.definition)
            && self.do_types_conflict(&first_definition.field_type, &second_definition.field_type)
        {
            let difference = if are_exclusive { "shapes" } else { "types" };
            return Some(format!(
                "they have different {difference} (`{}` and `{}`)",
                first_definition.field_type, second_definition.field_type,
            ));
        }

        if !are_exclusive {
            if first.field.name != second.field.name {
                return Some(format!(
                    "`{}` and `{}` are different fields",
                    first.field.name, second.field.name,
                ));
            }
            if !same_arguments(&first.field.arguments, &second.field.arguments) {
                return Some("they have different arguments".to_string());
            }
        }

        if first.field.selections.is_empty() || second.field.selections.is_empty() {
            return None;
        }
        let first_subfields = self.collect_fields(&first.field.selections, self.return_type(first));
        let second_subfields = self.collect_fields(&second.field.selections, self.return_type(second));
        for (response_key, first_group) in &first_subfields {
            let Some(second_group) = second_subfields.get(response_key) else {
                continue;
            };
            for first_subfield in first_group {
                for second_subfield in second_group {
                    if let Some(reason) = self.find_conflict(first_subfield, second_subfield, are_exclusive) {
                        return Some(format!("their subfields `{response_key}` conflict because {reason}"));
                    }
                }
            }
        }
        None
    }

    /// Compares two field types layer by layer. Only leaf types have to
    /// match by name; composite types are compared through their subfields.
    fn do_types_conflict(&self, first: &ast::Type, second: &ast::Type) -> bool {
        match (first, second) {
            (ast::Type::NonNull(first), ast::Type::NonNull(second)) => {
                self.do_types_conflict(&first.inner_type, &second.inner_type)
            },
            (ast::Type::NonNull(_), _) | (_, ast::Type::NonNull(_)) => true,
            (ast::Type::List(first), ast::Type::List(second)) => {
                self.do_types_conflict(&first.element_type, &second.element_type)
            },
            (ast::Type::List(_), _) | (_, ast::Type::List(_)) => true,
            (ast::Type::Named(first), ast::Type::Named(second)) => {
                let is_leaf = |name: &str| {
                    self.schema
                        .type_definition(name)
                        .is_some_and(ast::TypeDefinition::is_leaf)
                };
                (is_leaf(&first.name) || is_leaf(&second.name)) && first.name != second.name
            },
        }
    }
}

fn same_arguments(first: &[ast::Argument], second: &[ast::Argument]) -> bool {
    first.len() == second.len()
        && first.iter().all(|argument| {
            second
                .iter()
                .find(|other| other.name == argument.name)
                .is_some_and(|other| other.value.same_value(&argument.value))
        })
}
