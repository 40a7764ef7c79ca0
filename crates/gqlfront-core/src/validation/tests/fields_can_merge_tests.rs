//! Tests for field selection merging.

use crate::validation::tests::error_kinds;
use crate::validation::tests::issues_of_kind;
use crate::validation::tests::parse;
use crate::validation::tests::schema;
use crate::validation::tests::validate;
use crate::ExecutableValidator;
use gqlfront_parser::IssueKind;
use proptest::prelude::*;

fn merge_conflicts(source: &str) -> Vec<String> {
    let result = validate(source);
    issues_of_kind(&result.issues, IssueKind::FieldsCannotMerge)
        .into_iter()
        .map(|issue| issue.message().to_string())
        .collect()
}

fn strict_merge_conflicts(source: &str) -> Vec<String> {
    let result = ExecutableValidator::new(schema())
        .strict_response_shapes(true)
        .validate(&parse(source));
    issues_of_kind(&result.issues, IssueKind::FieldsCannotMerge)
        .into_iter()
        .map(|issue| issue.message().to_string())
        .collect()
}

// =============================================================================
// Conflicts
// =============================================================================

/// `Pet.nickname` is nullable and `Dog.nickname` isn't, so the two can't
/// share a response key.
#[test]
fn different_types_conflict_symmetrically() {
    let result = validate("query Q { pet { nickname ... on Dog { nickname } } }");
    assert_eq!(
        error_kinds(&result.issues),
        vec![IssueKind::FieldsCannotMerge, IssueKind::FieldsCannotMerge],
    );
    for issue in &result.issues {
        assert!(issue.message().contains("different types"), "{}", issue.message());
    }
    assert_eq!(
        result.issues[0].message(),
        "response key `nickname` has conflicting fields: they have different types (`String` and `String!`)",
    );

    // Each issue points at one field and notes the other.
    let first = result.issues[0].location().unwrap();
    let second = result.issues[1].location().unwrap();
    assert_ne!(first, second);
    assert_eq!(result.issues[0].notes()[0].location.as_ref(), Some(second));
    assert_eq!(result.issues[1].notes()[0].location.as_ref(), Some(first));
}

/// `Character.name` is a `String` and `Character.id` an `ID!`, so the type
/// mismatch is what gets reported.
#[test]
fn aliases_of_differently_typed_fields_report_the_types() {
    let conflicts = merge_conflicts("query Q { hero { n: name n: id } }");
    assert_eq!(conflicts.len(), 2);
    for conflict in &conflicts {
        assert_eq!(
            conflict,
            "response key `n` has conflicting fields: they have different types (`String` and `ID!`)",
        );
    }
}

#[test]
fn aliases_of_same_typed_fields_conflict_by_name() {
    let conflicts = merge_conflicts("query Q { foo { v: x v: y } }");
    assert_eq!(conflicts.len(), 2);
    assert_eq!(
        conflicts[0],
        "response key `v` has conflicting fields: `x` and `y` are different fields",
    );
}

#[test]
fn different_arguments_conflict() {
    let conflicts = merge_conflicts("query Q { users(first: 1) { id } users(first: 2) { id } }");
    assert_eq!(conflicts.len(), 2);
    assert!(conflicts[0].ends_with("they have different arguments"));

    let conflicts = merge_conflicts("query Q($a: Int, $b: Int) { users(first: $a) { id } users(first: $b) { id } }");
    assert_eq!(conflicts.len(), 2);
}

#[test]
fn conflicting_subfields_are_explained() {
    let conflicts = merge_conflicts(
        "query Q { user(id: 1) { friends { x: id } } user(id: 1) { friends { x: name } } }",
    );
    assert_eq!(conflicts.len(), 2);
    assert!(
        conflicts[0].contains("their subfields `friends` conflict because their subfields `x` conflict"),
        "{}",
        conflicts[0],
    );
}

#[test]
fn conflicts_are_found_through_fragments() {
    let conflicts = merge_conflicts(
        r#"
        query Q { hero { ...A ...B } }
        fragment A on Character { n: name }
        fragment B on Character { n: id }
        "#,
    );
    assert_eq!(conflicts.len(), 2);
}

// =============================================================================
// Compatible selections
// =============================================================================

#[test]
fn identical_fields_merge() {
    assert!(merge_conflicts("query Q { hero { name name friends { id } friends { name } } }").is_empty());
    assert!(merge_conflicts("query Q($n: Int) { users(first: $n) { id } users(first: $n) { name } }").is_empty());
    assert!(merge_conflicts(
        "query Q { users(filter: { name: \"a\", role: ADMIN }) { id } users(filter: { role: ADMIN, name: \"a\" }) { id } }",
    )
    .is_empty());
}

/// Fields on two different object types never both apply, so by default
/// they may differ.
#[test]
fn disjoint_object_types_merge_by_default() {
    assert!(merge_conflicts("query Q { pet { ... on Dog { tag } ... on Cat { tag } } }").is_empty());
    assert!(merge_conflicts("query Q { pet { ... on Dog { x: barks } ... on Cat { x: meows } } }").is_empty());
}

#[test]
fn strict_mode_compares_shapes_of_disjoint_types() {
    let conflicts = strict_merge_conflicts("query Q { pet { ... on Dog { tag } ... on Cat { tag } } }");
    assert_eq!(conflicts.len(), 2);
    assert_eq!(
        conflicts[0],
        "response key `tag` has conflicting fields: they have different shapes (`String` and `Int`)",
    );

    assert!(strict_merge_conflicts("query Q { pet { ... on Dog { x: barks } ... on Cat { x: meows } } }").is_empty());
}

// =============================================================================
// Order independence
// =============================================================================

const COMPATIBLE_SELECTIONS: [&str; 6] = [
    "name",
    "name",
    "id",
    "friends { id }",
    "friends { name }",
    "n: name",
];

const FILLER_SELECTIONS: [&str; 3] = ["hero { name }", "__typename", "pet { nickname }"];

proptest! {
    /// Compatible selections never conflict, whatever order they come in.
    #[test]
    fn compatible_selections_never_conflict(
        selections in Just(COMPATIBLE_SELECTIONS.to_vec()).prop_shuffle(),
    ) {
        let source = format!("query Q {{ hero {{ {} }} }}", selections.join(" "));
        let result = validate(&source);
        prop_assert!(result.issues.is_empty(), "{:#?}", result.issues);
    }

    /// Two selections of one field with different argument values always
    /// produce exactly one issue per field.
    #[test]
    fn differing_arguments_always_conflict_twice(
        first in 0..100i32,
        second in 0..100i32,
        selections in Just(FILLER_SELECTIONS.to_vec()).prop_shuffle(),
        position in 0..=3usize,
    ) {
        prop_assume!(first != second);
        let mut selections: Vec<String> = selections.into_iter().map(str::to_string).collect();
        selections.insert(position, format!("users(first: {first}) {{ id }}"));
        selections.push(format!("users(first: {second}) {{ id }}"));

        let source = format!("query Q {{ {} }}", selections.join(" "));
        let result = validate(&source);
        prop_assert_eq!(error_kinds(&result.issues), vec![IssueKind::FieldsCannotMerge; 2]);
        prop_assert_ne!(result.issues[0].location(), result.issues[1].location());
    }
}
