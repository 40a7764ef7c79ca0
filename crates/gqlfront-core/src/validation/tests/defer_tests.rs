//! Tests for the document-wide `@defer` rules.

use crate::validation::tests::error_kinds;
use crate::validation::tests::issues_of_kind;
use crate::validation::tests::validate;
use gqlfront_parser::IssueKind;

// =============================================================================
// Labels
// =============================================================================

/// Two `@defer`s at different paths sharing one label: the second is
/// reported and its note points at the first.
#[test]
fn duplicate_labels_cite_both_locations() {
    let result = validate(r#"query Q { user(id: 1) @defer(label: "x") { name } hero @defer(label: "x") { name } }"#);
    let duplicates = issues_of_kind(&result.issues, IssueKind::DuplicateDeferLabel);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].message(), "`@defer` label `x` is used more than once");

    let second = duplicates[0].location().unwrap();
    let first = duplicates[0].notes()[0].location.as_ref().unwrap();
    assert_eq!(first.column, 23);
    assert!(second.column > first.column);
}

#[test]
fn duplicate_labels_on_fragments() {
    let result = validate(
        r#"
        query Q {
          user(id: 1) { ... @defer(label: "x") { name } }
          hero { ... @defer(label: "x") { name } }
        }
        "#,
    );
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::DuplicateDeferLabel]);
}

#[test]
fn labels_are_unique_across_operations() {
    let result = validate(
        r#"
        query A { hero { ... @defer(label: "x") { name } } }
        query B { hero { ... @defer(label: "x") { id } } }
        "#,
    );
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::DuplicateDeferLabel]);
}

/// Spreading one fragment in two places reaches the same `@defer` twice,
/// which is not a second use of its label.
#[test]
fn a_fragment_spread_twice_reuses_its_label() {
    let result = validate(
        r#"
        query Q { a: user(id: 1) { ...F } b: user(id: 2) { ...F } }
        fragment F on User { ... @defer(label: "x") { name } }
        "#,
    );
    assert!(result.issues.is_empty(), "{:#?}", result.issues);
}

#[test]
fn labels_cannot_be_variables() {
    let result = validate(r#"query Q($l: String) { hero { ... @defer(label: $l) { name } } }"#);
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);
    assert_eq!(
        result.issues[0].message(),
        "`@defer(label:)` must be a string literal, not the variable `$l`",
    );
}

#[test]
fn labels_must_be_identifier_safe() {
    let result = validate(r#"query Q { hero { ... @defer(label: "not-valid") { name } } }"#);
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);

    let result = validate(r#"query Q { hero { ... @defer(label: "slow_2") { name } } }"#);
    assert!(result.issues.is_empty(), "{:#?}", result.issues);
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn unlabeled_defers_must_have_distinct_paths() {
    let result = validate("query Q { hero { ... @defer { name } ... @defer { id } } }");
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);
    assert_eq!(
        result.issues[0].message(),
        "`@defer` without a label is used more than once at `hero`",
    );

    let result = validate("query Q { hero { ... @defer { name } } user(id: 1) { ... @defer { name } } }");
    assert!(result.issues.is_empty(), "{:#?}", result.issues);
}

/// Each operation has its own response, so separate operations may defer
/// at the same path without labels.
#[test]
fn unlabeled_paths_are_scoped_to_one_operation() {
    let result = validate(
        r#"
        query A { hero { ... @defer { name } } }
        query B { hero { ... @defer { id } } }
        "#,
    );
    assert!(result.issues.is_empty(), "{:#?}", result.issues);

    let result = validate(
        r#"
        query A { hero { ... @defer { name } } }
        query B { hero { ... @defer { id } ... @defer { name } } }
        "#,
    );
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);
}

// =============================================================================
// Root selection sets
// =============================================================================

#[test]
fn defer_is_rejected_on_a_mutation_root() {
    let result = validate(r#"mutation M { ... @defer { rename(id: 1, name: "Leia") { id } } }"#);
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);
    assert_eq!(
        result.issues[0].message(),
        "`@defer` cannot be used on the root selection set of a mutation",
    );
}

#[test]
fn defer_is_rejected_on_a_subscription_root() {
    let result = validate("subscription S { ... @defer { userChanged { id } } }");
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);
}

#[test]
fn disabled_defer_is_allowed_on_a_mutation_root() {
    let result = validate(r#"mutation M { ... @defer(if: false) { rename(id: 1, name: "Leia") { id } } }"#);
    assert!(result.issues.is_empty(), "{:#?}", result.issues);
}

#[test]
fn defer_is_allowed_below_a_mutation_root() {
    let result = validate(r#"mutation M { rename(id: 1, name: "Leia") { id ... @defer { name } } }"#);
    assert!(result.issues.is_empty(), "{:#?}", result.issues);

    let result = validate("query Q { ... @defer { hero { name } } }");
    assert!(result.issues.is_empty(), "{:#?}", result.issues);
}

/// Fragments checked on their own have no operation, so the root rule
/// waits until the fragment is spread.
#[test]
fn root_rule_applies_where_a_fragment_is_spread() {
    let result = validate(
        r#"
        mutation M { ...Writes }
        fragment Writes on Mutation { ... @defer { rename(id: 1, name: "Leia") { id } } }
        "#,
    );
    assert_eq!(error_kinds(&result.issues), vec![IssueKind::InvalidDefer]);
}
