//! Tests for `@typePolicy` key fields and connection types.

use crate::schema::tests::build;
use crate::schema::tests::build_errors;
use crate::schema::tests::kinds;
use crate::SchemaBuilder;
use gqlfront_parser::IssueKind;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// Declared key fields
// =============================================================================

#[test]
fn declared_key_fields_are_recorded() {
    let schema = build(
        r#"
        type Query { book: Book }
        type Book @typePolicy(keyFields: "isbn edition") { isbn: String! edition: Int title: String }
        "#,
    );
    assert_eq!(schema.key_fields("Book"), ["isbn", "edition"]);
    assert!(schema.key_fields("Query").is_empty());
}

#[test]
fn key_fields_may_be_wrapped_in_braces() {
    let schema = build(r#"type Query { a: A } type A @typePolicy(keyFields: "{ id }") { id: ID! }"#);
    assert_eq!(schema.key_fields("A"), ["id"]);
}

#[test]
fn key_fields_must_exist() {
    let issues = build_errors(r#"type Query { a: A } type A @typePolicy(keyFields: "uuid") { id: ID! }"#);
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidKeyFields]);
    assert_eq!(issues[0].message(), "`A` has no key field `uuid`");
}

#[test]
fn key_fields_must_be_leaves() {
    let issues = build_errors(r#"type Query { a: A } type A @typePolicy(keyFields: "owner") { owner: Query }"#);
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidKeyFields]);
    assert_eq!(issues[0].message(), "key field `A.owner` must be a scalar or enum field");
}

#[test]
fn key_fields_must_be_plain_names() {
    for key_fields in ["owner { id }", "alias: id", "...F", "id("] {
        let issues = build_errors(&format!(
            r#"type Query {{ a: A }} type A @typePolicy(keyFields: "{key_fields}") {{ id: ID! owner: Query }}"#,
        ));
        assert_eq!(kinds(&issues), vec![IssueKind::InvalidKeyFields], "{key_fields}");
    }
}

// =============================================================================
// Inherited key fields
// =============================================================================

#[test]
fn key_fields_are_inherited_from_interfaces() {
    let schema = build(
        r#"
        type Query { node: Node }
        interface Node @typePolicy(keyFields: "id") { id: ID! }
        interface Entity implements Node { id: ID! }
        type User implements Entity & Node { id: ID! name: String }
        "#,
    );
    assert_eq!(schema.key_fields("Node"), ["id"]);
    assert_eq!(schema.key_fields("Entity"), ["id"]);
    assert_eq!(schema.key_fields("User"), ["id"]);
}

#[test]
fn interfaces_with_matching_key_fields_agree() {
    let schema = build(
        r#"
        type Query { t: T }
        interface A @typePolicy(keyFields: "id uuid") { id: ID! uuid: ID! }
        interface B @typePolicy(keyFields: "uuid id") { id: ID! uuid: ID! }
        type T implements A & B { id: ID! uuid: ID! }
        "#,
    );
    assert_eq!(schema.key_fields("T"), ["id", "uuid"]);
}

#[test]
fn interfaces_with_different_key_fields_conflict() {
    let issues = build_errors(
        r#"
        type Query { t: T }
        interface A @typePolicy(keyFields: "id") { id: ID! uuid: ID! }
        interface B @typePolicy(keyFields: "uuid") { id: ID! uuid: ID! }
        type T implements A & B { id: ID! uuid: ID! }
        "#,
    );
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidKeyFields]);
    assert_eq!(
        issues[0].message(),
        "`T` inherits different key fields from `A` (`id`) and `B` (`uuid`)",
    );
}

#[test]
fn implementations_cannot_redeclare_key_fields() {
    let issues = build_errors(
        r#"
        type Query { node: Node }
        interface Node @typePolicy(keyFields: "id") { id: ID! }
        type User implements Node @typePolicy(keyFields: "id") { id: ID! }
        "#,
    );
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidKeyFields]);
    assert!(issues[0].message().contains("interface `Node` already declares them"));
}

/// Schemas where `T` implements two interfaces keyed on subsets of
/// `id uuid sku`.
fn two_interface_schema(first: &[&str], second: &[&str]) -> String {
    format!(
        r#"
        type Query {{ t: T }}
        interface A @typePolicy(keyFields: "{}") {{ id: ID! uuid: ID! sku: String! }}
        interface B @typePolicy(keyFields: "{}") {{ id: ID! uuid: ID! sku: String! }}
        type T implements A & B {{ id: ID! uuid: ID! sku: String! }}
        "#,
        first.join(" "),
        second.join(" "),
    )
}

fn key_field_subset() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(vec!["id", "uuid", "sku"], 1..=3).prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// A type inheriting from two keyed interfaces builds exactly when both
    /// interfaces declare the same set of key fields.
    #[test]
    fn inherited_key_fields_must_agree(first in key_field_subset(), second in key_field_subset()) {
        let result = SchemaBuilder::new()
            .load_str(None, &two_interface_schema(&first, &second))
            .build();
        let first_set: BTreeSet<_> = first.iter().collect();
        let second_set: BTreeSet<_> = second.iter().collect();

        if first_set == second_set {
            prop_assert!(!result.has_errors(), "{:#?}", result.issues());
        } else {
            prop_assert!(result.value().is_none());
            let conflict = result
                .issues()
                .iter()
                .find(|issue| issue.kind() == IssueKind::InvalidKeyFields);
            let names_both = conflict.is_some_and(|issue| {
                issue.message().contains("`A`") && issue.message().contains("`B`")
            });
            prop_assert!(names_both);
        }
    }
}

// =============================================================================
// Connection types
// =============================================================================

#[test]
fn connection_fields_record_their_return_types() {
    let schema = build(
        r#"
        type Query @typePolicy(connectionFields: "feed") { feed: FeedConnection! user: User }
        type User @typePolicy(connectionFields: "friends") { friends: [FriendConnection] }
        type FeedConnection { edges: [String] }
        type FriendConnection { edges: [String] }
        "#,
    );
    let connection_types: Vec<&str> = schema.connection_types().iter().map(String::as_str).collect();
    assert_eq!(connection_types, vec!["FeedConnection", "FriendConnection"]);
}

#[test]
fn connection_fields_must_exist() {
    let issues = build_errors(r#"type Query @typePolicy(connectionFields: "feed") { a: Int }"#);
    assert_eq!(kinds(&issues), vec![IssueKind::InvalidConnectionFields]);
    assert_eq!(issues[0].message(), "`Query` has no connection field `feed`");
}
