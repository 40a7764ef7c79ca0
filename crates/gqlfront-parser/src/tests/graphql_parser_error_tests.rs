//! Tests for documents `GraphQLParser` must reject, and for the shape of the
//! single issue it reports.

use crate::ast;
use crate::tests::utils::parse_doc;
use crate::tests::utils::parse_error;
use crate::GraphQLParser;
use crate::IssueKind;
use crate::IssueNoteKind;
use crate::ParserOptions;

// =============================================================================
// Grammar errors
// =============================================================================

#[test]
fn unclosed_selection_set() {
    let issue = parse_error("query Hero { hero { name }");
    assert_eq!(issue.kind(), IssueKind::GrammarError);
    assert_eq!(issue.message(), "expected `}`, found end of input");
}

#[test]
fn unexpected_token_names_what_was_expected() {
    let issue = parse_error("type Query { hero String }");
    assert_eq!(issue.message(), "expected `:`, found name `String`");
    let location = issue.location().unwrap();
    assert_eq!((location.line, location.column), (1, 19));
}

#[test]
fn unknown_definition_keyword() {
    let issue = parse_error("object Query { a: Int }");
    assert_eq!(issue.message(), "expected definition, found name `object`");
}

/// Lexical errors surface through the parser as a single lexical issue.
#[test]
fn lexical_error_surfaces_as_issue() {
    let issue = parse_error("type Query { a: Int ? }");
    assert_eq!(issue.kind(), IssueKind::LexicalError);
    assert!(issue.message().contains("`?`"));
}

#[test]
fn empty_document_is_error() {
    let issue = parse_error("   # only a comment\n");
    assert_eq!(issue.message(), "a document must contain at least one definition");
}

#[test]
fn trailing_tokens_after_value_are_error() {
    let result = GraphQLParser::new("1 2").parse_value();
    assert_eq!(result.issues().len(), 1);
    assert_eq!(result.issues()[0].message(), "expected end of input, found integer `2`");
}

// =============================================================================
// Empty constructs
// =============================================================================

/// Empty `()` and `{}` are rejected wherever the grammar requires at least
/// one item.
#[test]
fn empty_delimited_lists_are_errors() {
    let cases = [
        ("{ }", "a selection set must not be empty"),
        ("{ hero() }", "an argument list must not be empty"),
        ("query Q() { a }", "a variable definition list must not be empty"),
        ("type Query { }", "a field list must not be empty"),
        ("type Query { a(): Int }", "an argument definition list must not be empty"),
        ("enum Color {}", "an enum value list must not be empty"),
        ("input Filter {}", "an input field list must not be empty"),
    ];
    for (source, message) in cases {
        let issue = parse_error(source);
        assert_eq!(issue.message(), message, "for `{source}`");
        assert_eq!(issue.notes().len(), 1, "for `{source}`");
    }
}

/// An extension that adds nothing is rejected.
#[test]
fn empty_extensions_are_errors() {
    assert_eq!(parse_error("extend type Foo").message(), "`extend type Foo` does not add anything");
    assert_eq!(parse_error("extend schema").message(), "`extend schema` does not add anything");
    assert_eq!(
        parse_error("extend scalar Date").message(),
        "`extend scalar Date` does not add anything",
    );
    assert_eq!(
        parse_error("extend union U").message(),
        "`extend union U` does not add anything",
    );
    for construct in ["extend interface I", "extend enum E", "extend input In"] {
        assert_eq!(parse_error(construct).message(), format!("`{construct}` does not add anything"));
    }
}

/// Adding only an interface is enough to make an extension non-empty.
#[test]
fn extensions_that_add_one_thing_parse() {
    for source in [
        "extend type Foo implements Node",
        "extend interface I @tag",
        "extend union U = A",
        "extend enum E { B }",
        "extend input In { x: Int }",
        "extend scalar Date @tag",
    ] {
        let document = parse_doc(source);
        let ast::Definition::TypeExtension(extension) = &document.definitions[0] else {
            panic!("expected a type extension for `{source}`");
        };
        assert!(!extension.adds_nothing(), "{source}");
        assert!(extension.source_location().is_some(), "{source}");
    }
}

// =============================================================================
// Reserved names and misplaced constructs
// =============================================================================

#[test]
fn boolean_and_null_are_not_enum_values() {
    for name in ["true", "false", "null"] {
        let issue = parse_error(&format!("enum Flag {{ YES {name} }}"));
        assert_eq!(issue.message(), format!("`{name}` cannot be used as an enum value"));
    }
}

#[test]
fn fragment_cannot_be_named_on() {
    let issue = parse_error("fragment on on Query { a }");
    assert_eq!(issue.message(), "a fragment cannot be named `on`");
}

#[test]
fn extension_cannot_have_description() {
    let issue = parse_error(r#""Extra fields." extend type Query { a: Int }"#);
    assert_eq!(issue.message(), "type-system extensions cannot have a description");
}

/// Variables are rejected in every constant position.
#[test]
fn variables_rejected_in_const_positions() {
    let cases = [
        ("query Q($a: Int = $b) { a }", "variables are not allowed in variable default values"),
        (
            "type Query { a(x: Int = $v): Int }",
            "variables are not allowed in input value default values",
        ),
        (
            "type Query @cached(ttl: $v) { a: Int }",
            "variables are not allowed in type-system directive arguments",
        ),
    ];
    for (source, message) in cases {
        assert_eq!(parse_error(source).message(), message, "for `{source}`");
    }
}

#[test]
fn unknown_directive_location_suggests_closest() {
    let issue = parse_error("directive @cached on FIELD_DEFINTION");
    assert_eq!(issue.message(), "unknown directive location `FIELD_DEFINTION`");
    let help = issue
        .notes()
        .iter()
        .find(|note| note.kind == IssueNoteKind::Help)
        .expect("a help note");
    assert_eq!(help.message, "did you mean `FIELD_DEFINITION`?");
}

// =============================================================================
// Nesting limit
// =============================================================================

/// Deeply nested input reports an error rather than overflowing the stack.
#[test]
fn excessive_nesting_is_error() {
    let depth = 10_000;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let result = GraphQLParser::new(&source).parse_value();
    assert_eq!(result.issues().len(), 1);
    assert!(result.issues()[0].message().contains("maximum depth of 64"));

    let selections = format!("{}{}", "{ a ".repeat(depth), "}".repeat(depth));
    let result = GraphQLParser::new(&selections).parse_document();
    assert!(result.issues()[0].message().contains("maximum depth"));
}

/// Parse issues carry the configured file path.
#[test]
fn issue_location_has_file_path() {
    let options = ParserOptions::new().file_path("ops/hero.graphql");
    let result = GraphQLParser::with_options("{ hero ", options).parse_document();
    let location = result.issues()[0].location().unwrap();
    assert_eq!(location.file_path.as_deref(), Some("ops/hero.graphql"));
    assert!(result.format_issues(None).contains("ops/hero.graphql"));
}
