//! Tests for the SDL writer.

use crate::ast;
use crate::ast::Node;
use crate::sdl::is_builtin_scalar_definition;
use crate::sdl::SdlWriter;
use crate::tests::utils::parse_doc;
use crate::tests::utils::parse_doc_without_locations;
use crate::tests::utils::single_object;
use crate::GraphQLParser;

/// Writes `source` as SDL and checks that the output parses back to the same
/// tree.
fn assert_round_trips(source: &str) -> String {
    let sdl = parse_doc(source).to_sdl();
    assert_eq!(
        parse_doc_without_locations(&sdl),
        parse_doc_without_locations(source),
        "SDL did not round-trip:\n{sdl}",
    );
    sdl
}

// =============================================================================
// Type system
// =============================================================================

#[test]
fn writes_simple_object() {
    assert_eq!(parse_doc("type Query{hero:String}").to_sdl(), "type Query {\n  hero: String\n}\n");
}

#[test]
fn writes_canonical_type_system_document() {
    let source = r#"
        """
        Multi
        line
        """
        type Query implements Node @cached(ttl: 60) {
          "Single line" hero(episode: Episode = JEDI, first: Int): [Character!]!
          node("The id." id: ID!): Node
        }
        enum Episode { NEWHOPE, JEDI @deprecated(reason: "old") }
        union SearchResult = | Human | Droid
        input Filter { first: Int = 10, tags: [String] = ["a", "b"], where: Where = {x: 1.0, y: null} }
        directive @cached(ttl: Int = 60) repeatable on FIELD_DEFINITION | OBJECT
        schema { query: Query }
        extend type Query @extra
    "#;
    let expected = r#""""
Multi
line
"""
type Query implements Node @cached(ttl: 60) {
  "Single line"
  hero(episode: Episode = JEDI, first: Int): [Character!]!
  node(
    "The id."
    id: ID!
  ): Node
}

enum Episode {
  NEWHOPE
  JEDI @deprecated(reason: "old")
}

union SearchResult = Human | Droid

input Filter {
  first: Int = 10
  tags: [String] = ["a", "b"]
  where: Where = { x: 1.0, y: null }
}

directive @cached(ttl: Int = 60) repeatable on FIELD_DEFINITION | OBJECT

schema {
  query: Query
}

extend type Query @extra
"#;
    assert_eq!(assert_round_trips(source), expected);
}

#[test]
fn skips_builtin_scalar_definitions() {
    let document = parse_doc("scalar Int scalar Date scalar ID");
    assert!(is_builtin_scalar_definition(&document.definitions[0]));
    assert!(!is_builtin_scalar_definition(&document.definitions[1]));
    assert_eq!(document.to_sdl(), "scalar Date\n");
}

// =============================================================================
// Executable documents
// =============================================================================

#[test]
fn writes_operations_and_fragments() {
    let source = "query Hero($ep: Episode = JEDI) @live { leader: hero(episode: $ep) \
                  { name ...F ... on Droid { primaryFunction } } } \
                  fragment F on Character @x { id }";
    let expected = "query Hero($ep: Episode = JEDI) @live {
  leader: hero(episode: $ep) {
    name
    ...F
    ... on Droid {
      primaryFunction
    }
  }
}

fragment F on Character @x {
  id
}
";
    assert_eq!(assert_round_trips(source), expected);
}

#[test]
fn anonymous_query_uses_shorthand() {
    assert_eq!(parse_doc("query { a }").to_sdl(), "{\n  a\n}\n");
    // Anything that needs the keyword keeps it.
    assert_eq!(parse_doc("query @live { a }").to_sdl(), "query @live {\n  a\n}\n");
    assert_eq!(parse_doc("subscription { a }").to_sdl(), "subscription {\n  a\n}\n");
}

// =============================================================================
// Strings and descriptions
// =============================================================================

/// A description that a block string can't reproduce falls back to an
/// escaped string.
#[test]
fn description_with_trailing_newline_is_escaped() {
    let sdl = assert_round_trips(r#""Ends with newline.\n" scalar Date"#);
    assert_eq!(sdl, "\"Ends with newline.\\n\"\nscalar Date\n");
}

#[test]
fn block_description_escapes_triple_quotes() {
    let source = "\"\"\"\nSay \\\"\"\"hi\\\"\"\"\nthen leave\n\"\"\" scalar Greeting";
    let document = parse_doc(source);
    let ast::Definition::Type(definition) = &document.definitions[0] else { unreachable!() };
    assert_eq!(definition.description(), Some("Say \"\"\"hi\"\"\"\nthen leave"));
    let sdl = assert_round_trips(source);
    assert!(sdl.starts_with("\"\"\"\nSay \\\"\"\"hi\\\"\"\"\nthen leave\n\"\"\"\n"), "{sdl}");
}

#[test]
fn block_description_indented_inside_type() {
    let source = "type T {\n  \"\"\"\n  first\n\n  second\n  \"\"\"\n  f: Int\n}";
    let sdl = assert_round_trips(source);
    assert_eq!(sdl, "type T {\n  \"\"\"\n  first\n\n  second\n  \"\"\"\n  f: Int\n}\n");
    let reparsed = parse_doc(&sdl);
    let description = single_object(&reparsed).fields[0].description.as_deref();
    assert_eq!(description, Some("first\n\nsecond"));
}

#[test]
fn control_characters_are_escaped() {
    let value = GraphQLParser::new(r#""tab\tquote\"slash\\bell\u0007""#)
        .parse_value()
        .into_value()
        .unwrap();
    assert_eq!(Node::Value(value).to_sdl(), r#""tab\tquote\"slash\\bell\u0007""#);
}

// =============================================================================
// Nodes and indentation
// =============================================================================

#[test]
fn writes_individual_nodes() {
    let value = GraphQLParser::new(r#"[1, "x", {a: 2.5, b: []}, 3e2]"#)
        .parse_value()
        .into_value()
        .unwrap();
    assert_eq!(Node::Value(value).to_sdl(), r#"[1, "x", { a: 2.5, b: [] }, 300.0]"#);

    let ty = GraphQLParser::new("[ID!]!").parse_type().into_value().unwrap();
    assert_eq!(Node::Type(ty).to_sdl(), "[ID!]!");

    let selections = GraphQLParser::new("hero { name }").parse_selections().into_value().unwrap();
    assert_eq!(Node::Selection(selections[0].clone()).to_sdl(), "hero {\n  name\n}");
}

#[test]
fn extreme_floats_round_trip() {
    let sdl = assert_round_trips("type Query { f(a: Float = 1e300, b: Float = -5e-324, c: Float = 0.1): Int }");
    assert!(sdl.contains("a: Float = 1e300"), "{sdl}");
}

#[test]
fn custom_indent() {
    let document = parse_doc("type Query { a: Int }");
    assert_eq!(document.to_sdl_with_indent("\t"), "type Query {\n\ta: Int\n}\n");
    assert_eq!(
        SdlWriter::with_indent("    ").write_document(&document),
        "type Query {\n    a: Int\n}\n",
    );
}
