//! Tests for successful parses through `GraphQLParser`.

use crate::ast;
use crate::tests::utils::parse_doc;
use crate::tests::utils::parse_doc_without_locations;
use crate::tests::utils::single_object;
use crate::tests::utils::single_operation;
use crate::GraphQLParser;
use crate::ParserOptions;

// =============================================================================
// Type-system definitions
// =============================================================================

/// A one-field object type parses into a single object definition with a
/// nullable `String` field.
#[test]
fn parses_simple_object_type() {
    let document = parse_doc("type Query { hero: String }");
    let object = single_object(&document);
    assert_eq!(object.name, "Query");
    assert_eq!(object.fields.len(), 1);
    assert_eq!(object.fields[0].name, "hero");
    assert_eq!(object.fields[0].field_type.to_string(), "String");
    assert!(object.fields[0].arguments.is_empty());
}

#[test]
fn parses_descriptions() {
    let document = parse_doc(
        r#"
        """
        The root.
        """
        type Query {
          "Who saves the day."
          hero(
            "Which film."
            episode: Episode = NEWHOPE
          ): Character
        }
        "#,
    );
    let object = single_object(&document);
    assert_eq!(object.description.as_deref(), Some("The root."));
    let hero = &object.fields[0];
    assert_eq!(hero.description.as_deref(), Some("Who saves the day."));
    assert_eq!(hero.arguments[0].description.as_deref(), Some("Which film."));
    assert!(matches!(
        &hero.arguments[0].default_value,
        Some(ast::Value::Enum(ast::EnumValue { value, .. })) if value == "NEWHOPE",
    ));
}

#[test]
fn parses_every_type_definition_kind() {
    let document = parse_doc(
        r#"
        scalar Date @specifiedBy(url: "https://example.com/date")
        interface Node { id: ID! }
        interface Entity implements Node { id: ID! }
        type User implements Node & Entity @key { id: ID! friends: [User!]! }
        union SearchResult = | User | Post
        enum Color { RED GREEN @deprecated }
        input Filter { color: Color = RED, limit: Int! = 10 }
        "#,
    );
    let kinds: Vec<&str> = document
        .definitions
        .iter()
        .map(|definition| match definition {
            ast::Definition::Type(def) => def.kind_name(),
            other => panic!("unexpected definition {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["scalar", "interface", "interface", "object", "union", "enum", "input object"],
    );

    let ast::Definition::Type(user) = &document.definitions[3] else { unreachable!() };
    assert_eq!(user.implements_interfaces(), &["Node".to_string(), "Entity".to_string()]);
    assert_eq!(user.directives()[0].name, "key");
    let friends = user.field("friends").unwrap();
    assert_eq!(friends.field_type.to_string(), "[User!]!");
    assert_eq!(friends.field_type.innermost_name(), "User");

    let ast::Definition::Type(ast::TypeDefinition::Union(union)) = &document.definitions[4] else {
        unreachable!()
    };
    let members: Vec<&str> = union.member_types.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(members, vec!["User", "Post"]);
}

#[test]
fn parses_schema_and_directive_definitions() {
    let document = parse_doc(
        r#"
        schema @link(url: "https://example.com/cache/v0.1") {
          query: RootQuery
          mutation: RootMutation
        }
        directive @cached(ttl: Int = 60) repeatable on | FIELD_DEFINITION | OBJECT
        "#,
    );
    let ast::Definition::Schema(schema) = &document.definitions[0] else { unreachable!() };
    assert_eq!(schema.root_type_name(ast::OperationKind::Query), Some("RootQuery"));
    assert_eq!(schema.root_type_name(ast::OperationKind::Mutation), Some("RootMutation"));
    assert_eq!(schema.root_type_name(ast::OperationKind::Subscription), None);
    assert_eq!(schema.directives[0].name, "link");

    let ast::Definition::Directive(directive) = &document.definitions[1] else { unreachable!() };
    assert_eq!(directive.name, "cached");
    assert!(directive.repeatable);
    assert_eq!(
        directive.locations,
        vec![ast::DirectiveLocation::FieldDefinition, ast::DirectiveLocation::Object],
    );
    assert!(directive.argument("ttl").is_some());
}

#[test]
fn parses_extensions() {
    let document = parse_doc(
        r#"
        extend schema @link(url: "https://example.com/cache/v0.1")
        extend type Query implements Node { extra: Int }
        extend union SearchResult = Comment
        extend enum Color { BLUE }
        extend input Filter { offset: Int }
        extend scalar Date @specifiedBy(url: "x")
        "#,
    );
    assert!(matches!(document.definitions[0], ast::Definition::SchemaExtension(_)));
    let names: Vec<&str> = document
        .definitions
        .iter()
        .skip(1)
        .map(|definition| match definition {
            ast::Definition::TypeExtension(ext) => ext.name(),
            other => panic!("unexpected definition {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["Query", "SearchResult", "Color", "Filter", "Date"]);
}

/// Keywords are only keywords in context; they are ordinary names elsewhere.
#[test]
fn keywords_usable_as_names() {
    let document = parse_doc("type type { query: on, fragment(on: Boolean): extend }");
    let object = single_object(&document);
    assert_eq!(object.name, "type");
    let names: Vec<&str> = object.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["query", "fragment"]);
}

// =============================================================================
// Executable definitions
// =============================================================================

#[test]
fn parses_query_shorthand() {
    let document = parse_doc("{ hero { name } }");
    let operation = single_operation(&document);
    assert_eq!(operation.operation_kind, ast::OperationKind::Query);
    assert_eq!(operation.name, None);
    let ast::Selection::Field(hero) = &operation.selections[0] else { unreachable!() };
    assert_eq!(hero.name, "hero");
    assert_eq!(hero.selections.len(), 1);
}

#[test]
fn parses_named_operation_with_variables() {
    let document = parse_doc(
        r#"
        mutation Like($id: ID!, $times: Int = 1 @deprecated, $tags: [String!]) @audit {
          like(storyId: $id, times: $times) { likeCount }
        }
        "#,
    );
    let operation = single_operation(&document);
    assert_eq!(operation.operation_kind, ast::OperationKind::Mutation);
    assert_eq!(operation.name.as_deref(), Some("Like"));
    assert_eq!(operation.variable_definitions.len(), 3);

    let times = &operation.variable_definitions[1];
    assert_eq!(times.name, "times");
    assert_eq!(times.var_type.to_string(), "Int");
    assert!(matches!(times.default_value, Some(ast::Value::Int(ast::IntValue { value: 1, .. }))));
    assert_eq!(times.directives[0].name, "deprecated");
    assert_eq!(operation.directives[0].name, "audit");

    let ast::Selection::Field(like) = &operation.selections[0] else { unreachable!() };
    assert!(matches!(
        &like.arguments[0].value,
        ast::Value::Variable(ast::VariableValue { name, .. }) if name == "id",
    ));
}

#[test]
fn parses_fragments_and_aliases() {
    let document = parse_doc(
        r#"
        query {
          leader: hero { ...HeroFields @include(if: true) }
          ... on Query { version }
          ... @skip(if: false) { version }
        }
        fragment HeroFields on Character { id name }
        "#,
    );
    assert_eq!(document.operations().count(), 1);
    let fragment = document.fragments().next().unwrap();
    assert_eq!(fragment.name, "HeroFields");
    assert_eq!(fragment.type_condition.name, "Character");

    let operation = document.operations().next().unwrap();
    let ast::Selection::Field(leader) = &operation.selections[0] else { unreachable!() };
    assert_eq!(leader.response_key(), "leader");
    assert_eq!(leader.name, "hero");
    let ast::Selection::FragmentSpread(spread) = &leader.selections[0] else { unreachable!() };
    assert_eq!(spread.name, "HeroFields");
    assert_eq!(spread.directives[0].name, "include");

    let ast::Selection::InlineFragment(typed) = &operation.selections[1] else { unreachable!() };
    assert_eq!(typed.type_condition.as_ref().map(|t| t.name.as_str()), Some("Query"));
    let ast::Selection::InlineFragment(untyped) = &operation.selections[2] else { unreachable!() };
    assert!(untyped.type_condition.is_none());
    assert_eq!(untyped.selections[0].directives().len(), 0);
}

#[test]
fn mixed_document_keeps_definition_order() {
    let document = parse_doc("type Query { a: Int } { a } fragment F on Query { a }");
    let executable: Vec<bool> = document.definitions.iter().map(|d| d.is_executable()).collect();
    assert_eq!(executable, vec![false, true, true]);
    assert_eq!(document.type_system_definitions().count(), 1);
    assert_eq!(document.definitions[2].name(), Some("F"));
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn parses_every_value_kind() {
    let value = GraphQLParser::new(r#"{ i: -3, f: 2.5, s: "x", b: true, n: null, e: RED, l: [1, $v], o: {} }"#)
        .parse_value()
        .into_value()
        .unwrap();
    let ast::Value::Object(object) = value else { panic!("expected an object") };
    let kinds: Vec<&str> = object.fields.iter().map(|f| f.value.kind_name()).collect();
    assert_eq!(
        kinds,
        vec!["Int", "Float", "String", "Boolean", "null", "enum value", "list", "object"],
    );
}

#[test]
fn same_value_ignores_locations() {
    let a = GraphQLParser::new("[1, {x: $y}]").parse_value().into_value().unwrap();
    let b = GraphQLParser::new("  [1,{ x:$y }]").parse_value().into_value().unwrap();
    assert_ne!(a, b);
    assert!(a.same_value(&b));
    let c = GraphQLParser::new("[1, {x: $z}]").parse_value().into_value().unwrap();
    assert!(!a.same_value(&c));
}

// =============================================================================
// Other entry points
// =============================================================================

#[test]
fn parse_type_entry_point() {
    let ty = GraphQLParser::new("[[Int!]]!").parse_type().into_value().unwrap();
    assert_eq!(ty.to_string(), "[[Int!]]!");
    assert!(ty.is_non_null());
    assert_eq!(ty.nullable().to_string(), "[[Int!]]");

    let result = GraphQLParser::new("[Int").parse_type();
    assert!(result.has_errors());
}

#[test]
fn parse_selections_accepts_braced_bare_and_empty() {
    let braced = GraphQLParser::new("{ id name }").parse_selections().into_value().unwrap();
    let bare = GraphQLParser::new("id name").parse_selections().into_value().unwrap();
    assert_eq!(braced.len(), 2);
    assert_eq!(bare.len(), 2);

    let empty = GraphQLParser::new("  ").parse_selections().into_value().unwrap();
    assert!(empty.is_empty());
}

// =============================================================================
// Options and locations
// =============================================================================

#[test]
fn empty_document_allowed_by_option() {
    let options = ParserOptions::new().allow_empty_documents(true);
    let document = GraphQLParser::with_options("# nothing\n", options)
        .parse_document()
        .into_value()
        .unwrap();
    assert!(document.definitions.is_empty());
}

#[test]
fn records_source_locations() {
    let document = parse_doc("type Query {\n  hero: String\n}");
    let object = single_object(&document);
    let field_location = object.fields[0].source_location().unwrap();
    assert_eq!((field_location.line, field_location.column), (2, 3));
    assert_eq!(field_location.start, 15);
    assert_eq!(field_location.end, 27);

    let document_location = document.source_location().unwrap();
    assert_eq!(document_location.start, 0);
}

#[test]
fn file_path_flows_into_locations() {
    let options = ParserOptions::new().file_path("schema.graphql");
    let document = GraphQLParser::with_options("scalar Date", options)
        .parse_document()
        .into_value()
        .unwrap();
    let location = document.definitions[0].source_location().unwrap();
    assert_eq!(location.file_path.as_deref(), Some("schema.graphql"));
}

#[test]
fn locations_can_be_disabled() {
    let document = parse_doc_without_locations("type Query { hero: String }");
    assert!(document.source_location().is_none());
    assert!(single_object(&document).fields[0].source_location().is_none());

    // Without locations, whitespace differences disappear.
    assert_eq!(document, parse_doc_without_locations("type   Query{hero:String}"));
}

/// Nesting up to the recursion limit is accepted.
#[test]
fn moderate_nesting_is_accepted() {
    let depth = 40;
    let source = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    assert!(GraphQLParser::new(&source).parse_value().is_ok());
}
