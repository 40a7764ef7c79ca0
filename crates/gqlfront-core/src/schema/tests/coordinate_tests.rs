//! Tests for schema coordinates: parsing, display, and resolution.

use crate::schema::tests::build;
use crate::CoordinateError;
use crate::ResolvedCoordinate;
use crate::Schema;
use crate::SchemaCoordinate;

fn schema() -> Schema {
    build(
        r#"
        type Query { user(id: ID!): User search(filter: Filter): [Result] }
        type User { id: ID! friends(first: Int): [User] }
        input Filter { text: String }
        enum Color { RED GREEN }
        union Result = User
        scalar Date
        directive @auth(role: String) on FIELD_DEFINITION
        "#,
    )
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn parses_every_coordinate_form() {
    let parse = |input: &str| input.parse::<SchemaCoordinate>().unwrap();
    assert_eq!(parse("User"), SchemaCoordinate::Type { name: "User".to_string() });
    assert_eq!(
        parse("User.friends"),
        SchemaCoordinate::Field {
            type_name: "User".to_string(),
            field: "friends".to_string(),
        },
    );
    assert_eq!(
        parse("User.friends(first:)"),
        SchemaCoordinate::Argument {
            type_name: "User".to_string(),
            field: "friends".to_string(),
            argument: "first".to_string(),
        },
    );
    assert_eq!(parse("@auth"), SchemaCoordinate::Directive { name: "auth".to_string() });
    assert_eq!(
        parse("@auth(role:)"),
        SchemaCoordinate::DirectiveArgument {
            directive: "auth".to_string(),
            argument: "role".to_string(),
        },
    );
}

#[test]
fn display_matches_the_parsed_text() {
    for input in ["User", "User.friends", "User.friends(first:)", "@auth", "@auth(role:)"] {
        let coordinate: SchemaCoordinate = input.parse().unwrap();
        assert_eq!(coordinate.to_string(), input);
    }
}

#[test]
fn malformed_coordinates_are_rejected() {
    for input in ["", "User.", ".id", "User.friends(first)", "User(first:)", "@", "@auth.role", "A.b.c", "1User"] {
        assert_eq!(
            input.parse::<SchemaCoordinate>(),
            Err(CoordinateError::InvalidFormat(input.to_string())),
            "{input}",
        );
    }
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn resolves_types_fields_and_arguments() {
    let schema = schema();

    let Ok(ResolvedCoordinate::Type(user)) = schema.resolve_coordinate("User") else {
        panic!("expected a type");
    };
    assert_eq!(user.name(), "User");

    let Ok(ResolvedCoordinate::Field(friends)) = schema.resolve_coordinate("User.friends") else {
        panic!("expected a field");
    };
    assert_eq!(friends.name, "friends");

    let Ok(ResolvedCoordinate::Argument(first)) = schema.resolve_coordinate("User.friends(first:)") else {
        panic!("expected an argument");
    };
    assert_eq!(first.name, "first");
}

#[test]
fn resolves_input_fields_and_enum_values() {
    let schema = schema();
    assert!(matches!(
        schema.resolve_coordinate("Filter.text"),
        Ok(ResolvedCoordinate::InputField(field)) if field.name == "text",
    ));
    assert!(matches!(
        schema.resolve_coordinate("Color.GREEN"),
        Ok(ResolvedCoordinate::EnumValue(value)) if value.name == "GREEN",
    ));
}

#[test]
fn resolves_directives_and_their_arguments() {
    let schema = schema();
    assert!(matches!(
        schema.resolve_coordinate("@auth"),
        Ok(ResolvedCoordinate::Directive(directive)) if directive.name == "auth",
    ));
    assert!(matches!(
        schema.resolve_coordinate("@deprecated(reason:)"),
        Ok(ResolvedCoordinate::DirectiveArgument(argument)) if argument.name == "reason",
    ));
}

#[test]
fn resolution_failures_describe_what_is_missing() {
    let schema = schema();
    let error = |input: &str| schema.resolve_coordinate(input).unwrap_err();

    assert_eq!(error("Missing"), CoordinateError::UnknownType("Missing".to_string()));
    assert_eq!(
        error("User.name"),
        CoordinateError::UnknownMember {
            type_name: "User".to_string(),
            member: "name".to_string(),
        },
    );
    assert_eq!(
        error("Date.value"),
        CoordinateError::NoMembers {
            type_name: "Date".to_string(),
            kind_name: "scalar",
        },
    );
    assert_eq!(
        error("Result.id").to_string(),
        "`Result` is a union, which has no fields or values",
    );
    assert_eq!(
        error("User.friends(after:)").to_string(),
        "`User.friends` has no argument `after`",
    );
    assert_eq!(error("@missing"), CoordinateError::UnknownDirective("missing".to_string()));
    assert_eq!(
        error("@auth(level:)"),
        CoordinateError::UnknownArgument {
            coordinate: "@auth".to_string(),
            argument: "level".to_string(),
        },
    );
}
