//! Definitions every schema gets for free: the builtin scalars, the builtin
//! directives, and the introspection types.

use gqlfront_parser::ast;
use gqlfront_parser::GraphQLParser;
use gqlfront_parser::ParserOptions;
use std::sync::OnceLock;

/// Directives defined by [`builtin_definitions()`].
pub const BUILTIN_DIRECTIVE_NAMES: [&str; 6] =
    ["skip", "include", "deprecated", "specifiedBy", "defer", "link"];

const BUILTIN_SDL: &str = r#"
scalar Int
scalar Float
scalar String
scalar Boolean
scalar ID

"An import entry of `@link`: either a name or `{ name: ..., as: ... }`."
scalar link__Import

directive @skip(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT

directive @include(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT

directive @deprecated(
  reason: String = "No longer supported"
) on FIELD_DEFINITION | ARGUMENT_DEFINITION | INPUT_FIELD_DEFINITION | ENUM_VALUE

directive @specifiedBy(url: String!) on SCALAR

directive @defer(if: Boolean! = true, label: String) on FRAGMENT_SPREAD | INLINE_FRAGMENT

directive @link(url: String!, as: String, import: [link__Import]) repeatable on SCHEMA

type __Schema {
  description: String
  types: [__Type!]!
  queryType: __Type!
  mutationType: __Type
  subscriptionType: __Type
  directives: [__Directive!]!
}

type __Type {
  kind: __TypeKind!
  name: String
  description: String
  specifiedByURL: String
  fields(includeDeprecated: Boolean = false): [__Field!]
  interfaces: [__Type!]
  possibleTypes: [__Type!]
  enumValues(includeDeprecated: Boolean = false): [__EnumValue!]
  inputFields(includeDeprecated: Boolean = false): [__InputValue!]
  ofType: __Type
}

enum __TypeKind {
  SCALAR
  OBJECT
  INTERFACE
  UNION
  ENUM
  INPUT_OBJECT
  LIST
  NON_NULL
}

type __Field {
  name: String!
  description: String
  args(includeDeprecated: Boolean = false): [__InputValue!]!
  type: __Type!
  isDeprecated: Boolean!
  deprecationReason: String
}

type __InputValue {
  name: String!
  description: String
  type: __Type!
  defaultValue: String
  isDeprecated: Boolean!
  deprecationReason: String
}

type __EnumValue {
  name: String!
  description: String
  isDeprecated: Boolean!
  deprecationReason: String
}

type __Directive {
  name: String!
  description: String
  locations: [__DirectiveLocation!]!
  args(includeDeprecated: Boolean = false): [__InputValue!]!
  isRepeatable: Boolean!
}

enum __DirectiveLocation {
  QUERY
  MUTATION
  SUBSCRIPTION
  FIELD
  FRAGMENT_DEFINITION
  FRAGMENT_SPREAD
  INLINE_FRAGMENT
  VARIABLE_DEFINITION
  SCHEMA
  SCALAR
  OBJECT
  FIELD_DEFINITION
  ARGUMENT_DEFINITION
  INTERFACE
  UNION
  ENUM
  ENUM_VALUE
  INPUT_OBJECT
  INPUT_FIELD_DEFINITION
}
"#;

/// The builtin scalars, directives, and introspection types, parsed once
/// and shared.
pub fn builtin_definitions() -> &'static [ast::Definition] {
    static BUILTINS: OnceLock<Vec<ast::Definition>> = OnceLock::new();
    BUILTINS.get_or_init(|| parse_embedded(BUILTIN_SDL, "<builtin>"))
}

/// Parses SDL text compiled into the crate.
pub(crate) fn parse_embedded(source: &str, file_path: &'static str) -> Vec<ast::Definition> {
    let options = ParserOptions::new().file_path(file_path);
    let result = GraphQLParser::with_options(source, options).parse_document();
    debug_assert!(!result.has_errors(), "{}", result.format_issues(Some(source)));
    log::trace!("parsed embedded definitions from {file_path}");
    result
        .into_value()
        .map(|document| document.definitions)
        .unwrap_or_default()
}

const META_FIELDS_SDL: &str = r#"
type __MetaFields {
  __typename: String!
  __schema: __Schema!
  __type(name: String!): __Type
}
"#;

/// The implicit `__typename`, `__schema`, and `__type` fields, which no type
/// declares but selections may still name.
pub(crate) fn meta_field(name: &str) -> Option<&'static ast::FieldDefinition> {
    static FIELDS: OnceLock<Vec<ast::FieldDefinition>> = OnceLock::new();
    FIELDS
        .get_or_init(|| {
            parse_embedded(META_FIELDS_SDL, "<builtin>")
                .into_iter()
                .find_map(|definition| match definition {
                    ast::Definition::Type(ast::TypeDefinition::Object(object)) => Some(object.fields),
                    _ => None,
                })
                .unwrap_or_default()
        })
        .iter()
        .find(|field| field.name == name)
}
