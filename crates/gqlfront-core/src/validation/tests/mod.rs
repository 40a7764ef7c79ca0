mod concurrency_tests;
mod defer_tests;
mod fields_can_merge_tests;

use crate::ExecutableValidationResult;
use crate::ExecutableValidator;
use crate::Schema;
use crate::SchemaBuilder;
use gqlfront_parser::ast;
use gqlfront_parser::GraphQLParser;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use std::sync::OnceLock;

const SCHEMA_SDL: &str = r#"
type Query {
  hero(episode: Episode): Character
  user(id: ID!): User
  users(first: Int = 10, filter: UserFilter): [User!]!
  pet: Pet
  search(text: String!): [SearchResult]
  foo: Foo
  oldField: String @deprecated(reason: "Use `hero`.")
}

type Mutation {
  rename(id: ID!, name: String!): User
  createUser(input: NewUser!): User
}

type Subscription {
  userChanged: User
}

enum Episode { NEWHOPE EMPIRE JEDI @deprecated }

interface Character {
  id: ID!
  name: String
  friends: [Character]
}

type Human implements Character {
  id: ID!
  name: String
  friends: [Character]
  height: Float
}

type Droid implements Character {
  id: ID!
  name: String
  friends: [Character]
  primaryFunction: String
}

type User {
  id: ID!
  name: String
  friends(first: Int): [User]
}

union SearchResult = Human | Droid | User

interface Pet { nickname: String }

type Dog implements Pet {
  nickname: String!
  barks: Boolean
  tag: String
}

type Cat implements Pet {
  nickname: String
  meows: Boolean
  tag: Int
}

type Foo { x: Int y: Int }

enum Role { ADMIN MEMBER }

input UserFilter {
  name: String
  role: Role! = MEMBER
}

input NewUser {
  name: String!
  tags: [String!]
  birthday: Date
}

scalar Date
"#;

/// The schema shared by every validation test.
pub(super) fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let (schema, issues) = SchemaBuilder::new().load_str(None, SCHEMA_SDL).build().into_parts();
        match schema {
            Some(schema) => schema,
            None => panic!("test schema failed to build:\n{issues:#?}"),
        }
    })
}

pub(super) fn parse(source: &str) -> ast::Document {
    let result = GraphQLParser::new(source).parse_document();
    let issues = result.format_issues(Some(source));
    result.into_value().unwrap_or_else(|| panic!("{issues}"))
}

pub(super) fn validate(source: &str) -> ExecutableValidationResult {
    ExecutableValidator::new(schema()).validate(&parse(source))
}

/// Kinds of the error-severity issues, in order.
pub(super) fn error_kinds(issues: &[Issue]) -> Vec<IssueKind> {
    issues
        .iter()
        .filter(|issue| issue.is_error())
        .map(Issue::kind)
        .collect()
}

pub(super) fn issues_of_kind(issues: &[Issue], kind: IssueKind) -> Vec<&Issue> {
    issues.iter().filter(|issue| issue.kind() == kind).collect()
}
