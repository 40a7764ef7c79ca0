//! Scanner, parser, immutable AST, and SDL writer for GraphQL documents.
//!
//! Parsing never panics or returns a raw error: every entry point on
//! [`GraphQLParser`] yields a [`GraphQLResult`] that either holds the parsed
//! value or a single parse-stage [`Issue`].
//!
//! ```
//! use gqlfront_parser::GraphQLParser;
//!
//! let result = GraphQLParser::new("query Hero { hero { name } }").parse_document();
//! assert!(result.is_ok());
//!
//! let result = GraphQLParser::new("query Hero { hero { name }").parse_document();
//! assert_eq!(result.issues().len(), 1);
//! ```

pub mod ast;
mod graphql_parse_error;
mod graphql_parse_error_kind;
mod graphql_parser;
mod graphql_result;
mod graphql_token_stream;
mod issue;
pub mod scanner;
pub mod sdl;
mod source_location;
pub mod token;

pub use graphql_parse_error::GraphQLParseError;
pub use graphql_parse_error_kind::GraphQLParseErrorKind;
pub use graphql_parser::GraphQLParser;
pub use graphql_parser::ParserOptions;
pub use graphql_result::GraphQLResult;
pub use issue::check_valid_graphql;
pub use issue::has_errors;
pub use issue::GraphQLValidationFailure;
pub use issue::Issue;
pub use issue::IssueCategory;
pub use issue::IssueKind;
pub use issue::IssueNote;
pub use issue::IssueNoteKind;
pub use issue::IssueNotes;
pub use issue::Severity;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_location::SourceLocation;

#[cfg(test)]
mod tests;
