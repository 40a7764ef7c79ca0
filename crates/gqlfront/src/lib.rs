//! A GraphQL language frontend.
//!
//! Parse schemas and executable documents, build a validated [`Schema`], and
//! validate operations against it:
//!
//! ```
//! use gqlfront::parser::GraphQLParser;
//! use gqlfront::ExecutableValidator;
//! use gqlfront::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new()
//!     .load_str(Some("schema.graphql"), "type Query { hero(id: ID!): String }")
//!     .build()
//!     .value_or_error()
//!     .unwrap();
//! let document = GraphQLParser::new("query Hero { hero }").parse_document().into_value().unwrap();
//!
//! let result = ExecutableValidator::new(&schema).validate(&document);
//! assert!(result.has_errors());
//! ```

pub use gqlfront_core::*;

/// Scanner, parser, AST, and SDL writer (re-exported from
/// `gqlfront-parser`).
pub mod parser {
    pub use gqlfront_parser::*;
}
