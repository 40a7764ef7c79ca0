//! Schema building and executable-document validation on top of
//! [`gqlfront_parser`].
//!
//! A [`SchemaBuilder`] turns type-system documents into an immutable
//! [`Schema`]; an [`ExecutableValidator`] then checks operations and fragments
//! against it. Both report problems as [`Issue`]s rather than failing early,
//! so one pass surfaces every problem it can find.
//!
//! ```
//! use gqlfront_core::ExecutableValidator;
//! use gqlfront_core::SchemaBuilder;
//! use gqlfront_parser::GraphQLParser;
//!
//! let schema = SchemaBuilder::new()
//!     .load_str(None, "type Query { hero: String }")
//!     .build()
//!     .value_or_error()
//!     .unwrap();
//!
//! let document = GraphQLParser::new("query Hero { hero }")
//!     .parse_document()
//!     .into_value()
//!     .unwrap();
//! let result = ExecutableValidator::new(&schema).validate(&document);
//! assert!(result.issues.is_empty());
//! ```

mod builtins;
mod foreign_schema;
pub mod schema;
pub mod validation;

pub use builtins::builtin_definitions;
pub use builtins::BUILTIN_DIRECTIVE_NAMES;
pub use foreign_schema::ForeignSchema;
pub use schema::CoordinateError;
pub use schema::ResolvedCoordinate;
pub use schema::Schema;
pub use schema::SchemaBuilder;
pub use schema::SchemaCoordinate;
pub use validation::coerce_value;
pub use validation::CoercionContext;
pub use validation::ExecutableValidationResult;
pub use validation::ExecutableValidator;
pub use validation::ValueCoercer;
pub use validation::VariableUsage;

pub use gqlfront_parser::GraphQLResult;
pub use gqlfront_parser::Issue;
pub use gqlfront_parser::IssueKind;
