//! Token types produced by the [`Scanner`](crate::scanner::Scanner).

mod graphql_token;
mod graphql_token_kind;

pub use graphql_token::GraphQLToken;
pub use graphql_token_kind::GraphQLTokenKind;
