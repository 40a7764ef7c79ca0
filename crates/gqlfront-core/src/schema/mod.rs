//! Building a [`Schema`] from type-system documents.

mod coordinate;
mod extensions;
mod key_fields;
mod link;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod schema_validator;

pub use coordinate::CoordinateError;
pub use coordinate::ResolvedCoordinate;
pub use coordinate::SchemaCoordinate;
pub use schema::Schema;
pub use schema_builder::SchemaBuilder;

#[cfg(test)]
mod tests;
