//! Validation of operations and fragments against a built
//! [`Schema`](crate::Schema), plus the input-value coercion it shares with
//! schema building.

mod arguments;
mod defer;
mod executable_validator;
mod fields_can_merge;
mod value_coercion;
mod variables;

pub(crate) use arguments::validate_arguments;
pub(crate) use arguments::validate_directives;
pub use executable_validator::ExecutableValidationResult;
pub use executable_validator::ExecutableValidator;
pub use value_coercion::coerce_value;
pub use value_coercion::CoercionContext;
pub use value_coercion::ValueCoercer;
pub use value_coercion::VariableUsage;

#[cfg(test)]
mod tests;
