use crate::Schema;
use gqlfront_parser::ast;
use std::fmt;
use std::str::FromStr;

/// A [schema coordinate](https://spec.graphql.org/September2025/#sec-Schema-Coordinates)
/// naming one element of a schema.
///
/// ```
/// use gqlfront_core::SchemaCoordinate;
///
/// let coordinate: SchemaCoordinate = "User.friends(first:)".parse().unwrap();
/// assert_eq!(
///     coordinate,
///     SchemaCoordinate::Argument {
///         type_name: "User".to_string(),
///         field: "friends".to_string(),
///         argument: "first".to_string(),
///     },
/// );
/// assert_eq!(coordinate.to_string(), "User.friends(first:)");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(tag = "kind")]
pub enum SchemaCoordinate {
    /// `Type`
    Type { name: String },

    /// `Type.field`, which also names input fields and enum values.
    Field { type_name: String, field: String },

    /// `Type.field(argument:)`
    Argument {
        type_name: String,
        field: String,
        argument: String,
    },

    /// `@directive`
    Directive { name: String },

    /// `@directive(argument:)`
    DirectiveArgument { directive: String, argument: String },
}

/// The schema element a [`SchemaCoordinate`] resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResolvedCoordinate<'a> {
    Type(&'a ast::TypeDefinition),
    Field(&'a ast::FieldDefinition),
    InputField(&'a ast::InputValueDefinition),
    EnumValue(&'a ast::EnumValueDefinition),
    Argument(&'a ast::InputValueDefinition),
    Directive(&'a ast::DirectiveDefinition),
    DirectiveArgument(&'a ast::InputValueDefinition),
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, thiserror::Error)]
pub enum CoordinateError {
    #[error("`{0}` is not a valid schema coordinate")]
    InvalidFormat(String),

    #[error("type `{0}` is not defined")]
    UnknownType(String),

    #[error("`{type_name}` has no field, input field, or enum value named `{member}`")]
    UnknownMember { type_name: String, member: String },

    #[error("`{type_name}` is a {kind_name}, which has no fields or values")]
    NoMembers {
        type_name: String,
        kind_name: &'static str,
    },

    #[error("`{coordinate}` has no argument `{argument}`")]
    UnknownArgument { coordinate: String, argument: String },

    #[error("directive `@{0}` is not defined")]
    UnknownDirective(String),
}

impl SchemaCoordinate {
    /// Looks this coordinate up in `schema`.
    pub fn resolve<'a>(&self, schema: &'a Schema) -> Result<ResolvedCoordinate<'a>, CoordinateError> {
        match self {
            Self::Type { name } => schema
                .type_definition(name)
                .map(ResolvedCoordinate::Type)
                .ok_or_else(|| CoordinateError::UnknownType(name.clone())),
            Self::Field { type_name, field } => resolve_member(schema, type_name, field),
            Self::Argument {
                type_name,
                field,
                argument,
            } => {
                let definition = schema
                    .type_definition(type_name)
                    .ok_or_else(|| CoordinateError::UnknownType(type_name.clone()))?;
                let field_definition = definition.field(field).ok_or_else(|| CoordinateError::UnknownMember {
                    type_name: type_name.clone(),
                    member: field.clone(),
                })?;
                field_definition
                    .argument(argument)
                    .map(ResolvedCoordinate::Argument)
                    .ok_or_else(|| CoordinateError::UnknownArgument {
                        coordinate: format!("{type_name}.{field}"),
                        argument: argument.clone(),
                    })
            },
            Self::Directive { name } => schema
                .directive_definition(name)
                .map(ResolvedCoordinate::Directive)
                .ok_or_else(|| CoordinateError::UnknownDirective(name.clone())),
            Self::DirectiveArgument { directive, argument } => schema
                .directive_definition(directive)
                .ok_or_else(|| CoordinateError::UnknownDirective(directive.clone()))?
                .argument(argument)
                .map(ResolvedCoordinate::DirectiveArgument)
                .ok_or_else(|| CoordinateError::UnknownArgument {
                    coordinate: format!("@{directive}"),
                    argument: argument.clone(),
                }),
        }
    }
}

fn resolve_member<'a>(
    schema: &'a Schema,
    type_name: &str,
    member: &str,
) -> Result<ResolvedCoordinate<'a>, CoordinateError> {
    let unknown = || CoordinateError::UnknownMember {
        type_name: type_name.to_string(),
        member: member.to_string(),
    };
    match schema.type_definition(type_name) {
        None => Err(CoordinateError::UnknownType(type_name.to_string())),
        Some(ast::TypeDefinition::Enum(enum_type)) => enum_type
            .values
            .iter()
            .find(|value| value.name == member)
            .map(ResolvedCoordinate::EnumValue)
            .ok_or_else(unknown),
        Some(ast::TypeDefinition::InputObject(input_object)) => input_object
            .fields
            .iter()
            .find(|field| field.name == member)
            .map(ResolvedCoordinate::InputField)
            .ok_or_else(unknown),
        Some(definition @ (ast::TypeDefinition::Scalar(_) | ast::TypeDefinition::Union(_))) => {
            Err(CoordinateError::NoMembers {
                type_name: type_name.to_string(),
                kind_name: definition.kind_name(),
            })
        },
        Some(definition) => definition.field(member).map(ResolvedCoordinate::Field).ok_or_else(unknown),
    }
}

fn is_name(input: &str) -> bool {
    let mut chars = input.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Splits `head(argument:)` into `head` and `argument`.
fn split_argument(input: &str) -> Option<(&str, Option<&str>)> {
    let Some((head, rest)) = input.split_once('(') else {
        return Some((input, None));
    };
    let (argument, ")") = rest.split_once(':')? else {
        return None;
    };
    Some((head, Some(argument)))
}

impl FromStr for SchemaCoordinate {
    type Err = CoordinateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || CoordinateError::InvalidFormat(input.to_string());
        let (head, argument) = split_argument(input.trim()).ok_or_else(invalid)?;
        if argument.is_some_and(|argument| !is_name(argument)) {
            return Err(invalid());
        }
        let argument = argument.map(str::to_string);

        if let Some(directive) = head.strip_prefix('@') {
            if !is_name(directive) {
                return Err(invalid());
            }
            let directive = directive.to_string();
            return Ok(match argument {
                Some(argument) => Self::DirectiveArgument { directive, argument },
                None => Self::Directive { name: directive },
            });
        }

        match (head.split_once('.'), argument) {
            (None, None) if is_name(head) => Ok(Self::Type {
                name: head.to_string(),
            }),
            (Some((type_name, field)), None) if is_name(type_name) && is_name(field) => Ok(Self::Field {
                type_name: type_name.to_string(),
                field: field.to_string(),
            }),
            (Some((type_name, field)), Some(argument)) if is_name(type_name) && is_name(field) => {
                Ok(Self::Argument {
                    type_name: type_name.to_string(),
                    field: field.to_string(),
                    argument,
                })
            },
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SchemaCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { name } => write!(f, "{name}"),
            Self::Field { type_name, field } => write!(f, "{type_name}.{field}"),
            Self::Argument {
                type_name,
                field,
                argument,
            } => write!(f, "{type_name}.{field}({argument}:)"),
            Self::Directive { name } => write!(f, "@{name}"),
            Self::DirectiveArgument { directive, argument } => write!(f, "@{directive}({argument}:)"),
        }
    }
}
