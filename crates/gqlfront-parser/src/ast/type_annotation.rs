use crate::ast::AstNode;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::SourceLocation;
use inherent::inherent;
use std::fmt;

/// A type reference such as `String`, `[ID!]`, or `User!`.
///
/// See [Type References](https://spec.graphql.org/September2025/#sec-Type-References).
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Named(NamedType),
    List(ListType),
    NonNull(NonNullType),
}

/// A bare type name.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub name: String,
    pub source_location: Option<SourceLocation>,
}

/// `[T]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListType {
    pub element_type: Box<Type>,
    pub source_location: Option<SourceLocation>,
}

/// `T!`. The parser never produces a `NonNull` directly inside another
/// `NonNull`.
#[derive(Clone, Debug, PartialEq)]
pub struct NonNullType {
    pub inner_type: Box<Type>,
    pub source_location: Option<SourceLocation>,
}

impl Type {
    /// Convenience constructor for a located-nowhere named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedType {
            name: name.into(),
            source_location: None,
        })
    }

    /// Wraps `self` in a non-null layer (no-op if already non-null).
    pub fn non_null(self) -> Self {
        match self {
            Self::NonNull(_) => self,
            other => Self::NonNull(NonNullType {
                inner_type: Box::new(other),
                source_location: None,
            }),
        }
    }

    /// The innermost named type, e.g. `User` for `[User!]!`.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(named) => &named.name,
            Self::List(list) => list.element_type.innermost_name(),
            Self::NonNull(non_null) => non_null.inner_type.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Strips one non-null layer if present.
    pub fn nullable(&self) -> &Type {
        match self {
            Self::NonNull(non_null) => &non_null.inner_type,
            other => other,
        }
    }

    /// Structural equality that ignores source locations.
    pub fn same_type(&self, other: &Type) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a.name == b.name,
            (Self::List(a), Self::List(b)) => a.element_type.same_type(&b.element_type),
            (Self::NonNull(a), Self::NonNull(b)) => a.inner_type.same_type(&b.inner_type),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => f.write_str(&named.name),
            Self::List(list) => write!(f, "[{}]", list.element_type),
            Self::NonNull(non_null) => write!(f, "{}!", non_null.inner_type),
        }
    }
}

#[inherent]
impl AstNode for Type {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Named(named) => named.source_location.as_ref(),
            Self::List(list) => list.source_location.as_ref(),
            Self::NonNull(non_null) => non_null.source_location.as_ref(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        match self {
            Self::Named(_) => Vec::new(),
            Self::List(list) => vec![Node::Type((*list.element_type).clone())],
            Self::NonNull(non_null) => vec![Node::Type((*non_null.inner_type).clone())],
        }
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        match self {
            Self::Named(named) => Self::Named(named.clone()),
            Self::List(list) => Self::List(ListType {
                element_type: Box::new(
                    container
                        .take_single()
                        .unwrap_or_else(|| (*list.element_type).clone()),
                ),
                source_location: list.source_location.clone(),
            }),
            Self::NonNull(non_null) => Self::NonNull(NonNullType {
                inner_type: Box::new(
                    container
                        .take_single()
                        .unwrap_or_else(|| (*non_null.inner_type).clone()),
                ),
                source_location: non_null.source_location.clone(),
            }),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}
