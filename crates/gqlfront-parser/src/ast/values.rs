use crate::ast::AstNode;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::SourceLocation;
use inherent::inherent;

// =========================================================
// Value enum
// =========================================================

/// A GraphQL input value: a variable reference or a literal.
///
/// See [Input Values](https://spec.graphql.org/September2025/#sec-Input-Values).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(BooleanValue),
    Enum(EnumValue),
    Float(FloatValue),
    Int(IntValue),
    List(ListValue),
    Null(NullValue),
    Object(ObjectValue),
    String(StringValue),
    Variable(VariableValue),
}

impl Value {
    /// A short description of the literal's kind for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "Boolean",
            Self::Enum(_) => "enum value",
            Self::Float(_) => "Float",
            Self::Int(_) => "Int",
            Self::List(_) => "list",
            Self::Null(_) => "null",
            Self::Object(_) => "object",
            Self::String(_) => "String",
            Self::Variable(_) => "variable",
        }
    }

    /// Structural equality that ignores source locations.
    ///
    /// Lists compare element-wise, objects compare by field name regardless
    /// of field order, and variables compare by name.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.value == b.value,
            (Self::Enum(a), Self::Enum(b)) => a.value == b.value,
            (Self::Float(a), Self::Float(b)) => a.value == b.value,
            (Self::Int(a), Self::Int(b)) => a.value == b.value,
            (Self::Null(_), Self::Null(_)) => true,
            (Self::String(a), Self::String(b)) => a.value == b.value,
            (Self::Variable(a), Self::Variable(b)) => a.name == b.name,
            (Self::List(a), Self::List(b)) => {
                a.values.len() == b.values.len()
                    && a.values.iter().zip(&b.values).all(|(x, y)| x.same_value(y))
            },
            (Self::Object(a), Self::Object(b)) => {
                a.fields.len() == b.fields.len()
                    && a.fields.iter().all(|x| {
                        b.fields
                            .iter()
                            .find(|y| y.name == x.name)
                            .is_some_and(|y| x.value.same_value(&y.value))
                    })
            },
            _ => false,
        }
    }
}

#[inherent]
impl AstNode for Value {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Boolean(v) => v.source_location.as_ref(),
            Self::Enum(v) => v.source_location.as_ref(),
            Self::Float(v) => v.source_location.as_ref(),
            Self::Int(v) => v.source_location.as_ref(),
            Self::List(v) => v.source_location.as_ref(),
            Self::Null(v) => v.source_location.as_ref(),
            Self::Object(v) => v.source_location.as_ref(),
            Self::String(v) => v.source_location.as_ref(),
            Self::Variable(v) => v.source_location.as_ref(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        match self {
            Self::List(list) => list.values.iter().cloned().map(Node::Value).collect(),
            Self::Object(object) => object.fields.iter().cloned().map(Node::ObjectField).collect(),
            _ => Vec::new(),
        }
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        match self {
            Self::List(list) => Self::List(ListValue {
                values: container.take(),
                source_location: list.source_location.clone(),
            }),
            Self::Object(object) => Self::Object(ObjectValue {
                fields: container.take(),
                source_location: object.source_location.clone(),
            }),
            scalar => scalar.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// Scalar value types
// =========================================================

/// A `$name` variable reference.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableValue {
    pub name: String,
    pub source_location: Option<SourceLocation>,
}

/// A 32-bit integer literal.
#[derive(Clone, Debug, PartialEq)]
pub struct IntValue {
    pub value: i32,
    pub source_location: Option<SourceLocation>,
}

/// A double-precision float literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatValue {
    pub value: f64,
    pub source_location: Option<SourceLocation>,
}

/// A string literal (single-quoted or block), already decoded.
#[derive(Clone, Debug, PartialEq)]
pub struct StringValue {
    pub value: String,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BooleanValue {
    pub value: bool,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NullValue {
    pub source_location: Option<SourceLocation>,
}

/// An enum literal, e.g. `RED`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub value: String,
    pub source_location: Option<SourceLocation>,
}

// =========================================================
// Composite value types
// =========================================================

/// A list literal, e.g. `[1, 2, 3]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    pub values: Vec<Value>,
    pub source_location: Option<SourceLocation>,
}

/// An input-object literal, e.g. `{ x: 1, y: 2 }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub fields: Vec<ObjectField>,
    pub source_location: Option<SourceLocation>,
}

/// One `name: value` entry of an [`ObjectValue`].
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: String,
    pub value: Value,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for ObjectField {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        vec![Node::Value(self.value.clone())]
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            name: self.name.clone(),
            value: container.take_single().unwrap_or_else(|| self.value.clone()),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}
