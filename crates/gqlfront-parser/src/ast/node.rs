use crate::ast::Argument;
use crate::ast::AstNode;
use crate::ast::Definition;
use crate::ast::Directive;
use crate::ast::Document;
use crate::ast::EnumValueDefinition;
use crate::ast::FieldDefinition;
use crate::ast::FromNode;
use crate::ast::InputValueDefinition;
use crate::ast::NamedType;
use crate::ast::NodeContainer;
use crate::ast::ObjectField;
use crate::ast::OperationTypeDefinition;
use crate::ast::Selection;
use crate::ast::Type;
use crate::ast::Value;
use crate::ast::VariableDefinition;
use crate::SourceLocation;
use inherent::inherent;

/// Any AST node.
///
/// The category enums ([`Definition`], [`Selection`], [`Type`], [`Value`])
/// each occupy one variant; the supporting nodes get a variant apiece. This
/// is the currency of [`AstNode::children`] and of the transform driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Argument(Argument),
    Definition(Definition),
    Directive(Directive),
    Document(Document),
    EnumValueDefinition(EnumValueDefinition),
    FieldDefinition(FieldDefinition),
    InputValueDefinition(InputValueDefinition),
    ObjectField(ObjectField),
    OperationTypeDefinition(OperationTypeDefinition),
    Selection(Selection),
    Type(Type),
    Value(Value),
    VariableDefinition(VariableDefinition),
}

macro_rules! dispatch {
    ($node:expr, $inner:ident => $body:expr) => {
        match $node {
            Node::Argument($inner) => $body,
            Node::Definition($inner) => $body,
            Node::Directive($inner) => $body,
            Node::Document($inner) => $body,
            Node::EnumValueDefinition($inner) => $body,
            Node::FieldDefinition($inner) => $body,
            Node::InputValueDefinition($inner) => $body,
            Node::ObjectField($inner) => $body,
            Node::OperationTypeDefinition($inner) => $body,
            Node::Selection($inner) => $body,
            Node::Type($inner) => $body,
            Node::Value($inner) => $body,
            Node::VariableDefinition($inner) => $body,
        }
    };
}

macro_rules! rebuild_dispatch {
    ($node:expr, $container:expr, [$($variant:ident),* $(,)?]) => {
        match $node {
            $(Node::$variant(inner) => Node::$variant(inner.rebuild($container)),)*
        }
    };
}

#[inherent]
impl AstNode for Node {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        dispatch!(self, inner => inner.source_location())
    }

    pub fn children(&self) -> Vec<Node> {
        dispatch!(self, inner => inner.children())
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        rebuild_dispatch!(self, container, [
            Argument,
            Definition,
            Directive,
            Document,
            EnumValueDefinition,
            FieldDefinition,
            InputValueDefinition,
            ObjectField,
            OperationTypeDefinition,
            Selection,
            Type,
            Value,
            VariableDefinition,
        ])
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// Conversions
// =========================================================

macro_rules! node_conversions {
    ($($variant:ident),* $(,)?) => {
        $(
            impl FromNode for $variant {
                fn from_node(node: Node) -> Result<Self, Node> {
                    match node {
                        Node::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl From<$variant> for Node {
                fn from(inner: $variant) -> Self {
                    Node::$variant(inner)
                }
            }
        )*
    };
}

node_conversions!(
    Argument,
    Definition,
    Directive,
    Document,
    EnumValueDefinition,
    FieldDefinition,
    InputValueDefinition,
    ObjectField,
    OperationTypeDefinition,
    Selection,
    Type,
    Value,
    VariableDefinition,
);

/// Union members and type conditions are stored as bare named types but
/// travel as `Node::Type`.
impl FromNode for NamedType {
    fn from_node(node: Node) -> Result<Self, Node> {
        match node {
            Node::Type(Type::Named(named)) => Ok(named),
            other => Err(other),
        }
    }
}
