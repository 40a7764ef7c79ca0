//! Supporting nodes shared by executable and type-system definitions.

use crate::ast::AstNode;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::ast::OperationKind;
use crate::ast::Type;
use crate::ast::Value;
use crate::SourceLocation;
use inherent::inherent;

fn directive_nodes(directives: &[Directive]) -> impl Iterator<Item = Node> + '_ {
    directives.iter().cloned().map(Node::Directive)
}

// =========================================================
// Argument
// =========================================================

/// `name: value` inside a field or directive application.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for Argument {
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

// =========================================================
// Directive
// =========================================================

/// A directive application, e.g. `@include(if: $flag)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub source_location: Option<SourceLocation>,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

#[inherent]
impl AstNode for Directive {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        self.arguments.iter().cloned().map(Node::Argument).collect()
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            name: self.name.clone(),
            arguments: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// VariableDefinition
// =========================================================

/// `$name: Type = default @directives` in an operation's variable list.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub var_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for VariableDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children = vec![Node::Type(self.var_type.clone())];
        children.extend(self.default_value.iter().cloned().map(Node::Value));
        children.extend(directive_nodes(&self.directives));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            name: self.name.clone(),
            var_type: container.take_single().unwrap_or_else(|| self.var_type.clone()),
            default_value: container.take_single(),
            directives: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// InputValueDefinition
// =========================================================

/// An argument definition or an input-object field definition.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub value_type: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

impl InputValueDefinition {
    /// A non-null input value without a default must always be supplied.
    pub fn is_required(&self) -> bool {
        self.value_type.is_non_null() && self.default_value.is_none()
    }
}

#[inherent]
impl AstNode for InputValueDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children = vec![Node::Type(self.value_type.clone())];
        children.extend(self.default_value.iter().cloned().map(Node::Value));
        children.extend(directive_nodes(&self.directives));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            name: self.name.clone(),
            value_type: container.take_single().unwrap_or_else(|| self.value_type.clone()),
            default_value: container.take_single(),
            directives: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// FieldDefinition
// =========================================================

/// A field of an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: Type,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

impl FieldDefinition {
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

#[inherent]
impl AstNode for FieldDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = self
            .arguments
            .iter()
            .cloned()
            .map(Node::InputValueDefinition)
            .collect();
        children.push(Node::Type(self.field_type.clone()));
        children.extend(directive_nodes(&self.directives));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            name: self.name.clone(),
            arguments: container.take(),
            field_type: container.take_single().unwrap_or_else(|| self.field_type.clone()),
            directives: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// EnumValueDefinition
// =========================================================

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for EnumValueDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        directive_nodes(&self.directives).collect()
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            name: self.name.clone(),
            directives: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// OperationTypeDefinition
// =========================================================

/// `query: Query` inside a schema definition or extension.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationTypeDefinition {
    pub operation_kind: OperationKind,
    pub named_type: String,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for OperationTypeDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    pub fn rebuild(&self, _container: &mut NodeContainer) -> Self {
        self.clone()
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}
