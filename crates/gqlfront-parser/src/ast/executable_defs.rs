use crate::ast::Argument;
use crate::ast::AstNode;
use crate::ast::Directive;
use crate::ast::NamedType;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::ast::OperationKind;
use crate::ast::VariableDefinition;
use crate::SourceLocation;
use inherent::inherent;

fn directive_nodes(directives: &[Directive]) -> impl Iterator<Item = Node> + '_ {
    directives.iter().cloned().map(Node::Directive)
}

fn selection_nodes(selections: &[Selection]) -> impl Iterator<Item = Node> + '_ {
    selections.iter().cloned().map(Node::Selection)
}

// =========================================================
// Operations and fragments
// =========================================================

/// A query, mutation, or subscription.
///
/// The `{ ... }` shorthand parses as an anonymous `query`.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub description: Option<String>,
    pub operation_kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for OperationDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = self
            .variable_definitions
            .iter()
            .cloned()
            .map(Node::VariableDefinition)
            .collect();
        children.extend(directive_nodes(&self.directives));
        children.extend(selection_nodes(&self.selections));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            operation_kind: self.operation_kind,
            name: self.name.clone(),
            variable_definitions: container.take(),
            directives: container.take(),
            selections: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

/// `fragment Name on Type @directives { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub description: Option<String>,
    pub name: String,
    pub type_condition: NamedType,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for FragmentDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children = vec![Node::Type(crate::ast::Type::Named(self.type_condition.clone()))];
        children.extend(directive_nodes(&self.directives));
        children.extend(selection_nodes(&self.selections));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            name: self.name.clone(),
            type_condition: container
                .take_single()
                .unwrap_or_else(|| self.type_condition.clone()),
            directives: container.take(),
            selections: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// Selections
// =========================================================

/// One entry of a selection set.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn directives(&self) -> &[Directive] {
        match self {
            Self::Field(field) => &field.directives,
            Self::FragmentSpread(spread) => &spread.directives,
            Self::InlineFragment(inline) => &inline.directives,
        }
    }
}

#[inherent]
impl AstNode for Selection {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Field(field) => field.source_location.as_ref(),
            Self::FragmentSpread(spread) => spread.source_location.as_ref(),
            Self::InlineFragment(inline) => inline.source_location.as_ref(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        match self {
            Self::Field(field) => field.children(),
            Self::FragmentSpread(spread) => spread.children(),
            Self::InlineFragment(inline) => inline.children(),
        }
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        match self {
            Self::Field(field) => Self::Field(field.rebuild(container)),
            Self::FragmentSpread(spread) => Self::FragmentSpread(spread.rebuild(container)),
            Self::InlineFragment(inline) => Self::InlineFragment(inline.rebuild(container)),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

/// A field selection, optionally aliased, with arguments, directives, and
/// a sub-selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,
    pub source_location: Option<SourceLocation>,
}

impl Field {
    /// The key this field's value appears under in a response: the alias if
    /// present, otherwise the name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[inherent]
impl AstNode for Field {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> =
            self.arguments.iter().cloned().map(Node::Argument).collect();
        children.extend(directive_nodes(&self.directives));
        children.extend(selection_nodes(&self.selections));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            alias: self.alias.clone(),
            name: self.name.clone(),
            arguments: container.take(),
            directives: container.take(),
            selections: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

/// `... on Type @directives { ... }` (the type condition is optional).
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<NamedType>,
    pub directives: Vec<Directive>,
    pub selections: Vec<Selection>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for InlineFragment {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = self
            .type_condition
            .iter()
            .cloned()
            .map(|named| Node::Type(crate::ast::Type::Named(named)))
            .collect();
        children.extend(directive_nodes(&self.directives));
        children.extend(selection_nodes(&self.selections));
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            type_condition: container.take_single(),
            directives: container.take(),
            selections: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

/// `...Name @directives`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for FragmentSpread {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        directive_nodes(&self.directives).collect()
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            name: self.name.clone(),
            directives: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}
