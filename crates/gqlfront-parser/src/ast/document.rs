use crate::ast::AstNode;
use crate::ast::DirectiveDefinition;
use crate::ast::FragmentDefinition;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::ast::OperationDefinition;
use crate::ast::SchemaDefinition;
use crate::ast::SchemaExtension;
use crate::ast::TypeDefinition;
use crate::ast::TypeExtension;
use crate::SourceLocation;
use inherent::inherent;

// =========================================================
// Document
// =========================================================

/// Root AST node for any GraphQL document.
///
/// A single `Document` type holds executable definitions, type-system
/// definitions, or a mix of both. Which kinds are permitted is decided by
/// the consumer: the schema builder ignores operations and the executable
/// validator ignores type-system definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
    pub source_location: Option<SourceLocation>,
}

impl Document {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }

    /// Type-system definitions and extensions, in document order.
    pub fn type_system_definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(|def| !def.is_executable())
    }
}

#[inherent]
impl AstNode for Document {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        self.definitions.iter().cloned().map(Node::Definition).collect()
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            definitions: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// Definition
// =========================================================

/// A top-level definition in a [`Document`].
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Directive(DirectiveDefinition),
    Fragment(FragmentDefinition),
    Operation(OperationDefinition),
    Schema(SchemaDefinition),
    SchemaExtension(SchemaExtension),
    Type(TypeDefinition),
    TypeExtension(TypeExtension),
}

impl Definition {
    /// The defined (or extended) name, if the definition has one.
    ///
    /// Directive definitions report their name without the leading `@`.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Directive(def) => Some(&def.name),
            Self::Fragment(def) => Some(&def.name),
            Self::Operation(def) => def.name.as_deref(),
            Self::Schema(_) | Self::SchemaExtension(_) => None,
            Self::Type(def) => Some(def.name()),
            Self::TypeExtension(ext) => Some(ext.name()),
        }
    }

    /// Operations and fragments.
    pub fn is_executable(&self) -> bool {
        matches!(self, Self::Operation(_) | Self::Fragment(_))
    }
}

#[inherent]
impl AstNode for Definition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Directive(def) => def.source_location(),
            Self::Fragment(def) => def.source_location(),
            Self::Operation(def) => def.source_location(),
            Self::Schema(def) => def.source_location(),
            Self::SchemaExtension(ext) => ext.source_location(),
            Self::Type(def) => def.source_location(),
            Self::TypeExtension(ext) => ext.source_location(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        match self {
            Self::Directive(def) => def.children(),
            Self::Fragment(def) => def.children(),
            Self::Operation(def) => def.children(),
            Self::Schema(def) => def.children(),
            Self::SchemaExtension(ext) => ext.children(),
            Self::Type(def) => def.children(),
            Self::TypeExtension(ext) => ext.children(),
        }
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        match self {
            Self::Directive(def) => Self::Directive(def.rebuild(container)),
            Self::Fragment(def) => Self::Fragment(def.rebuild(container)),
            Self::Operation(def) => Self::Operation(def.rebuild(container)),
            Self::Schema(def) => Self::Schema(def.rebuild(container)),
            Self::SchemaExtension(ext) => Self::SchemaExtension(ext.rebuild(container)),
            Self::Type(def) => Self::Type(def.rebuild(container)),
            Self::TypeExtension(ext) => Self::TypeExtension(ext.rebuild(container)),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}
