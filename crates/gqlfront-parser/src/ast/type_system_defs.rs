use crate::ast::AstNode;
use crate::ast::Directive;
use crate::ast::DirectiveLocation;
use crate::ast::EnumValueDefinition;
use crate::ast::FieldDefinition;
use crate::ast::InputValueDefinition;
use crate::ast::NamedType;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::ast::OperationKind;
use crate::ast::OperationTypeDefinition;
use crate::ast::Type;
use crate::SourceLocation;
use inherent::inherent;

fn directive_nodes(directives: &[Directive]) -> impl Iterator<Item = Node> + '_ {
    directives.iter().cloned().map(Node::Directive)
}

// =========================================================
// Schema and directive definitions
// =========================================================

/// `schema @directives { query: Query ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub root_operation_types: Vec<OperationTypeDefinition>,
    pub source_location: Option<SourceLocation>,
}

impl SchemaDefinition {
    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        self.root_operation_types
            .iter()
            .find(|root| root.operation_kind == kind)
            .map(|root| root.named_type.as_str())
    }
}

#[inherent]
impl AstNode for SchemaDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = directive_nodes(&self.directives).collect();
        children.extend(
            self.root_operation_types
                .iter()
                .cloned()
                .map(Node::OperationTypeDefinition),
        );
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            directives: container.take(),
            root_operation_types: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

/// `directive @name(args) repeatable on LOCATION | ...`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub source_location: Option<SourceLocation>,
}

impl DirectiveDefinition {
    pub fn argument(&self, name: &str) -> Option<&InputValueDefinition> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

#[inherent]
impl AstNode for DirectiveDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.source_location.as_ref()
    }

    pub fn children(&self) -> Vec<Node> {
        self.arguments
            .iter()
            .cloned()
            .map(Node::InputValueDefinition)
            .collect()
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        Self {
            description: self.description.clone(),
            name: self.name.clone(),
            arguments: container.take(),
            repeatable: self.repeatable,
            locations: self.locations.clone(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// Type definitions
// =========================================================

/// A named type definition.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Object(ObjectTypeDefinition),
    Scalar(ScalarTypeDefinition),
    Union(UnionTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Scalar(def) => &def.name,
            Self::Union(def) => &def.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Enum(def) => def.description.as_deref(),
            Self::InputObject(def) => def.description.as_deref(),
            Self::Interface(def) => def.description.as_deref(),
            Self::Object(def) => def.description.as_deref(),
            Self::Scalar(def) => def.description.as_deref(),
            Self::Union(def) => def.description.as_deref(),
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Self::Enum(def) => &def.directives,
            Self::InputObject(def) => &def.directives,
            Self::Interface(def) => &def.directives,
            Self::Object(def) => &def.directives,
            Self::Scalar(def) => &def.directives,
            Self::Union(def) => &def.directives,
        }
    }

    /// `"object"`, `"interface"`, ... for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
            Self::Interface(_) => "interface",
            Self::Object(_) => "object",
            Self::Scalar(_) => "scalar",
            Self::Union(_) => "union",
        }
    }

    /// The directive location this definition occupies.
    pub fn directive_location(&self) -> DirectiveLocation {
        match self {
            Self::Enum(_) => DirectiveLocation::Enum,
            Self::InputObject(_) => DirectiveLocation::InputObject,
            Self::Interface(_) => DirectiveLocation::Interface,
            Self::Object(_) => DirectiveLocation::Object,
            Self::Scalar(_) => DirectiveLocation::Scalar,
            Self::Union(_) => DirectiveLocation::Union,
        }
    }

    /// Fields of an object or interface type; `None` for other kinds.
    pub fn fields(&self) -> Option<&[FieldDefinition]> {
        match self {
            Self::Interface(def) => Some(&def.fields),
            Self::Object(def) => Some(&def.fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields()?.iter().find(|field| field.name == name)
    }

    /// Interfaces implemented by an object or interface type.
    pub fn implements_interfaces(&self) -> &[String] {
        match self {
            Self::Interface(def) => &def.implements_interfaces,
            Self::Object(def) => &def.implements_interfaces,
            _ => &[],
        }
    }

    /// Scalars and enums.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }

    /// Objects, interfaces, and unions.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    pub fn is_output_type(&self) -> bool {
        !matches!(self, Self::InputObject(_))
    }
}

#[inherent]
impl AstNode for TypeDefinition {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Enum(def) => def.source_location.as_ref(),
            Self::InputObject(def) => def.source_location.as_ref(),
            Self::Interface(def) => def.source_location.as_ref(),
            Self::Object(def) => def.source_location.as_ref(),
            Self::Scalar(def) => def.source_location.as_ref(),
            Self::Union(def) => def.source_location.as_ref(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        match self {
            Self::Enum(def) => {
                let mut children: Vec<Node> = directive_nodes(&def.directives).collect();
                children.extend(def.values.iter().cloned().map(Node::EnumValueDefinition));
                children
            },
            Self::InputObject(def) => {
                let mut children: Vec<Node> = directive_nodes(&def.directives).collect();
                children.extend(def.fields.iter().cloned().map(Node::InputValueDefinition));
                children
            },
            Self::Interface(def) => {
                let mut children: Vec<Node> = directive_nodes(&def.directives).collect();
                children.extend(def.fields.iter().cloned().map(Node::FieldDefinition));
                children
            },
            Self::Object(def) => {
                let mut children: Vec<Node> = directive_nodes(&def.directives).collect();
                children.extend(def.fields.iter().cloned().map(Node::FieldDefinition));
                children
            },
            Self::Scalar(def) => directive_nodes(&def.directives).collect(),
            Self::Union(def) => {
                let mut children: Vec<Node> = directive_nodes(&def.directives).collect();
                children.extend(
                    def.member_types
                        .iter()
                        .cloned()
                        .map(|member| Node::Type(Type::Named(member))),
                );
                children
            },
        }
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        match self {
            Self::Enum(def) => Self::Enum(EnumTypeDefinition {
                description: def.description.clone(),
                name: def.name.clone(),
                directives: container.take(),
                values: container.take(),
                source_location: def.source_location.clone(),
            }),
            Self::InputObject(def) => Self::InputObject(InputObjectTypeDefinition {
                description: def.description.clone(),
                name: def.name.clone(),
                directives: container.take(),
                fields: container.take(),
                source_location: def.source_location.clone(),
            }),
            Self::Interface(def) => Self::Interface(InterfaceTypeDefinition {
                description: def.description.clone(),
                name: def.name.clone(),
                implements_interfaces: def.implements_interfaces.clone(),
                directives: container.take(),
                fields: container.take(),
                source_location: def.source_location.clone(),
            }),
            Self::Object(def) => Self::Object(ObjectTypeDefinition {
                description: def.description.clone(),
                name: def.name.clone(),
                implements_interfaces: def.implements_interfaces.clone(),
                directives: container.take(),
                fields: container.take(),
                source_location: def.source_location.clone(),
            }),
            Self::Scalar(def) => Self::Scalar(ScalarTypeDefinition {
                description: def.description.clone(),
                name: def.name.clone(),
                directives: container.take(),
                source_location: def.source_location.clone(),
            }),
            Self::Union(def) => Self::Union(UnionTypeDefinition {
                description: def.description.clone(),
                name: def.name.clone(),
                directives: container.take(),
                member_types: container.take(),
                source_location: def.source_location.clone(),
            }),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub member_types: Vec<NamedType>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
    pub source_location: Option<SourceLocation>,
}
