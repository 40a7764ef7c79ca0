use crate::ast::AstNode;
use crate::ast::Directive;
use crate::ast::DirectiveLocation;
use crate::ast::EnumValueDefinition;
use crate::ast::FieldDefinition;
use crate::ast::InputValueDefinition;
use crate::ast::NamedType;
use crate::ast::Node;
use crate::ast::NodeContainer;
use crate::ast::OperationTypeDefinition;
use crate::ast::Type;
use crate::SourceLocation;
use inherent::inherent;

fn directive_nodes(directives: &[Directive]) -> impl Iterator<Item = Node> + '_ {
    directives.iter().cloned().map(Node::Directive)
}

/// `extend schema @directives { ... }`.
///
/// Extensions never carry a description; the parser rejects one.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaExtension {
    pub directives: Vec<Directive>,
    pub root_operation_types: Vec<OperationTypeDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[inherent]
impl AstNode for SchemaExtension {
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
            directives: container.take(),
            root_operation_types: container.take(),
            source_location: self.source_location.clone(),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

// =========================================================
// Type extensions
// =========================================================

/// `extend type ...`, `extend interface ...`, and so on.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtension {
    Enum(EnumTypeExtension),
    InputObject(InputObjectTypeExtension),
    Interface(InterfaceTypeExtension),
    Object(ObjectTypeExtension),
    Scalar(ScalarTypeExtension),
    Union(UnionTypeExtension),
}

impl TypeExtension {
    /// The name of the type being extended.
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(ext) => &ext.name,
            Self::InputObject(ext) => &ext.name,
            Self::Interface(ext) => &ext.name,
            Self::Object(ext) => &ext.name,
            Self::Scalar(ext) => &ext.name,
            Self::Union(ext) => &ext.name,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Self::Enum(ext) => &ext.directives,
            Self::InputObject(ext) => &ext.directives,
            Self::Interface(ext) => &ext.directives,
            Self::Object(ext) => &ext.directives,
            Self::Scalar(ext) => &ext.directives,
            Self::Union(ext) => &ext.directives,
        }
    }

    /// Whether the extension has no directives, members, values, or fields.
    pub fn adds_nothing(&self) -> bool {
        self.directives().is_empty()
            && match self {
                Self::Enum(ext) => ext.values.is_empty(),
                Self::InputObject(ext) => ext.fields.is_empty(),
                Self::Interface(ext) => ext.implements_interfaces.is_empty() && ext.fields.is_empty(),
                Self::Object(ext) => ext.implements_interfaces.is_empty() && ext.fields.is_empty(),
                Self::Scalar(_) => true,
                Self::Union(ext) => ext.member_types.is_empty(),
            }
    }

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
}

#[inherent]
impl AstNode for TypeExtension {
    pub fn source_location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Enum(ext) => ext.source_location.as_ref(),
            Self::InputObject(ext) => ext.source_location.as_ref(),
            Self::Interface(ext) => ext.source_location.as_ref(),
            Self::Object(ext) => ext.source_location.as_ref(),
            Self::Scalar(ext) => ext.source_location.as_ref(),
            Self::Union(ext) => ext.source_location.as_ref(),
        }
    }

    pub fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = directive_nodes(self.directives()).collect();
        match self {
            Self::Enum(ext) => {
                children.extend(ext.values.iter().cloned().map(Node::EnumValueDefinition));
            },
            Self::InputObject(ext) => {
                children.extend(ext.fields.iter().cloned().map(Node::InputValueDefinition));
            },
            Self::Interface(ext) => {
                children.extend(ext.fields.iter().cloned().map(Node::FieldDefinition));
            },
            Self::Object(ext) => {
                children.extend(ext.fields.iter().cloned().map(Node::FieldDefinition));
            },
            Self::Scalar(_) => (),
            Self::Union(ext) => {
                children.extend(
                    ext.member_types
                        .iter()
                        .cloned()
                        .map(|member| Node::Type(Type::Named(member))),
                );
            },
        }
        children
    }

    pub fn rebuild(&self, container: &mut NodeContainer) -> Self {
        match self {
            Self::Enum(ext) => Self::Enum(EnumTypeExtension {
                name: ext.name.clone(),
                directives: container.take(),
                values: container.take(),
                source_location: ext.source_location.clone(),
            }),
            Self::InputObject(ext) => Self::InputObject(InputObjectTypeExtension {
                name: ext.name.clone(),
                directives: container.take(),
                fields: container.take(),
                source_location: ext.source_location.clone(),
            }),
            Self::Interface(ext) => Self::Interface(InterfaceTypeExtension {
                name: ext.name.clone(),
                implements_interfaces: ext.implements_interfaces.clone(),
                directives: container.take(),
                fields: container.take(),
                source_location: ext.source_location.clone(),
            }),
            Self::Object(ext) => Self::Object(ObjectTypeExtension {
                name: ext.name.clone(),
                implements_interfaces: ext.implements_interfaces.clone(),
                directives: container.take(),
                fields: container.take(),
                source_location: ext.source_location.clone(),
            }),
            Self::Scalar(ext) => Self::Scalar(ScalarTypeExtension {
                name: ext.name.clone(),
                directives: container.take(),
                source_location: ext.source_location.clone(),
            }),
            Self::Union(ext) => Self::Union(UnionTypeExtension {
                name: ext.name.clone(),
                directives: container.take(),
                member_types: container.take(),
                source_location: ext.source_location.clone(),
            }),
        }
    }

    pub fn copy_with_new_children(&self, children: Vec<Node>) -> Self;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeExtension {
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeExtension {
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeExtension {
    pub name: String,
    pub directives: Vec<Directive>,
    pub member_types: Vec<NamedType>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeExtension {
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeExtension {
    pub name: String,
    pub directives: Vec<Directive>,
    pub source_location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeExtension {
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
    pub source_location: Option<SourceLocation>,
}
