//! The immutable AST produced by [`GraphQLParser`](crate::GraphQLParser).
//!
//! Nodes own their data (`String` names, boxed sub-types) and carry an
//! `Option<SourceLocation>` that is `None` when the parser was configured to
//! discard locations. Nodes are never mutated after parsing; rewrites go
//! through [`transform()`] and produce new trees.
//!
//! Every node type implements [`AstNode`], whose `children()` /
//! `copy_with_new_children()` pair is the only thing the transform driver
//! needs to rebuild an arbitrary subtree.

mod ast_node;
mod directive_location;
mod document;
mod executable_defs;
mod node;
mod operation_type;
mod shared_nodes;
mod transform;
mod type_annotation;
mod type_extensions;
mod type_system_defs;
mod values;

pub use ast_node::AstNode;
pub use ast_node::FromNode;
pub use ast_node::NodeContainer;
pub use directive_location::DirectiveLocation;
pub use document::Definition;
pub use document::Document;
pub use executable_defs::Field;
pub use executable_defs::FragmentDefinition;
pub use executable_defs::FragmentSpread;
pub use executable_defs::InlineFragment;
pub use executable_defs::OperationDefinition;
pub use executable_defs::Selection;
pub use node::Node;
pub use operation_type::OperationKind;
pub use shared_nodes::Argument;
pub use shared_nodes::Directive;
pub use shared_nodes::EnumValueDefinition;
pub use shared_nodes::FieldDefinition;
pub use shared_nodes::InputValueDefinition;
pub use shared_nodes::OperationTypeDefinition;
pub use shared_nodes::VariableDefinition;
pub use transform::NodeTransformer;
pub use transform::TransformResult;
pub use transform::transform;
#[doc(hidden)]
pub use transform::transform_children_first;
pub use type_annotation::ListType;
pub use type_annotation::NamedType;
pub use type_annotation::NonNullType;
pub use type_annotation::Type;
pub use type_extensions::EnumTypeExtension;
pub use type_extensions::InputObjectTypeExtension;
pub use type_extensions::InterfaceTypeExtension;
pub use type_extensions::ObjectTypeExtension;
pub use type_extensions::ScalarTypeExtension;
pub use type_extensions::SchemaExtension;
pub use type_extensions::TypeExtension;
pub use type_extensions::UnionTypeExtension;
pub use type_system_defs::DirectiveDefinition;
pub use type_system_defs::EnumTypeDefinition;
pub use type_system_defs::InputObjectTypeDefinition;
pub use type_system_defs::InterfaceTypeDefinition;
pub use type_system_defs::ObjectTypeDefinition;
pub use type_system_defs::ScalarTypeDefinition;
pub use type_system_defs::SchemaDefinition;
pub use type_system_defs::TypeDefinition;
pub use type_system_defs::UnionTypeDefinition;
pub use values::BooleanValue;
pub use values::EnumValue;
pub use values::FloatValue;
pub use values::IntValue;
pub use values::ListValue;
pub use values::NullValue;
pub use values::ObjectField;
pub use values::ObjectValue;
pub use values::StringValue;
pub use values::Value;
pub use values::VariableValue;
