use crate::schema::coordinate::CoordinateError;
use crate::schema::coordinate::ResolvedCoordinate;
use crate::schema::coordinate::SchemaCoordinate;
use gqlfront_parser::ast;
use gqlfront_parser::ast::OperationKind;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// A validated, fully merged GraphQL schema.
///
/// Produced by [`SchemaBuilder::build()`](crate::SchemaBuilder::build).
/// Every type-system extension has been folded into its base definition and
/// every `@link` import has been renamed into place, so lookups never need to
/// consider extensions or foreign prefixes. A `Schema` is never mutated after
/// it's built and can be shared across threads.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) schema_definition: ast::SchemaDefinition,
    pub(crate) schema_definition_is_implicit: bool,
    pub(crate) type_definitions: IndexMap<String, ast::TypeDefinition>,
    pub(crate) directive_definitions: IndexMap<String, ast::DirectiveDefinition>,

    /// Type names and `@`-prefixed directive names injected by the builder
    /// rather than loaded by the user.
    pub(crate) builtin_names: IndexSet<String>,

    pub(crate) key_fields: IndexMap<String, Vec<String>>,
    pub(crate) connection_types: IndexSet<String>,

    /// Local (possibly prefixed) name to the name the foreign schema defines
    /// it as. Directive names carry their `@`.
    pub(crate) foreign_names: IndexMap<String, String>,
    pub(crate) directives_to_strip: Vec<String>,
}

impl Schema {
    // =========================================================================
    // Definitions
    // =========================================================================

    /// The explicit schema definition (with any `extend schema` merged in),
    /// or the one synthesized from the conventional root type names.
    pub fn schema_definition(&self) -> &ast::SchemaDefinition {
        &self.schema_definition
    }

    pub fn type_definition(&self, name: &str) -> Option<&ast::TypeDefinition> {
        self.type_definitions.get(name)
    }

    /// All type definitions in load order, builtins first.
    pub fn type_definitions(&self) -> impl Iterator<Item = &ast::TypeDefinition> {
        self.type_definitions.values()
    }

    /// Looks up a directive by name, without the leading `@`.
    pub fn directive_definition(&self, name: &str) -> Option<&ast::DirectiveDefinition> {
        self.directive_definitions.get(name)
    }

    pub fn directive_definitions(&self) -> impl Iterator<Item = &ast::DirectiveDefinition> {
        self.directive_definitions.values()
    }

    pub fn field_definition(&self, type_name: &str, field_name: &str) -> Option<&ast::FieldDefinition> {
        self.type_definitions.get(type_name)?.field(field_name)
    }

    /// Whether `name` (a type name, or a directive name with its `@`) was
    /// injected by the builder.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_names.contains(name)
    }

    // =========================================================================
    // Root operation types
    // =========================================================================

    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        self.schema_definition.root_type_name(kind)
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&ast::TypeDefinition> {
        self.type_definitions.get(self.root_type_name(kind)?)
    }

    // =========================================================================
    // Subtyping
    // =========================================================================

    /// The object types a value of type `name` can be at runtime: the type
    /// itself for an object, the members of a union, and the implementors of
    /// an interface. Empty for leaf and input types.
    pub fn possible_types(&self, name: &str) -> IndexSet<&str> {
        match self.type_definitions.get(name) {
            Some(ast::TypeDefinition::Object(object)) => IndexSet::from([object.name.as_str()]),
            Some(ast::TypeDefinition::Union(union)) => union
                .member_types
                .iter()
                .map(|member| member.name.as_str())
                .filter(|member| {
                    matches!(self.type_definitions.get(*member), Some(ast::TypeDefinition::Object(_)))
                })
                .collect(),
            Some(ast::TypeDefinition::Interface(_)) => self
                .type_definitions
                .values()
                .filter_map(|definition| match definition {
                    ast::TypeDefinition::Object(object)
                        if object.implements_interfaces.iter().any(|iface| iface == name) =>
                    {
                        Some(object.name.as_str())
                    },
                    _ => None,
                })
                .collect(),
            _ => IndexSet::new(),
        }
    }

    /// Whether `sub_type` is `super_type` or one of its implementors or
    /// members.
    pub fn is_sub_type(&self, super_type: &str, sub_type: &str) -> bool {
        if super_type == sub_type {
            return true;
        }
        match self.type_definitions.get(super_type) {
            Some(ast::TypeDefinition::Union(union)) => {
                union.member_types.iter().any(|member| member.name == sub_type)
            },
            Some(ast::TypeDefinition::Interface(_)) => self
                .type_definitions
                .get(sub_type)
                .is_some_and(|definition| {
                    definition.implements_interfaces().iter().any(|iface| iface == super_type)
                }),
            _ => false,
        }
    }

    // =========================================================================
    // Derived data
    // =========================================================================

    /// The key fields used to compute a cache identity for `type_name`,
    /// either declared with `@typePolicy(keyFields:)` or inherited from an
    /// interface. Empty when the type has none.
    pub fn key_fields(&self, type_name: &str) -> &[String] {
        self.key_fields
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Names of the types returned by the fields listed in
    /// `@typePolicy(connectionFields:)`.
    pub fn connection_types(&self) -> &IndexSet<String> {
        &self.connection_types
    }

    /// Directives (named without `@`) to remove from a document before it is
    /// sent to a server.
    pub fn directives_to_strip(&self) -> &[String] {
        &self.directives_to_strip
    }

    /// Maps a local name back to the name its foreign schema defines it as,
    /// e.g. `@cache__typePolicy` to `@typePolicy`. Names that weren't linked
    /// come back unchanged.
    pub fn canonical_name<'a>(&'a self, local_name: &'a str) -> &'a str {
        self.foreign_names
            .get(local_name)
            .map(String::as_str)
            .unwrap_or(local_name)
    }

    /// Resolves a schema coordinate such as `User.name` or
    /// `@deprecated(reason:)`.
    pub fn resolve_coordinate(&self, coordinate: &str) -> Result<ResolvedCoordinate<'_>, CoordinateError> {
        let coordinate: SchemaCoordinate = coordinate.parse()?;
        coordinate.resolve(self)
    }

    /// The merged definitions as a document, ready for
    /// [`to_sdl()`](ast::Document::to_sdl). Definitions injected by the builder
    /// are left out, as is a schema definition that only restates the
    /// conventional root type names.
    pub fn to_document(&self) -> ast::Document {
        let mut definitions = Vec::new();
        let restates_conventions = self.schema_definition_is_implicit
            && self.schema_definition.directives.is_empty()
            && self
                .schema_definition
                .root_operation_types
                .iter()
                .all(|root| root.named_type == root.operation_kind.default_root_type_name());
        if !restates_conventions {
            definitions.push(ast::Definition::Schema(self.schema_definition.clone()));
        }
        definitions.extend(
            self.directive_definitions
                .values()
                .filter(|directive| !self.is_builtin(&format!("@{}", directive.name)))
                .cloned()
                .map(ast::Definition::Directive),
        );
        definitions.extend(
            self.type_definitions
                .values()
                .filter(|definition| !self.is_builtin(definition.name()))
                .cloned()
                .map(ast::Definition::Type),
        );
        ast::Document {
            definitions,
            source_location: None,
        }
    }
}
