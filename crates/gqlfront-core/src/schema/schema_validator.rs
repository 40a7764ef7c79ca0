use crate::validation::validate_directives;
use crate::validation::CoercionContext;
use crate::validation::ValueCoercer;
use crate::Schema;
use gqlfront_parser::ast;
use gqlfront_parser::ast::DirectiveLocation;
use gqlfront_parser::ast::OperationKind;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use std::collections::HashMap;

/// Checks a merged [`Schema`] against the type-system validation rules.
///
/// Every rule runs even after an earlier one fails, so a single build reports
/// everything that's wrong.
pub(super) struct SchemaValidator<'a> {
    schema: &'a Schema,
    coercer: ValueCoercer<'a>,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            coercer: ValueCoercer::new(schema, CoercionContext::Schema),
        }
    }

    pub fn validate(mut self) -> Vec<Issue> {
        let schema = self.schema;

        self.validate_root_types();
        validate_directives(
            &mut self.coercer,
            &schema.schema_definition().directives,
            DirectiveLocation::Schema,
        );
        for directive in schema.directive_definitions() {
            self.validate_directive_definition(directive);
        }
        for type_definition in schema.type_definitions() {
            self.validate_type_definition(type_definition);
        }

        self.coercer.into_parts().0
    }

    fn push(&mut self, issue: Issue) {
        self.coercer.push_issue(issue);
    }

    // =========================================================================
    // Root operation types
    // =========================================================================

    // https://spec.graphql.org/September2025/#sec-Root-Operation-Types
    fn validate_root_types(&mut self) {
        let schema = self.schema;
        if schema.root_type_name(OperationKind::Query).is_none() {
            self.push(Issue::with_notes(
                IssueKind::NoQueryType,
                "the schema has no query root type",
                schema.schema_definition().source_location.clone(),
                smallvec![IssueNote::help(
                    "define a `Query` object type or name one with `schema { query: ... }`",
                )],
            ));
        }

        for root in &schema.schema_definition().root_operation_types {
            match schema.type_definition(&root.named_type) {
                None => self.push(Issue::new(
                    IssueKind::UnknownType,
                    format!(
                        "the `{}` root type `{}` is not defined",
                        root.operation_kind, root.named_type,
                    ),
                    root.source_location.clone(),
                )),
                Some(ast::TypeDefinition::Object(_)) => (),
                Some(other) => self.push(Issue::new(
                    IssueKind::InvalidRootType,
                    format!(
                        "the `{}` root type `{}` must be an object type, but it is {}",
                        root.operation_kind,
                        root.named_type,
                        with_article(other.kind_name()),
                    ),
                    root.source_location.clone(),
                )),
            }
        }
    }

    // =========================================================================
    // Directive definitions
    // =========================================================================

    // https://spec.graphql.org/September2025/#sec-Type-System.Directives.Validation
    fn validate_directive_definition(&mut self, directive: &ast::DirectiveDefinition) {
        let user_defined = !self.schema.is_builtin(&format!("@{}", directive.name));
        if user_defined {
            self.check_reserved_name(&directive.name, "directive", directive.source_location.as_ref());
        }
        self.check_duplicates(
            directive.arguments.iter().map(|argument| (argument.name.as_str(), argument.source_location.as_ref())),
            |name| format!("argument `@{}({name}:)` is defined more than once", directive.name),
        );
        for argument in &directive.arguments {
            self.validate_input_value(
                &format!("argument `@{}({}:)`", directive.name, argument.name),
                argument,
                DirectiveLocation::ArgumentDefinition,
                user_defined,
            );
        }
    }

    // =========================================================================
    // Type definitions
    // =========================================================================

    fn validate_type_definition(&mut self, definition: &ast::TypeDefinition) {
        let type_name = definition.name();
        let user_defined = !self.schema.is_builtin(type_name);
        if user_defined {
            self.check_reserved_name(type_name, "type", definition.source_location());
        }
        validate_directives(&mut self.coercer, definition.directives(), definition.directive_location());

        match definition {
            ast::TypeDefinition::Object(object) => {
                self.validate_fields(definition, &object.fields, user_defined);
                self.validate_implementations(definition);
            },
            ast::TypeDefinition::Interface(interface) => {
                self.validate_fields(definition, &interface.fields, user_defined);
                self.validate_implementations(definition);
            },
            ast::TypeDefinition::Union(union) => self.validate_union(union),
            ast::TypeDefinition::Enum(enum_type) => self.validate_enum(enum_type, user_defined),
            ast::TypeDefinition::InputObject(input_object) => {
                self.validate_input_object(input_object, user_defined);
            },
            ast::TypeDefinition::Scalar(_) => (),
        }
    }

    // https://spec.graphql.org/September2025/#sec-Objects.Type-Validation
    fn validate_fields(
        &mut self,
        definition: &ast::TypeDefinition,
        fields: &[ast::FieldDefinition],
        user_defined: bool,
    ) {
        let type_name = definition.name();
        if fields.is_empty() {
            self.push(Issue::new(
                IssueKind::InvalidTypeDefinition,
                format!("{} `{type_name}` must define at least one field", definition.kind_name()),
                definition.source_location().cloned(),
            ));
        }
        self.check_duplicates(
            fields.iter().map(|field| (field.name.as_str(), field.source_location.as_ref())),
            |name| format!("field `{type_name}.{name}` is defined more than once"),
        );

        for field in fields {
            if user_defined {
                self.check_reserved_name(&field.name, "field", field.source_location.as_ref());
            }
            match self.schema.type_definition(field.field_type.innermost_name()) {
                None => self.unknown_type(&field.field_type, field.source_location.as_ref()),
                Some(field_type) if !field_type.is_output_type() => self.push(Issue::new(
                    IssueKind::InvalidTypeDefinition,
                    format!(
                        "field `{type_name}.{}` must have an output type, but `{}` is {}",
                        field.name,
                        field_type.name(),
                        with_article(field_type.kind_name()),
                    ),
                    field.source_location.clone(),
                )),
                Some(_) => (),
            }
            validate_directives(&mut self.coercer, &field.directives, DirectiveLocation::FieldDefinition);

            self.check_duplicates(
                field.arguments.iter().map(|argument| (argument.name.as_str(), argument.source_location.as_ref())),
                |name| format!("argument `{type_name}.{}({name}:)` is defined more than once", field.name),
            );
            for argument in &field.arguments {
                self.validate_input_value(
                    &format!("argument `{type_name}.{}({}:)`", field.name, argument.name),
                    argument,
                    DirectiveLocation::ArgumentDefinition,
                    user_defined,
                );
            }
        }
    }

    // https://spec.graphql.org/September2025/#sec-Unions.Type-Validation
    fn validate_union(&mut self, union: &ast::UnionTypeDefinition) {
        let union_name = &union.name;
        if union.member_types.is_empty() {
            self.push(Issue::new(
                IssueKind::InvalidTypeDefinition,
                format!("union `{union_name}` must have at least one member type"),
                union.source_location.clone(),
            ));
        }
        self.check_duplicates(
            union.member_types.iter().map(|member| (member.name.as_str(), member.source_location.as_ref())),
            |name| format!("`{name}` is listed more than once in union `{union_name}`"),
        );
        for member in &union.member_types {
            match self.schema.type_definition(&member.name) {
                None => self.push(Issue::new(
                    IssueKind::UnknownType,
                    format!("unknown type `{}`", member.name),
                    member.source_location.clone().or_else(|| union.source_location.clone()),
                )),
                Some(ast::TypeDefinition::Object(_)) => (),
                Some(other) => self.push(Issue::new(
                    IssueKind::InvalidTypeDefinition,
                    format!(
                        "union `{union_name}` can only include object types, but `{}` is {}",
                        member.name,
                        with_article(other.kind_name()),
                    ),
                    member.source_location.clone().or_else(|| union.source_location.clone()),
                )),
            }
        }
    }

    // https://spec.graphql.org/September2025/#sec-Enums.Type-Validation
    fn validate_enum(&mut self, enum_type: &ast::EnumTypeDefinition, user_defined: bool) {
        let enum_name = &enum_type.name;
        if enum_type.values.is_empty() {
            self.push(Issue::new(
                IssueKind::InvalidTypeDefinition,
                format!("enum `{enum_name}` must define at least one value"),
                enum_type.source_location.clone(),
            ));
        }
        self.check_duplicates(
            enum_type.values.iter().map(|value| (value.name.as_str(), value.source_location.as_ref())),
            |name| format!("enum value `{enum_name}.{name}` is defined more than once"),
        );
        for value in &enum_type.values {
            if user_defined {
                self.check_reserved_name(&value.name, "enum value", value.source_location.as_ref());
            }
            validate_directives(&mut self.coercer, &value.directives, DirectiveLocation::EnumValue);
        }
    }

    // https://spec.graphql.org/September2025/#sec-Input-Objects.Type-Validation
    fn validate_input_object(&mut self, input_object: &ast::InputObjectTypeDefinition, user_defined: bool) {
        let type_name = &input_object.name;
        if input_object.fields.is_empty() {
            self.push(Issue::new(
                IssueKind::InvalidTypeDefinition,
                format!("input object `{type_name}` must define at least one field"),
                input_object.source_location.clone(),
            ));
        }
        self.check_duplicates(
            input_object.fields.iter().map(|field| (field.name.as_str(), field.source_location.as_ref())),
            |name| format!("input field `{type_name}.{name}` is defined more than once"),
        );
        for field in &input_object.fields {
            self.validate_input_value(
                &format!("input field `{type_name}.{}`", field.name),
                field,
                DirectiveLocation::InputFieldDefinition,
                user_defined,
            );
        }
    }

    /// Checks an argument or input field definition described by `what`.
    fn validate_input_value(
        &mut self,
        what: &str,
        value: &ast::InputValueDefinition,
        location: DirectiveLocation,
        user_defined: bool,
    ) {
        if user_defined {
            self.check_reserved_name(&value.name, "argument or input field", value.source_location.as_ref());
        }
        match self.schema.type_definition(value.value_type.innermost_name()) {
            None => self.unknown_type(&value.value_type, value.source_location.as_ref()),
            Some(value_type) if !value_type.is_input_type() => self.push(Issue::new(
                IssueKind::InvalidTypeDefinition,
                format!(
                    "{what} must have an input type, but `{}` is {}",
                    value_type.name(),
                    with_article(value_type.kind_name()),
                ),
                value.source_location.clone(),
            )),
            Some(_) => {
                if let Some(default_value) = &value.default_value {
                    self.coercer.coerce(default_value, &value.value_type, false);
                }
            },
        }
        validate_directives(&mut self.coercer, &value.directives, location);
    }

    // =========================================================================
    // Interface implementations
    // =========================================================================

    // https://spec.graphql.org/September2025/#IsValidImplementation()
    fn validate_implementations(&mut self, definition: &ast::TypeDefinition) {
        let schema = self.schema;
        let type_name = definition.name();
        let declared = definition.implements_interfaces();
        let location = definition.source_location();

        for interface_name in declared {
            if interface_name == type_name {
                self.push(Issue::new(
                    IssueKind::InvalidImplementation,
                    format!("`{type_name}` cannot implement itself"),
                    location.cloned(),
                ));
                continue;
            }
            let interface = match schema.type_definition(interface_name) {
                Some(ast::TypeDefinition::Interface(interface)) => interface,
                Some(other) => {
                    self.push(Issue::new(
                        IssueKind::InvalidImplementation,
                        format!(
                            "`{type_name}` cannot implement `{interface_name}` because it is {}",
                            with_article(other.kind_name()),
                        ),
                        location.cloned(),
                    ));
                    continue;
                },
                None => {
                    self.push(Issue::new(
                        IssueKind::UnknownType,
                        format!("`{type_name}` implements unknown interface `{interface_name}`"),
                        location.cloned(),
                    ));
                    continue;
                },
            };

            for transitive in &interface.implements_interfaces {
                if transitive != type_name && !declared.contains(transitive) {
                    self.push(Issue::new(
                        IssueKind::InvalidImplementation,
                        format!(
                            "`{type_name}` must also implement `{transitive}` because \
                             `{interface_name}` implements it",
                        ),
                        location.cloned(),
                    ));
                }
            }

            for interface_field in &interface.fields {
                let Some(field) = definition.field(&interface_field.name) else {
                    self.push(Issue::with_notes(
                        IssueKind::InvalidImplementation,
                        format!(
                            "`{type_name}` must define field `{}` required by interface `{interface_name}`",
                            interface_field.name,
                        ),
                        location.cloned(),
                        smallvec![IssueNote::general_at(
                            "required here",
                            interface_field.source_location.clone(),
                        )],
                    ));
                    continue;
                };
                self.validate_implementation_field(type_name, interface_name, field, interface_field);
            }
        }
    }

    fn validate_implementation_field(
        &mut self,
        type_name: &str,
        interface_name: &str,
        field: &ast::FieldDefinition,
        interface_field: &ast::FieldDefinition,
    ) {
        let field_name = &field.name;
        if !self.is_valid_implementation_field_type(&field.field_type, &interface_field.field_type) {
            self.push(Issue::with_notes(
                IssueKind::InvalidImplementation,
                format!(
                    "field `{type_name}.{field_name}` has type `{}`, which is not compatible with \
                     `{interface_name}.{field_name}` of type `{}`",
                    field.field_type, interface_field.field_type,
                ),
                field.source_location.clone(),
                smallvec![IssueNote::general_at(
                    "interface field defined here",
                    interface_field.source_location.clone(),
                )],
            ));
        }

        for interface_argument in &interface_field.arguments {
            match field.argument(&interface_argument.name) {
                None => self.push(Issue::new(
                    IssueKind::InvalidImplementation,
                    format!(
                        "field `{type_name}.{field_name}` must accept argument `{}` required by \
                         interface `{interface_name}`",
                        interface_argument.name,
                    ),
                    field.source_location.clone(),
                )),
                Some(argument) if !argument.value_type.same_type(&interface_argument.value_type) => {
                    self.push(Issue::new(
                        IssueKind::InvalidImplementation,
                        format!(
                            "argument `{type_name}.{field_name}({}:)` must have type `{}` to match \
                             `{interface_name}.{field_name}`",
                            argument.name, interface_argument.value_type,
                        ),
                        argument.source_location.clone(),
                    ));
                },
                Some(_) => (),
            }
        }

        for argument in &field.arguments {
            if argument.is_required() && interface_field.argument(&argument.name).is_none() {
                self.push(Issue::new(
                    IssueKind::InvalidImplementation,
                    format!(
                        "argument `{type_name}.{field_name}({}:)` must be optional because \
                         `{interface_name}.{field_name}` does not define it",
                        argument.name,
                    ),
                    argument.source_location.clone(),
                ));
            }
        }
    }

    // https://spec.graphql.org/September2025/#IsValidImplementationFieldType()
    fn is_valid_implementation_field_type(&self, field_type: &ast::Type, interface_type: &ast::Type) -> bool {
        match (field_type, interface_type) {
            (ast::Type::NonNull(field), ast::Type::NonNull(interface)) => {
                self.is_valid_implementation_field_type(&field.inner_type, &interface.inner_type)
            },
            (ast::Type::NonNull(field), interface) => {
                self.is_valid_implementation_field_type(&field.inner_type, interface)
            },
            (_, ast::Type::NonNull(_)) => false,
            (ast::Type::List(field), ast::Type::List(interface)) => {
                self.is_valid_implementation_field_type(&field.element_type, &interface.element_type)
            },
            (ast::Type::List(_), _) | (_, ast::Type::List(_)) => false,
            (ast::Type::Named(field), ast::Type::Named(interface)) => {
                self.schema.is_sub_type(&interface.name, &field.name)
            },
        }
    }

    // =========================================================================
    // Shared checks
    // =========================================================================

    // https://spec.graphql.org/September2025/#sec-Names.Reserved-Names
    fn check_reserved_name(&mut self, name: &str, what: &str, location: Option<&SourceLocation>) {
        if name.starts_with("__") {
            self.push(Issue::new(
                IssueKind::ReservedName,
                format!("{what} name `{name}` must not begin with `__`, which is reserved for introspection"),
                location.cloned(),
            ));
        }
    }

    fn check_duplicates<'n>(
        &mut self,
        names: impl Iterator<Item = (&'n str, Option<&'n SourceLocation>)>,
        describe: impl Fn(&str) -> String,
    ) {
        let mut seen: HashMap<&str, Option<&SourceLocation>> = HashMap::new();
        for (name, location) in names {
            if let Some(first) = seen.get(name) {
                self.push(Issue::with_notes(
                    IssueKind::DuplicateDefinition,
                    describe(name),
                    location.cloned(),
                    smallvec![IssueNote::general_at("first defined here", first.cloned())],
                ));
            } else {
                seen.insert(name, location);
            }
        }
    }

    fn unknown_type(&mut self, reference: &ast::Type, fallback: Option<&SourceLocation>) {
        self.push(Issue::new(
            IssueKind::UnknownType,
            format!("unknown type `{}`", reference.innermost_name()),
            reference.source_location().or(fallback).cloned(),
        ));
    }
}

pub(super) fn with_article(kind_name: &str) -> String {
    match kind_name.as_bytes().first() {
        Some(b'a' | b'e' | b'i' | b'o' | b'u') => format!("an {kind_name}"),
        _ => format!("a {kind_name}"),
    }
}
