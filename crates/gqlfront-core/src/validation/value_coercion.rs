//! Checking input values against the types that declare them.
//!
//! See [Input Coercion](https://spec.graphql.org/September2025/#sec-Input-Values)
//! for the rules each type kind follows. Custom scalars accept any literal;
//! checking their contents is left to whoever serializes the value.

use crate::Schema;
use gqlfront_parser::ast;
use gqlfront_parser::ast::Node;
use gqlfront_parser::GraphQLResult;
use gqlfront_parser::Issue;
use gqlfront_parser::IssueKind;
use gqlfront_parser::IssueNote;
use gqlfront_parser::SourceLocation;
use gqlfront_parser::smallvec;
use std::collections::HashMap;

/// Where a value being coerced was written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoercionContext {
    /// Default values and type-system directive arguments. Variables are an
    /// error here.
    Schema,

    /// Arguments inside operations and fragments. A variable is accepted and
    /// recorded as a [`VariableUsage`] for later checking against the
    /// operation's variable definitions.
    Executable,
}

/// A variable reference together with the type expected where it appears.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableUsage {
    pub variable: ast::VariableValue,
    pub location_type: ast::Type,

    /// Whether the argument or input field the variable is passed to has a
    /// default value of its own.
    pub has_location_default_value: bool,
}

/// Coerces `value` against `expected_type` and returns the coerced value.
///
/// The result carries advisory issues (such as deprecated enum values) even
/// when coercion succeeds.
///
/// ```
/// use gqlfront_core::coerce_value;
/// use gqlfront_core::CoercionContext;
/// use gqlfront_core::SchemaBuilder;
/// use gqlfront_parser::ast;
/// use gqlfront_parser::GraphQLParser;
///
/// let schema = SchemaBuilder::new()
///     .load_str(None, "type Query { hero: String }")
///     .build()
///     .into_value()
///     .unwrap();
/// let value = GraphQLParser::new("42").parse_value().into_value().unwrap();
///
/// let as_int = coerce_value(&schema, &value, &ast::Type::named("Int"), CoercionContext::Schema);
/// assert!(as_int.is_ok());
/// let as_string = coerce_value(&schema, &value, &ast::Type::named("String"), CoercionContext::Schema);
/// assert!(as_string.has_errors());
/// ```
pub fn coerce_value(
    schema: &Schema,
    value: &ast::Value,
    expected_type: &ast::Type,
    context: CoercionContext,
) -> GraphQLResult<ast::Value> {
    let mut coercer = ValueCoercer::new(schema, context);
    let coerced = coercer.coerce(value, expected_type, false);
    let (issues, _) = coercer.into_parts();
    match coerced {
        Some(coerced) => GraphQLResult::with_issues(coerced, issues),
        None => GraphQLResult::failure(issues),
    }
}

/// Accumulates coercion issues and variable usages across many values.
///
/// The validators run every argument of a document through one coercer so
/// that variable usages from the whole document end up in one place.
pub struct ValueCoercer<'a> {
    schema: &'a Schema,
    context: CoercionContext,
    issues: Vec<Issue>,
    variable_usages: Vec<VariableUsage>,
}

impl<'a> ValueCoercer<'a> {
    pub fn new(schema: &'a Schema, context: CoercionContext) -> Self {
        Self {
            schema,
            context,
            issues: Vec::new(),
            variable_usages: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn context(&self) -> CoercionContext {
        self.context
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn variable_usages(&self) -> &[VariableUsage] {
        &self.variable_usages
    }

    pub fn into_parts(self) -> (Vec<Issue>, Vec<VariableUsage>) {
        (self.issues, self.variable_usages)
    }

    pub(crate) fn push_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Coerces `value` against `expected_type`, returning `None` (and
    /// recording why) when it can't be.
    ///
    /// `has_location_default_value` says whether the position being filled
    /// has a default of its own; it is recorded with any variable found
    /// directly in that position.
    pub fn coerce(
        &mut self,
        value: &ast::Value,
        expected_type: &ast::Type,
        has_location_default_value: bool,
    ) -> Option<ast::Value> {
        if let ast::Value::Variable(variable) = value {
            return match self.context {
                CoercionContext::Executable => {
                    self.variable_usages.push(VariableUsage {
                        variable: variable.clone(),
                        location_type: expected_type.clone(),
                        has_location_default_value,
                    });
                    Some(value.clone())
                },
                CoercionContext::Schema => {
                    self.invalid(value, format!("variable `${}` cannot be used in a constant value", variable.name));
                    None
                },
            };
        }

        match expected_type {
            ast::Type::NonNull(non_null) => {
                if matches!(value, ast::Value::Null(_)) {
                    self.invalid(value, format!("expected a non-null `{}`, found null", non_null.inner_type));
                    return None;
                }
                self.coerce(value, &non_null.inner_type, false)
            },
            ast::Type::List(list) => match value {
                ast::Value::Null(_) => Some(value.clone()),
                ast::Value::List(items) => {
                    let mut values = Vec::with_capacity(items.values.len());
                    let mut all_coerced = true;
                    for item in &items.values {
                        match self.coerce_list_item(item, &list.element_type) {
                            Some(coerced) => values.push(coerced),
                            None => all_coerced = false,
                        }
                    }
                    all_coerced.then(|| {
                        ast::Value::List(ast::ListValue {
                            values,
                            source_location: items.source_location.clone(),
                        })
                    })
                },
                // A single value stands in for a one-element list.
                single => {
                    let coerced = self.coerce(single, &list.element_type, false)?;
                    Some(ast::Value::List(ast::ListValue {
                        source_location: coerced.source_location().cloned(),
                        values: vec![coerced],
                    }))
                },
            },
            ast::Type::Named(named) => self.coerce_named(value, &named.name),
        }
    }

    /// Coerces one item of a list literal. Items don't get promoted: an item
    /// of `[[Int]]` must itself be a list.
    fn coerce_list_item(&mut self, item: &ast::Value, element_type: &ast::Type) -> Option<ast::Value> {
        let nullable = match element_type {
            ast::Type::NonNull(non_null) => &non_null.inner_type,
            other => other,
        };
        if matches!(nullable, ast::Type::List(_))
            && !matches!(item, ast::Value::List(_) | ast::Value::Null(_) | ast::Value::Variable(_))
        {
            self.invalid(
                item,
                format!(
                    "expected a list of type `{element_type}`, found {} `{}`",
                    item.kind_name(),
                    Node::Value(item.clone()).to_sdl(),
                ),
            );
            return None;
        }
        self.coerce(item, element_type, false)
    }

    fn coerce_named(&mut self, value: &ast::Value, type_name: &str) -> Option<ast::Value> {
        if matches!(value, ast::Value::Null(_)) {
            return Some(value.clone());
        }

        // Unknown and non-input types are reported where they're declared.
        let Some(definition) = self.schema.type_definition(type_name) else {
            return Some(value.clone());
        };

        match definition {
            ast::TypeDefinition::Scalar(_) => {
                if scalar_accepts(type_name, value) {
                    Some(value.clone())
                } else {
                    self.mismatch(value, type_name);
                    None
                }
            },
            ast::TypeDefinition::Enum(enum_type) => {
                let ast::Value::Enum(enum_value) = value else {
                    self.mismatch(value, type_name);
                    return None;
                };
                let Some(value_definition) = enum_type
                    .values
                    .iter()
                    .find(|candidate| candidate.name == enum_value.value)
                else {
                    self.invalid(
                        value,
                        format!("`{}` is not a value of enum `{type_name}`", enum_value.value),
                    );
                    return None;
                };
                self.check_deprecated(
                    &value_definition.directives,
                    || format!("enum value `{type_name}.{}`", enum_value.value),
                    value.source_location(),
                );
                Some(value.clone())
            },
            ast::TypeDefinition::InputObject(input_object) => match value {
                ast::Value::Object(object) => self.coerce_input_object(input_object, object),
                _ => {
                    self.mismatch(value, type_name);
                    None
                },
            },
            _ => Some(value.clone()),
        }
    }

    fn coerce_input_object(
        &mut self,
        input_object: &ast::InputObjectTypeDefinition,
        object: &ast::ObjectValue,
    ) -> Option<ast::Value> {
        let type_name = &input_object.name;
        let mut seen: HashMap<&str, &ast::ObjectField> = HashMap::new();
        let mut fields = Vec::with_capacity(object.fields.len());
        let mut all_coerced = true;

        for field in &object.fields {
            if let Some(first) = seen.insert(&field.name, field) {
                self.issues.push(Issue::with_notes(
                    IssueKind::InvalidValue,
                    format!("input field `{type_name}.{}` is given more than once", field.name),
                    field.source_location.clone(),
                    smallvec![IssueNote::general_at("first given here", first.source_location.clone())],
                ));
                all_coerced = false;
                continue;
            }
            let Some(field_definition) = input_object
                .fields
                .iter()
                .find(|candidate| candidate.name == field.name)
            else {
                self.issues.push(Issue::new(
                    IssueKind::InvalidValue,
                    format!("input object `{type_name}` has no field `{}`", field.name),
                    field.source_location.clone(),
                ));
                all_coerced = false;
                continue;
            };
            self.check_deprecated(
                &field_definition.directives,
                || format!("input field `{type_name}.{}`", field.name),
                field.source_location.as_ref(),
            );
            let coerced = self.coerce(
                &field.value,
                &field_definition.value_type,
                field_definition.default_value.is_some(),
            );
            match coerced {
                Some(value) => fields.push(ast::ObjectField {
                    value,
                    ..field.clone()
                }),
                None => all_coerced = false,
            }
        }

        for field_definition in &input_object.fields {
            if field_definition.is_required() && !seen.contains_key(field_definition.name.as_str()) {
                self.issues.push(Issue::new(
                    IssueKind::InvalidValue,
                    format!("missing required input field `{type_name}.{}`", field_definition.name),
                    object.source_location.clone(),
                ));
                all_coerced = false;
            }
        }

        all_coerced.then(|| {
            ast::Value::Object(ast::ObjectValue {
                fields,
                source_location: object.source_location.clone(),
            })
        })
    }

    /// Records a [`DeprecatedUsage`](IssueKind::DeprecatedUsage) advisory if
    /// `directives` include `@deprecated`.
    pub(crate) fn check_deprecated(
        &mut self,
        directives: &[ast::Directive],
        describe: impl FnOnce() -> String,
        location: Option<&SourceLocation>,
    ) {
        let Some(reason) = deprecation_reason(directives) else {
            return;
        };
        self.issues.push(Issue::with_notes(
            IssueKind::DeprecatedUsage,
            format!("{} is deprecated", describe()),
            location.cloned(),
            smallvec![IssueNote::general(reason)],
        ));
    }

    fn mismatch(&mut self, value: &ast::Value, type_name: &str) {
        self.invalid(
            value,
            format!(
                "expected a value of type `{type_name}`, found {} `{}`",
                value.kind_name(),
                Node::Value(value.clone()).to_sdl(),
            ),
        );
    }

    fn invalid(&mut self, value: &ast::Value, message: String) {
        self.issues.push(Issue::new(
            IssueKind::InvalidValue,
            message,
            value.source_location().cloned(),
        ));
    }
}

/// Whether a literal fits a scalar. Builtin scalars follow the GraphQL
/// coercion rules; custom scalars accept anything.
fn scalar_accepts(type_name: &str, value: &ast::Value) -> bool {
    use ast::Value;
    match type_name {
        "Int" => matches!(value, Value::Int(_)),
        "Float" => matches!(value, Value::Int(_) | Value::Float(_)),
        "String" => matches!(value, Value::String(_)),
        "Boolean" => matches!(value, Value::Boolean(_)),
        "ID" => matches!(value, Value::String(_) | Value::Int(_)),
        _ => true,
    }
}

/// The `reason:` of a `@deprecated` directive, defaulting as the directive
/// definition does.
pub(crate) fn deprecation_reason(directives: &[ast::Directive]) -> Option<String> {
    let deprecated = directives.iter().find(|directive| directive.name == "deprecated")?;
    let reason = match deprecated.argument("reason").map(|argument| &argument.value) {
        Some(ast::Value::String(reason)) => reason.value.clone(),
        _ => "No longer supported".to_string(),
    };
    Some(reason)
}
